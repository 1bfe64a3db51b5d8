#![forbid(unsafe_code)]

//! Host pointer events.

use formkit_core::{LayoutSnapshot, OccupantId, Point};

/// DOM `PointerEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM button number. Unknown values fall back to primary.
    #[must_use]
    pub const fn from_dom(button: i32) -> Self {
        match button {
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// One event as delivered by the host, before capture filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    PointerDown {
        occupant: OccupantId,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    },
    PointerMove {
        pointer_id: u32,
        position: Point,
    },
    PointerUp {
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    },
    PointerCancel {
        pointer_id: Option<u32>,
    },
    PointerLeave {
        pointer_id: u32,
    },
    CaptureAcquired {
        pointer_id: u32,
    },
    LostPointerCapture {
        pointer_id: u32,
    },
    Blur,
    VisibilityHidden,
    Escape,
    /// The host re-rendered; replaces the widget's layout snapshot.
    Layout(LayoutSnapshot),
}

impl HostEvent {
    /// Pointer id of a move event.
    #[must_use]
    pub const fn move_pointer(&self) -> Option<u32> {
        match self {
            Self::PointerMove { pointer_id, .. } => Some(*pointer_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_buttons() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(1), PointerButton::Auxiliary);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(-1), PointerButton::Primary);
    }
}
