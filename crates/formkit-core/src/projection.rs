#![forbid(unsafe_code)]

//! Render projection.
//!
//! Projections are derived from an arrangement plus the active session and
//! nothing else, so the host can re-render from scratch after every
//! transition. Nothing here mutates engine state.
//!
//! The carried occupant never appears in the flow of entries; it is reported
//! separately as the floating `carried` entry, and its landing spot is marked
//! by a [`DisplayEntry::Placeholder`].

use crate::collection::{BoardPosition, ItemLabels, OccupantId, OrderedList, SlotBoard};
use crate::geometry::Size;
use crate::session::DragSession;

/// One rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DisplayEntry {
    Occupant {
        id: OccupantId,
        label: String,
        is_being_dragged: bool,
    },
    /// Marker for the provisional drop position. Hints are the carried
    /// occupant's size when it was picked up, if the host reported one.
    Placeholder {
        width_hint: Option<u32>,
        height_hint: Option<u32>,
    },
}

impl DisplayEntry {
    fn occupant(id: OccupantId, labels: &ItemLabels, is_being_dragged: bool) -> Self {
        Self::Occupant {
            id,
            label: labels.label(id).unwrap_or_default().to_owned(),
            is_being_dragged,
        }
    }

    fn placeholder(hint: Option<Size>) -> Self {
        Self::Placeholder {
            width_hint: hint.map(|size| size.width),
            height_hint: hint.map(|size| size.height),
        }
    }

    /// Label of an occupant entry.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Occupant { label, .. } => Some(label),
            Self::Placeholder { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Single-zone projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListProjection {
    pub entries: Vec<DisplayEntry>,
    pub carried: Option<DisplayEntry>,
}

/// Contents of one ranked slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", content = "entry", rename_all = "snake_case"))]
pub enum SlotView {
    Empty,
    Filled(DisplayEntry),
}

/// Dual-zone projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardProjection {
    pub pool: Vec<DisplayEntry>,
    pub slots: Vec<SlotView>,
    pub carried: Option<DisplayEntry>,
}

fn carried_entry<P: Copy>(
    session: Option<&DragSession<P>>,
    labels: &ItemLabels,
) -> Option<DisplayEntry> {
    session.map(|session| DisplayEntry::occupant(session.carried(), labels, true))
}

/// Project a single-zone list.
#[must_use]
pub fn project_list(
    list: &OrderedList,
    labels: &ItemLabels,
    session: Option<&DragSession<usize>>,
) -> ListProjection {
    let mut entries: Vec<DisplayEntry> = list
        .order()
        .iter()
        .map(|id| DisplayEntry::occupant(*id, labels, false))
        .collect();
    if let Some((index, hint)) =
        session.and_then(|s| s.provisional().map(|index| (index, s.size_hint())))
    {
        let index = index.min(entries.len());
        entries.insert(index, DisplayEntry::placeholder(hint));
    }
    ListProjection {
        entries,
        carried: carried_entry(session, labels),
    }
}

/// Project a dual-zone board.
///
/// A provisional slot that is already filled gets no placeholder: the drop
/// would be refused.
#[must_use]
pub fn project_board(
    board: &SlotBoard,
    labels: &ItemLabels,
    session: Option<&DragSession<BoardPosition>>,
) -> BoardProjection {
    let mut pool: Vec<DisplayEntry> = board
        .pool()
        .iter()
        .map(|id| DisplayEntry::occupant(*id, labels, false))
        .collect();
    let mut slots: Vec<SlotView> = board
        .slots()
        .iter()
        .map(|slot| match slot {
            Some(id) => SlotView::Filled(DisplayEntry::occupant(*id, labels, false)),
            None => SlotView::Empty,
        })
        .collect();

    let provisional = session.and_then(|s| s.provisional().map(|at| (at, s.size_hint())));
    match provisional {
        Some((BoardPosition::Pool(index), hint)) => {
            let index = index.min(pool.len());
            pool.insert(index, DisplayEntry::placeholder(hint));
        }
        Some((BoardPosition::Slot(index), hint)) => {
            if let Some(view @ SlotView::Empty) = slots.get_mut(index) {
                *view = SlotView::Filled(DisplayEntry::placeholder(hint));
            }
        }
        None => {}
    }

    BoardProjection {
        pool,
        slots,
        carried: carried_entry(session, labels),
    }
}
