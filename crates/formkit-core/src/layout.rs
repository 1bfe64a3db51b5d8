#![forbid(unsafe_code)]

//! Host-reported geometry of the last rendered frame.
//!
//! The engine never computes layout. After every re-render the host reports
//! the bounding boxes it produced, and hit testing runs against that report.
//! Because the host renders from a projection that already contains the
//! provisional placeholder, each pointer move is resolved against the frame
//! the user is actually looking at.

use crate::collection::OccupantId;
use crate::geometry::{Point, Rect, Size};

/// Drop zone of an occupant or origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Zone {
    /// The only list of a single-zone widget.
    Single,
    /// The unordered pool of a dual-zone widget.
    Source,
    /// The ranked slots of a dual-zone widget.
    Target,
}

/// What a reported box belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LayoutKey {
    /// A rendered occupant.
    Occupant { id: OccupantId },
    /// The transient placeholder marker.
    Placeholder,
    /// A ranked slot frame (dual-zone), empty or filled.
    Slot { index: usize },
    /// Bounds of a whole drop zone container.
    Zone { zone: Zone },
}

/// One reported box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutEntry {
    pub key: LayoutKey,
    pub rect: Rect,
}

/// Snapshot of the host's last rendered layout.
///
/// Later entries with the same key replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSnapshot {
    entries: Vec<LayoutEntry>,
}

impl LayoutSnapshot {
    /// Empty snapshot: every zone is unbounded and nothing has a box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: LayoutKey, rect: Rect) -> Self {
        self.insert(key, rect);
        self
    }

    /// Record the box for `key`, replacing any previous one.
    pub fn insert(&mut self, key: LayoutKey, rect: Rect) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) {
            entry.rect = rect;
        } else {
            self.entries.push(LayoutEntry { key, rect });
        }
    }

    /// Number of recorded boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in report order.
    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.entries.iter()
    }

    /// Box of `key`, if reported.
    #[must_use]
    pub fn rect_of(&self, key: LayoutKey) -> Option<Rect> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.rect)
    }

    /// Box of an occupant, if reported.
    #[must_use]
    pub fn occupant_rect(&self, id: OccupantId) -> Option<Rect> {
        self.rect_of(LayoutKey::Occupant { id })
    }

    /// Placeholder size hint for `id`: its rendered size when known.
    #[must_use]
    pub fn size_hint(&self, id: OccupantId) -> Option<Size> {
        self.occupant_rect(id).map(|rect| rect.size())
    }

    /// Whether `point` falls inside `zone`. Unreported zones are unbounded.
    #[must_use]
    pub fn zone_contains(&self, zone: Zone, point: Point) -> bool {
        self.rect_of(LayoutKey::Zone { zone })
            .is_none_or(|rect| rect.contains(point))
    }

    /// Whether the host reported bounds for `zone`.
    #[must_use]
    pub fn has_zone(&self, zone: Zone) -> bool {
        self.rect_of(LayoutKey::Zone { zone }).is_some()
    }

    /// Reported slot frames as `(index, rect)`, in report order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.entries.iter().filter_map(|entry| match entry.key {
            LayoutKey::Slot { index } => Some((index, entry.rect)),
            _ => None,
        })
    }
}

impl FromIterator<LayoutEntry> for LayoutSnapshot {
    fn from_iter<T: IntoIterator<Item = LayoutEntry>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for entry in iter {
            snapshot.insert(entry.key, entry.rect);
        }
        snapshot
    }
}
