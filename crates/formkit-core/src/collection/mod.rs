#![forbid(unsafe_code)]

//! Authoritative item orderings.
//!
//! Two arrangements share the [`Arrangement`] seam so the drag machine can
//! drive either one:
//!
//! - [`OrderedList`]: a single sequence; reordering is free.
//! - [`SlotBoard`]: an unordered pool plus a fixed run of ranked slots; an
//!   occupant may only be placed into an empty slot.
//!
//! # Membership invariant
//!
//! Every occupant created at construction is held exactly once, except while
//! a drag session carries it. Reordering never creates or destroys occupants.
//! Operations that would break this return [`CollectionError`] and leave the
//! arrangement untouched.

mod board;
mod list;

use std::fmt;

pub use board::{BoardPosition, SlotBoard};
pub use list::OrderedList;

use crate::geometry::Point;
use crate::layout::{LayoutSnapshot, Zone};
use crate::spatial::SpatialIndex;

/// Identity of one rendered item occurrence.
///
/// The id is the item's index in the (filtered) input list, so two items with
/// the same label still have distinct identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OccupantId(u32);

impl OccupantId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Label table, indexed by [`OccupantId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLabels {
    labels: Vec<String>,
}

impl ItemLabels {
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of `id`, if it exists.
    #[must_use]
    pub fn label(&self, id: OccupantId) -> Option<&str> {
        self.labels.get(id.index()).map(String::as_str)
    }

    /// All ids, in input order.
    pub fn ids(&self) -> impl Iterator<Item = OccupantId> + '_ {
        (0..self.labels.len()).map(|index| OccupantId::new(index as u32))
    }

    /// Materialize labels for `ids`, skipping unknown ids.
    #[must_use]
    pub fn resolve<'a>(&self, ids: impl IntoIterator<Item = &'a OccupantId>) -> Vec<String> {
        ids.into_iter()
            .filter_map(|id| self.label(*id).map(str::to_owned))
            .collect()
    }
}

/// Structural error from an arrangement mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CollectionError {
    /// The occupant is not held by the arrangement.
    UnknownOccupant { id: OccupantId },
    /// The occupant is already held; inserting would duplicate it.
    DuplicateOccupant { id: OccupantId },
    /// Slot index beyond the board.
    SlotOutOfRange { index: usize, slots: usize },
    /// The destination slot already holds an occupant.
    SlotOccupied { index: usize, occupant: OccupantId },
}

impl CollectionError {
    /// Whether this error means the engine itself misbehaved.
    ///
    /// `SlotOccupied` is the one user-reachable outcome (a drop onto a filled
    /// slot); the rest only occur if a caller bypasses the drag machine.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        !matches!(self, Self::SlotOccupied { .. })
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOccupant { id } => write!(f, "occupant {id} is not in the collection"),
            Self::DuplicateOccupant { id } => {
                write!(f, "occupant {id} is already in the collection")
            }
            Self::SlotOutOfRange { index, slots } => {
                write!(f, "slot {index} out of range (board has {slots} slots)")
            }
            Self::SlotOccupied { index, occupant } => {
                write!(f, "slot {index} is occupied by {occupant}")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// An ordering the drag machine can mutate.
pub trait Arrangement: Clone + fmt::Debug {
    /// Logical position of an occupant.
    type Position: Copy + Eq + fmt::Debug;

    /// Occupants currently held (carried occupants excluded).
    fn occupant_count(&self) -> usize;

    /// Whether `id` is currently held.
    fn contains(&self, id: OccupantId) -> bool;

    /// Current position of `id`.
    fn locate(&self, id: OccupantId) -> Option<Self::Position>;

    /// Every held occupant, in a deterministic order.
    fn occupants(&self) -> Vec<OccupantId>;

    /// Remove `id` from wherever it resides and return its prior position.
    fn remove(&mut self, id: OccupantId) -> Result<Self::Position, CollectionError>;

    /// Insert `id` at `position`, returning the position actually used
    /// (indexes are clamped).
    fn insert_at(
        &mut self,
        id: OccupantId,
        position: Self::Position,
    ) -> Result<Self::Position, CollectionError>;

    /// Labels in submission order.
    fn snapshot(&self, labels: &ItemLabels) -> Vec<String>;

    /// Zone a position belongs to.
    fn zone_of(position: Self::Position) -> Zone;

    /// Hit-test `point` against the host layout.
    ///
    /// `carried` is excluded from the search. `None` means no valid drop
    /// target is under the pointer.
    fn resolve(
        &self,
        layout: &LayoutSnapshot,
        index: &SpatialIndex,
        point: Point,
        carried: Option<OccupantId>,
    ) -> Option<Self::Position>;
}
