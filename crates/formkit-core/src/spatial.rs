#![forbid(unsafe_code)]

//! Pointer hit testing against rendered item boxes.
//!
//! Two nearest-candidate rules are provided:
//!
//! - [`nearest_by_center`]: Euclidean distance from the pointer to each box
//!   center. Works for wrapping 2-D layouts.
//! - [`nearest_by_axis_midpoint`]: half-plane test along one axis. Picks the
//!   closest candidate whose midpoint is still ahead of the pointer.
//!
//! [`SpatialIndex`] folds both into a single [`InsertionPoint`] answer so the
//! drag machine has exactly one code path.
//!
//! # Invariants
//!
//! 1. Placeholder boxes never win a search.
//! 2. The excluded occupant (the one being carried) never wins a search.
//! 3. Empty boxes (hidden elements) never win a search.
//! 4. Ties resolve to the earliest candidate in iteration order.

use crate::collection::OccupantId;
use crate::geometry::{Axis, Point, Rect};
use crate::layout::LayoutKey;

/// One searchable box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub key: LayoutKey,
    pub rect: Rect,
}

impl Candidate {
    #[inline]
    #[must_use]
    pub const fn new(key: LayoutKey, rect: Rect) -> Self {
        Self { key, rect }
    }

    fn is_searchable(&self, exclude: Option<OccupantId>) -> bool {
        match self.key {
            LayoutKey::Placeholder => false,
            LayoutKey::Occupant { id } if Some(id) == exclude => false,
            _ => !self.rect.is_empty(),
        }
    }
}

/// Nearest candidate by center distance; `None` when nothing is searchable.
#[must_use]
pub fn nearest_by_center(
    candidates: &[Candidate],
    point: Point,
    exclude: Option<OccupantId>,
) -> Option<Candidate> {
    let mut best: Option<(f64, Candidate)> = None;
    for candidate in candidates.iter().filter(|c| c.is_searchable(exclude)) {
        let distance = candidate.rect.center_distance_sq(point);
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, *candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Candidate the pointer is currently before along `axis`.
///
/// For each candidate, `offset = pointer - start - extent / 2`. The winner is
/// the candidate with the largest offset that is still negative. `None` means
/// the pointer is past every midpoint: insert at the end.
#[must_use]
pub fn nearest_by_axis_midpoint(
    candidates: &[Candidate],
    point: Point,
    axis: Axis,
    exclude: Option<OccupantId>,
) -> Option<Candidate> {
    let pointer = f64::from(point.along(axis));
    let mut best: Option<(f64, Candidate)> = None;
    for candidate in candidates.iter().filter(|c| c.is_searchable(exclude)) {
        let offset = pointer - candidate.rect.midpoint(axis);
        if offset < 0.0 && best.is_none_or(|(best_offset, _)| offset > best_offset) {
            best = Some((offset, *candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Where the carried occupant would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "at", rename_all = "snake_case"))]
pub enum InsertionPoint {
    /// Directly before the keyed box.
    Before { key: LayoutKey },
    /// Directly after the keyed box.
    After { key: LayoutKey },
    /// After every candidate.
    End,
}

/// Nearest-candidate rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum NearestMode {
    /// Nearest box center, then a half-plane test along `flow` picks the side.
    CenterDistance { flow: Axis },
    /// Half-plane test along `axis` only.
    AxisMidpoint { axis: Axis },
}

impl Default for NearestMode {
    fn default() -> Self {
        Self::CenterDistance {
            flow: Axis::Horizontal,
        }
    }
}

/// Stateless insertion-point resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpatialIndex {
    mode: NearestMode,
}

impl SpatialIndex {
    #[must_use]
    pub const fn new(mode: NearestMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> NearestMode {
        self.mode
    }

    /// Nearest candidate under the configured rule.
    #[must_use]
    pub fn nearest(
        &self,
        candidates: &[Candidate],
        point: Point,
        exclude: Option<OccupantId>,
    ) -> Option<Candidate> {
        match self.mode {
            NearestMode::CenterDistance { .. } => nearest_by_center(candidates, point, exclude),
            NearestMode::AxisMidpoint { axis } => {
                nearest_by_axis_midpoint(candidates, point, axis, exclude)
            }
        }
    }

    /// Resolve the insertion point for `point`.
    #[must_use]
    pub fn insertion_point(
        &self,
        candidates: &[Candidate],
        point: Point,
        exclude: Option<OccupantId>,
    ) -> InsertionPoint {
        let Some(nearest) = self.nearest(candidates, point, exclude) else {
            return InsertionPoint::End;
        };
        match self.mode {
            NearestMode::AxisMidpoint { .. } => InsertionPoint::Before { key: nearest.key },
            NearestMode::CenterDistance { flow } => {
                if f64::from(point.along(flow)) < nearest.rect.midpoint(flow) {
                    InsertionPoint::Before { key: nearest.key }
                } else {
                    InsertionPoint::After { key: nearest.key }
                }
            }
        }
    }
}
