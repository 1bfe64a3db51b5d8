#![forbid(unsafe_code)]

use super::{Arrangement, CollectionError, ItemLabels, OccupantId};
use crate::geometry::Point;
use crate::layout::{LayoutKey, LayoutSnapshot, Zone};
use crate::spatial::{Candidate, InsertionPoint, SpatialIndex, nearest_by_center};

/// Position on a [`SlotBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoardPosition {
    /// Index into the pool.
    Pool(usize),
    /// Ranked slot index.
    Slot(usize),
}

/// Dual-zone ordering: a pool of unplaced occupants and a fixed run of
/// ranked slots, one per item.
///
/// Slots only accept placement while empty. A drop onto a filled slot is
/// rejected with [`CollectionError::SlotOccupied`]; occupants are never
/// swapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBoard {
    slots: Vec<Option<OccupantId>>,
    pool: Vec<OccupantId>,
}

impl SlotBoard {
    /// Board with every occupant in the pool and all `count` slots empty.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            pool: (0..count).map(|index| OccupantId::new(index as u32)).collect(),
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<OccupantId>] {
        &self.slots
    }

    #[must_use]
    pub fn pool(&self) -> &[OccupantId] {
        &self.pool
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of filled slots.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Occupant of slot `index`, if filled.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<OccupantId> {
        self.slots.get(index).copied().flatten()
    }

    /// Current position of `id`.
    #[must_use]
    pub fn locate(&self, id: OccupantId) -> Option<BoardPosition> {
        if let Some(index) = self.pool.iter().position(|held| *held == id) {
            return Some(BoardPosition::Pool(index));
        }
        self.slots
            .iter()
            .position(|slot| *slot == Some(id))
            .map(BoardPosition::Slot)
    }

    /// Remove `id` from the pool (closing the gap) or vacate its slot.
    pub fn remove(&mut self, id: OccupantId) -> Result<BoardPosition, CollectionError> {
        let position = self
            .locate(id)
            .ok_or(CollectionError::UnknownOccupant { id })?;
        match position {
            BoardPosition::Pool(index) => {
                self.pool.remove(index);
            }
            BoardPosition::Slot(index) => {
                self.vacate_slot(index)?;
            }
        }
        Ok(position)
    }

    /// Set slot `index` back to empty, returning its former occupant.
    pub fn vacate_slot(&mut self, index: usize) -> Result<Option<OccupantId>, CollectionError> {
        let slots = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(CollectionError::SlotOutOfRange { index, slots })?;
        Ok(slot.take())
    }

    /// Insert `id` into the pool (index clamped) or into an empty slot.
    pub fn insert_at(
        &mut self,
        id: OccupantId,
        position: BoardPosition,
    ) -> Result<BoardPosition, CollectionError> {
        if self.locate(id).is_some() {
            return Err(CollectionError::DuplicateOccupant { id });
        }
        match position {
            BoardPosition::Pool(index) => {
                let index = index.min(self.pool.len());
                self.pool.insert(index, id);
                Ok(BoardPosition::Pool(index))
            }
            BoardPosition::Slot(index) => {
                let slots = self.slots.len();
                let slot = self
                    .slots
                    .get_mut(index)
                    .ok_or(CollectionError::SlotOutOfRange { index, slots })?;
                if let Some(occupant) = *slot {
                    return Err(CollectionError::SlotOccupied { index, occupant });
                }
                *slot = Some(id);
                Ok(BoardPosition::Slot(index))
            }
        }
    }

    /// Labels of filled slots in rank order.
    #[must_use]
    pub fn snapshot(&self, labels: &ItemLabels) -> Vec<String> {
        labels.resolve(self.slots.iter().flatten())
    }

    /// Labels per slot, `None` for empty slots.
    #[must_use]
    pub fn slot_snapshot(&self, labels: &ItemLabels) -> Vec<Option<String>> {
        self.slots
            .iter()
            .map(|slot| slot.and_then(|id| labels.label(id)).map(str::to_owned))
            .collect()
    }

    /// Labels of the pool in order.
    #[must_use]
    pub fn pool_snapshot(&self, labels: &ItemLabels) -> Vec<String> {
        labels.resolve(&self.pool)
    }

    fn resolve_slot(&self, layout: &LayoutSnapshot, point: Point) -> Option<usize> {
        let frames: Vec<Candidate> = layout
            .slots()
            .filter(|(index, _)| *index < self.slots.len())
            .map(|(index, rect)| Candidate::new(LayoutKey::Slot { index }, rect))
            .collect();
        if let Some(hit) = frames.iter().find(|frame| frame.rect.contains(point)) {
            return slot_index(hit.key);
        }
        if layout.has_zone(Zone::Target) && layout.zone_contains(Zone::Target, point) {
            return nearest_by_center(&frames, point, None).and_then(|frame| slot_index(frame.key));
        }
        None
    }

    fn resolve_pool(
        &self,
        layout: &LayoutSnapshot,
        index: &SpatialIndex,
        point: Point,
        carried: Option<OccupantId>,
    ) -> Option<usize> {
        if !layout.zone_contains(Zone::Source, point) {
            return None;
        }
        let candidates: Vec<Candidate> = self
            .pool
            .iter()
            .filter_map(|id| {
                layout
                    .occupant_rect(*id)
                    .map(|rect| Candidate::new(LayoutKey::Occupant { id: *id }, rect))
            })
            .collect();
        let pool_index = |key| match key {
            LayoutKey::Occupant { id } => self.pool.iter().position(|held| *held == id),
            _ => None,
        };
        let at = match index.insertion_point(&candidates, point, carried) {
            InsertionPoint::Before { key } => pool_index(key),
            InsertionPoint::After { key } => pool_index(key).map(|i| i + 1),
            InsertionPoint::End => None,
        };
        Some(at.unwrap_or(self.pool.len()))
    }
}

fn slot_index(key: LayoutKey) -> Option<usize> {
    match key {
        LayoutKey::Slot { index } => Some(index),
        _ => None,
    }
}

impl Arrangement for SlotBoard {
    type Position = BoardPosition;

    fn occupant_count(&self) -> usize {
        self.pool.len() + self.placed_count()
    }

    fn contains(&self, id: OccupantId) -> bool {
        self.locate(id).is_some()
    }

    fn locate(&self, id: OccupantId) -> Option<BoardPosition> {
        SlotBoard::locate(self, id)
    }

    fn occupants(&self) -> Vec<OccupantId> {
        self.slots
            .iter()
            .flatten()
            .chain(self.pool.iter())
            .copied()
            .collect()
    }

    fn remove(&mut self, id: OccupantId) -> Result<BoardPosition, CollectionError> {
        SlotBoard::remove(self, id)
    }

    fn insert_at(
        &mut self,
        id: OccupantId,
        position: BoardPosition,
    ) -> Result<BoardPosition, CollectionError> {
        SlotBoard::insert_at(self, id, position)
    }

    fn snapshot(&self, labels: &ItemLabels) -> Vec<String> {
        SlotBoard::snapshot(self, labels)
    }

    fn zone_of(position: BoardPosition) -> Zone {
        match position {
            BoardPosition::Pool(_) => Zone::Source,
            BoardPosition::Slot(_) => Zone::Target,
        }
    }

    /// Slots win over the pool: a point inside a slot frame, or inside the
    /// reported target zone, resolves to a slot. Anything else inside the
    /// source zone resolves to a pool index.
    fn resolve(
        &self,
        layout: &LayoutSnapshot,
        index: &SpatialIndex,
        point: Point,
        carried: Option<OccupantId>,
    ) -> Option<BoardPosition> {
        if let Some(slot) = self.resolve_slot(layout, point) {
            return Some(BoardPosition::Slot(slot));
        }
        if layout.has_zone(Zone::Target) && layout.zone_contains(Zone::Target, point) {
            return None;
        }
        self.resolve_pool(layout, index, point, carried)
            .map(BoardPosition::Pool)
    }
}
