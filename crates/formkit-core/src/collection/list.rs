#![forbid(unsafe_code)]

use super::{Arrangement, CollectionError, ItemLabels, OccupantId};
use crate::geometry::Point;
use crate::layout::{LayoutKey, LayoutSnapshot, Zone};
use crate::spatial::{Candidate, InsertionPoint, SpatialIndex};

/// Single-zone ordering: one sequence, free reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedList {
    sequence: Vec<OccupantId>,
}

impl OrderedList {
    /// List holding occupants `0..count` in input order.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            sequence: (0..count).map(|index| OccupantId::new(index as u32)).collect(),
        }
    }

    /// Current order.
    #[must_use]
    pub fn order(&self) -> &[OccupantId] {
        &self.sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Index of `id`.
    #[must_use]
    pub fn position_of(&self, id: OccupantId) -> Option<usize> {
        self.sequence.iter().position(|held| *held == id)
    }

    /// Remove `id`, returning its prior index.
    pub fn remove(&mut self, id: OccupantId) -> Result<usize, CollectionError> {
        let index = self
            .position_of(id)
            .ok_or(CollectionError::UnknownOccupant { id })?;
        self.sequence.remove(index);
        Ok(index)
    }

    /// Insert `id` at `index`, clamped to `[0, len]`.
    pub fn insert_at(&mut self, id: OccupantId, index: usize) -> Result<usize, CollectionError> {
        if self.position_of(id).is_some() {
            return Err(CollectionError::DuplicateOccupant { id });
        }
        let index = index.min(self.sequence.len());
        self.sequence.insert(index, id);
        Ok(index)
    }

    /// Labels in current order.
    #[must_use]
    pub fn snapshot(&self, labels: &ItemLabels) -> Vec<String> {
        labels.resolve(&self.sequence)
    }

    fn index_for(&self, point: InsertionPoint) -> usize {
        let key_index = |key| match key {
            LayoutKey::Occupant { id } => self.position_of(id),
            _ => None,
        };
        match point {
            InsertionPoint::Before { key } => key_index(key).unwrap_or(self.sequence.len()),
            InsertionPoint::After { key } => key_index(key)
                .map(|index| index + 1)
                .unwrap_or(self.sequence.len()),
            InsertionPoint::End => self.sequence.len(),
        }
    }
}

impl Arrangement for OrderedList {
    type Position = usize;

    fn occupant_count(&self) -> usize {
        self.sequence.len()
    }

    fn contains(&self, id: OccupantId) -> bool {
        self.position_of(id).is_some()
    }

    fn locate(&self, id: OccupantId) -> Option<usize> {
        self.position_of(id)
    }

    fn occupants(&self) -> Vec<OccupantId> {
        self.sequence.clone()
    }

    fn remove(&mut self, id: OccupantId) -> Result<usize, CollectionError> {
        OrderedList::remove(self, id)
    }

    fn insert_at(&mut self, id: OccupantId, position: usize) -> Result<usize, CollectionError> {
        OrderedList::insert_at(self, id, position)
    }

    fn snapshot(&self, labels: &ItemLabels) -> Vec<String> {
        OrderedList::snapshot(self, labels)
    }

    fn zone_of(_position: usize) -> Zone {
        Zone::Single
    }

    fn resolve(
        &self,
        layout: &LayoutSnapshot,
        index: &SpatialIndex,
        point: Point,
        carried: Option<OccupantId>,
    ) -> Option<usize> {
        if !layout.zone_contains(Zone::Single, point) {
            return None;
        }
        let candidates: Vec<Candidate> = self
            .sequence
            .iter()
            .filter_map(|id| {
                layout.occupant_rect(*id).map(|rect| {
                    Candidate::new(LayoutKey::Occupant { id: *id }, rect)
                })
            })
            .collect();
        Some(self.index_for(index.insertion_point(&candidates, point, carried)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Axis, Rect};
    use crate::spatial::NearestMode;

    fn id(raw: u32) -> OccupantId {
        OccupantId::new(raw)
    }

    fn raw(list: &OrderedList) -> Vec<u32> {
        list.order().iter().map(|id| id.get()).collect()
    }

    #[test]
    fn new_is_input_order() {
        assert_eq!(raw(&OrderedList::new(3)), vec![0, 1, 2]);
    }

    #[test]
    fn remove_returns_prior_index() {
        let mut list = OrderedList::new(3);
        assert_eq!(list.remove(id(1)), Ok(1));
        assert_eq!(raw(&list), vec![0, 2]);
    }

    #[test]
    fn remove_unknown_is_noop_error() {
        let mut list = OrderedList::new(2);
        assert_eq!(
            list.remove(id(7)),
            Err(CollectionError::UnknownOccupant { id: id(7) })
        );
        assert_eq!(raw(&list), vec![0, 1]);
    }

    #[test]
    fn insert_clamps_index() {
        let mut list = OrderedList::new(3);
        list.remove(id(0)).unwrap();
        assert_eq!(list.insert_at(id(0), 99), Ok(2));
        assert_eq!(raw(&list), vec![1, 2, 0]);
    }

    #[test]
    fn insert_duplicate_rejected() {
        let mut list = OrderedList::new(2);
        assert_eq!(
            list.insert_at(id(1), 0),
            Err(CollectionError::DuplicateOccupant { id: id(1) })
        );
        assert_eq!(raw(&list), vec![0, 1]);
    }

    #[test]
    fn snapshot_uses_labels() {
        let labels = ItemLabels::new(["X", "Y", "Z"]);
        let mut list = OrderedList::new(3);
        list.remove(id(0)).unwrap();
        list.insert_at(id(0), 2).unwrap();
        assert_eq!(list.snapshot(&labels), vec!["Y", "Z", "X"]);
    }

    fn vertical_layout() -> LayoutSnapshot {
        LayoutSnapshot::new()
            .with(LayoutKey::Zone { zone: Zone::Single }, Rect::new(0, 0, 100, 120))
            .with(LayoutKey::Occupant { id: id(0) }, Rect::new(0, 0, 100, 40))
            .with(LayoutKey::Occupant { id: id(1) }, Rect::new(0, 40, 100, 40))
            .with(LayoutKey::Occupant { id: id(2) }, Rect::new(0, 80, 100, 40))
    }

    #[test]
    fn resolve_outside_zone_is_none() {
        let list = OrderedList::new(3);
        let index = SpatialIndex::default();
        assert_eq!(
            list.resolve(&vertical_layout(), &index, Point::new(300, 10), None),
            None
        );
    }

    #[test]
    fn resolve_maps_insertion_point_to_index() {
        let mut list = OrderedList::new(3);
        list.remove(id(0)).unwrap();
        let index = SpatialIndex::new(NearestMode::AxisMidpoint {
            axis: Axis::Vertical,
        });
        let layout = vertical_layout();
        // Above box 1's midpoint: before occupant 1, which is index 0 now.
        assert_eq!(
            list.resolve(&layout, &index, Point::new(10, 50), Some(id(0))),
            Some(0)
        );
        // Past box 2's midpoint: end.
        assert_eq!(
            list.resolve(&layout, &index, Point::new(10, 110), Some(id(0))),
            Some(2)
        );
    }
}
