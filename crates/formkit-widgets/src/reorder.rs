#![forbid(unsafe_code)]

//! Ranking widgets built on the drag machine.
//!
//! [`SortableList`] reorders every option in place. [`RankingBoard`] starts
//! with every option in a pool and lets the user drop them into ranked
//! slots. Both share [`ReorderWidget`], which owns the labels, the drag
//! machine, the last layout the host reported, and the submit gate.
//!
//! Pointer methods return `None` once the widget has submitted; the widget
//! is inert from then on.

use formkit_core::{
    Arrangement, BoardPosition, BoardProjection, CancelReason, DragConfig, DragMachine,
    DragSession, DragTransition, ItemLabels, LayoutSnapshot, ListProjection, OccupantId,
    OrderedList, Point, SlotBoard, SpatialIndex, SubmitError, SubmitGate, project_board,
    project_list,
};

use crate::config::WidgetConfig;
use crate::message::{
    HostSink, OutboundMessage, RANKING_CONFIRMATION, Response, SORTED_CONFIRMATION,
};

/// Per-arrangement behavior of a ranking widget.
pub trait ReorderModel: Arrangement {
    /// What the host renders.
    type Projection;

    /// Arrangement holding occupants `0..count` in their initial places.
    fn with_occupants(count: usize) -> Self;

    fn project(
        &self,
        labels: &ItemLabels,
        session: Option<&DragSession<Self::Position>>,
    ) -> Self::Projection;

    /// Entries the submission must hold.
    fn minimum_selection(&self) -> usize;

    fn confirmation() -> &'static str;
}

impl ReorderModel for OrderedList {
    type Projection = ListProjection;

    fn with_occupants(count: usize) -> Self {
        OrderedList::new(count)
    }

    fn project(&self, labels: &ItemLabels, session: Option<&DragSession<usize>>) -> ListProjection {
        project_list(self, labels, session)
    }

    fn minimum_selection(&self) -> usize {
        self.len()
    }

    fn confirmation() -> &'static str {
        SORTED_CONFIRMATION
    }
}

impl ReorderModel for SlotBoard {
    type Projection = BoardProjection;

    fn with_occupants(count: usize) -> Self {
        SlotBoard::new(count)
    }

    fn project(
        &self,
        labels: &ItemLabels,
        session: Option<&DragSession<BoardPosition>>,
    ) -> BoardProjection {
        project_board(self, labels, session)
    }

    fn minimum_selection(&self) -> usize {
        1
    }

    fn confirmation() -> &'static str {
        RANKING_CONFIRMATION
    }
}

/// Drag-to-reorder widget.
#[derive(Debug, Clone)]
pub struct ReorderWidget<A: ReorderModel> {
    labels: ItemLabels,
    submit_event: String,
    machine: DragMachine<A>,
    layout: LayoutSnapshot,
    gate: SubmitGate,
}

/// Single-zone sortable list.
pub type SortableList = ReorderWidget<OrderedList>;

/// Pool plus ranked slots.
pub type RankingBoard = ReorderWidget<SlotBoard>;

impl<A: ReorderModel> ReorderWidget<A> {
    #[must_use]
    pub fn new(config: &WidgetConfig) -> Self {
        Self::with_drag_config(config, DragConfig::default())
    }

    /// Construct with an explicit machine configuration. The config's
    /// nearest-candidate rule overrides the one in `drag`.
    #[must_use]
    pub fn with_drag_config(config: &WidgetConfig, drag: DragConfig) -> Self {
        let labels = ItemLabels::new(config.options().iter().cloned());
        let arrangement = A::with_occupants(labels.len());
        let drag = drag.with_spatial(SpatialIndex::new(config.nearest()));
        Self {
            machine: DragMachine::new(arrangement, drag),
            labels,
            submit_event: config.submit_event().to_owned(),
            layout: LayoutSnapshot::new(),
            gate: SubmitGate::new(),
        }
    }

    /// Record what the host just rendered.
    pub fn set_layout(&mut self, layout: LayoutSnapshot) {
        self.layout = layout;
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutSnapshot {
        &self.layout
    }

    #[must_use]
    pub fn labels(&self) -> &ItemLabels {
        &self.labels
    }

    #[must_use]
    pub fn machine(&self) -> &DragMachine<A> {
        &self.machine
    }

    #[must_use]
    pub fn arrangement(&self) -> &A {
        self.machine.arrangement()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.machine.is_dragging()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.gate.is_submitted()
    }

    /// Display entries for the current state.
    #[must_use]
    pub fn project(&self) -> A::Projection {
        self.machine
            .arrangement()
            .project(&self.labels, self.machine.session())
    }

    /// Labels in submission order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.machine.arrangement().snapshot(&self.labels)
    }

    pub fn pointer_down(&mut self, occupant: OccupantId) -> Option<DragTransition<A::Position>> {
        if self.is_submitted() {
            return None;
        }
        Some(self.machine.begin(occupant, &self.layout))
    }

    pub fn pointer_move(&mut self, point: Point) -> Option<DragTransition<A::Position>> {
        if self.is_submitted() {
            return None;
        }
        Some(self.machine.update(point, &self.layout))
    }

    /// Resolve the release point, then commit or cancel.
    pub fn pointer_up(&mut self, point: Point) -> Option<DragTransition<A::Position>> {
        if self.is_submitted() {
            return None;
        }
        if self.machine.is_dragging() {
            self.machine.update(point, &self.layout);
        }
        Some(self.machine.release())
    }

    pub fn pointer_leave(&mut self) -> Option<DragTransition<A::Position>> {
        self.cancel(CancelReason::PointerLeave)
    }

    pub fn pointer_cancel(&mut self) -> Option<DragTransition<A::Position>> {
        self.cancel(CancelReason::PointerCancel)
    }

    pub fn escape(&mut self) -> Option<DragTransition<A::Position>> {
        self.cancel(CancelReason::EscapeKey)
    }

    pub fn blur(&mut self) -> Option<DragTransition<A::Position>> {
        self.cancel(CancelReason::Blur)
    }

    pub fn cancel(&mut self, reason: CancelReason) -> Option<DragTransition<A::Position>> {
        if self.is_submitted() {
            return None;
        }
        Some(self.machine.cancel(reason))
    }

    /// Emit the final order to `sink`, at most once.
    ///
    /// An active drag is cancelled first so the submitted order never
    /// includes a provisional move. A refused submit leaves the drag and
    /// the gate untouched.
    pub fn submit(&mut self, sink: &mut impl HostSink) -> Result<(), SubmitError> {
        let settled = self.machine.settled();
        self.gate.check(
            settled.snapshot(&self.labels).len(),
            settled.minimum_selection(),
        )?;
        self.machine.force_cancel();
        let arrangement = self.machine.arrangement();
        let selection = self.gate.try_submit(
            arrangement.snapshot(&self.labels),
            arrangement.minimum_selection(),
        )?;
        sink.interact(OutboundMessage::new(
            self.submit_event.clone(),
            Response::SortedOptions(selection),
            A::confirmation(),
        ));
        Ok(())
    }
}
