#![forbid(unsafe_code)]

//! Deterministic pointer-capture adapter for ranking widgets.
//!
//! This module bridges browser pointer lifecycle signals onto a
//! [`ReorderWidget`]'s pointer surface while enforcing:
//! - one active pointer at a time,
//! - explicit capture acquire/release commands for JS hosts, and
//! - cancellation on interruption paths (blur/visibility/lost-capture).

use formkit_core::{
    CancelReason, DragEffect, DragTransition, OccupantId, Point, SubmitError,
};
use formkit_widgets::{HostSink, ReorderModel, ReorderWidget};

use crate::event::{HostEvent, PointerButton};

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerCaptureConfig {
    /// Button required to pick up an item.
    pub activation_button: PointerButton,
    /// If true, pointer leave cancels the drag when capture was requested
    /// but never acknowledged.
    pub cancel_on_leave_without_capture: bool,
}

impl Default for PointerCaptureConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
            cancel_on_leave_without_capture: true,
        }
    }
}

impl PointerCaptureConfig {
    #[must_use]
    pub fn with_activation_button(mut self, button: PointerButton) -> Self {
        self.activation_button = button;
        self
    }

    #[must_use]
    pub fn with_cancel_on_leave_without_capture(mut self, cancel: bool) -> Self {
        self.cancel_on_leave_without_capture = cancel;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

impl CaptureState {
    const fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePointer {
    pointer_id: u32,
    occupant: OccupantId,
    button: PointerButton,
    capture_state: CaptureState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DispatchContext {
    phase: PointerLifecyclePhase,
    pointer_id: Option<u32>,
    occupant: Option<OccupantId>,
    position: Option<Point>,
}

/// Host command for browser pointer-capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

/// Lifecycle phase recorded for one adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerLifecyclePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
    Escape,
}

/// Why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileCaptured,
    /// The widget refused the event (unknown occupant, or already submitted).
    WidgetRejected,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerLogOutcome {
    Forwarded,
    CaptureStateUpdated,
    Ignored(PointerIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerLogEntry {
    pub phase: PointerLifecyclePhase,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub occupant: Option<OccupantId>,
    pub position: Option<Point>,
    pub capture_command: Option<CaptureCommand>,
    pub outcome: PointerLogOutcome,
}

/// Result of one lifecycle dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerDispatch<P> {
    pub transition: Option<DragTransition<P>>,
    pub capture_command: Option<CaptureCommand>,
    pub log: PointerLogEntry,
}

impl<P> PointerDispatch<P> {
    fn ignored(context: DispatchContext, reason: PointerIgnoredReason) -> Self {
        Self {
            transition: None,
            capture_command: None,
            log: PointerLogEntry {
                phase: context.phase,
                sequence: None,
                pointer_id: context.pointer_id,
                occupant: context.occupant,
                position: context.position,
                capture_command: None,
                outcome: PointerLogOutcome::Ignored(reason),
            },
        }
    }

    fn capture_state_updated(pointer_id: u32, occupant: OccupantId) -> Self {
        Self {
            transition: None,
            capture_command: None,
            log: PointerLogEntry {
                phase: PointerLifecyclePhase::CaptureAcquired,
                sequence: None,
                pointer_id: Some(pointer_id),
                occupant: Some(occupant),
                position: None,
                capture_command: None,
                outcome: PointerLogOutcome::CaptureStateUpdated,
            },
        }
    }

    /// Whether the widget received the event.
    #[must_use]
    pub const fn is_forwarded(&self) -> bool {
        matches!(self.log.outcome, PointerLogOutcome::Forwarded)
    }
}

/// Pointer-capture adapter owning one ranking widget.
///
/// Returned capture commands map onto DOM `setPointerCapture()` and
/// `releasePointerCapture()`.
#[derive(Debug, Clone)]
pub struct PointerCaptureAdapter<A: ReorderModel> {
    widget: ReorderWidget<A>,
    config: PointerCaptureConfig,
    active: Option<ActivePointer>,
    next_sequence: u64,
}

impl<A: ReorderModel> PointerCaptureAdapter<A> {
    #[must_use]
    pub fn new(widget: ReorderWidget<A>, config: PointerCaptureConfig) -> Self {
        Self {
            widget,
            config,
            active: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> PointerCaptureConfig {
        self.config
    }

    #[must_use]
    pub fn widget(&self) -> &ReorderWidget<A> {
        &self.widget
    }

    #[must_use]
    pub fn into_widget(self) -> ReorderWidget<A> {
        self.widget
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Route one host event. Layout events update the widget and produce no
    /// dispatch.
    pub fn dispatch(&mut self, event: HostEvent) -> Option<PointerDispatch<A::Position>> {
        let dispatch = match event {
            HostEvent::PointerDown {
                occupant,
                pointer_id,
                button,
                position,
            } => self.pointer_down(occupant, pointer_id, button, position),
            HostEvent::PointerMove {
                pointer_id,
                position,
            } => self.pointer_move(pointer_id, position),
            HostEvent::PointerUp {
                pointer_id,
                button,
                position,
            } => self.pointer_up(pointer_id, button, position),
            HostEvent::PointerCancel { pointer_id } => self.pointer_cancel(pointer_id),
            HostEvent::PointerLeave { pointer_id } => self.pointer_leave(pointer_id),
            HostEvent::CaptureAcquired { pointer_id } => self.capture_acquired(pointer_id),
            HostEvent::LostPointerCapture { pointer_id } => self.lost_pointer_capture(pointer_id),
            HostEvent::Blur => self.blur(),
            HostEvent::VisibilityHidden => self.visibility_hidden(),
            HostEvent::Escape => self.escape(),
            HostEvent::Layout(layout) => {
                self.widget.set_layout(layout);
                return None;
            }
        };
        Some(dispatch)
    }

    /// Handle pointer-down on an item.
    pub fn pointer_down(
        &mut self,
        occupant: OccupantId,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    ) -> PointerDispatch<A::Position> {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::PointerDown,
            pointer_id: Some(pointer_id),
            occupant: Some(occupant),
            position: Some(position),
        };
        if pointer_id == 0 {
            return PointerDispatch::ignored(context, PointerIgnoredReason::InvalidPointerId);
        }
        if button != self.config.activation_button {
            return PointerDispatch::ignored(context, PointerIgnoredReason::ButtonNotAllowed);
        }
        if self.active.is_some() {
            return PointerDispatch::ignored(
                context,
                PointerIgnoredReason::ActivePointerAlreadyInProgress,
            );
        }

        let transition = self.widget.pointer_down(occupant);
        if !transition
            .as_ref()
            .is_some_and(|t| matches!(t.effect, DragEffect::Lifted { .. }))
        {
            return PointerDispatch::ignored(context, PointerIgnoredReason::WidgetRejected);
        }
        self.active = Some(ActivePointer {
            pointer_id,
            occupant,
            button,
            capture_state: CaptureState::Requested,
        });
        self.forwarded(
            context,
            transition,
            Some(CaptureCommand::Acquire { pointer_id }),
        )
    }

    /// Mark browser pointer capture as acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> PointerDispatch<A::Position> {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::CaptureAcquired,
            pointer_id: Some(pointer_id),
            occupant: None,
            position: None,
        };
        let Some(mut active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        active.capture_state = CaptureState::Acquired;
        self.active = Some(active);
        PointerDispatch::capture_state_updated(pointer_id, active.occupant)
    }

    /// Handle pointer-move during an active drag.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Point) -> PointerDispatch<A::Position> {
        let mut context = DispatchContext {
            phase: PointerLifecyclePhase::PointerMove,
            pointer_id: Some(pointer_id),
            occupant: None,
            position: Some(position),
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        context.occupant = Some(active.occupant);
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        let transition = self.widget.pointer_move(position);
        self.forward_or_reject(context, transition, None)
    }

    /// Handle pointer-up and release capture for the active pointer.
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    ) -> PointerDispatch<A::Position> {
        let mut context = DispatchContext {
            phase: PointerLifecyclePhase::PointerUp,
            pointer_id: Some(pointer_id),
            occupant: None,
            position: Some(position),
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        context.occupant = Some(active.occupant);
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        if active.button != button {
            return PointerDispatch::ignored(context, PointerIgnoredReason::ButtonMismatch);
        }
        self.active = None;
        let transition = self.widget.pointer_up(position);
        self.forward_or_reject(context, transition, release_command(active))
    }

    /// Handle browser pointer-cancel events.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> PointerDispatch<A::Position> {
        self.cancel_active(
            PointerLifecyclePhase::PointerCancel,
            pointer_id,
            CancelReason::PointerCancel,
            true,
        )
    }

    /// Handle pointer-leave. Once capture is acquired, leave is expected and
    /// ignored.
    pub fn pointer_leave(&mut self, pointer_id: u32) -> PointerDispatch<A::Position> {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::PointerLeave,
            pointer_id: Some(pointer_id),
            occupant: self.active.map(|active| active.occupant),
            position: None,
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        if matches!(active.capture_state, CaptureState::Requested)
            && self.config.cancel_on_leave_without_capture
        {
            self.cancel_active(
                PointerLifecyclePhase::PointerLeave,
                Some(pointer_id),
                CancelReason::PointerLeave,
                true,
            )
        } else {
            PointerDispatch::ignored(context, PointerIgnoredReason::LeaveWhileCaptured)
        }
    }

    pub fn blur(&mut self) -> PointerDispatch<A::Position> {
        self.cancel_active(PointerLifecyclePhase::Blur, None, CancelReason::Blur, true)
    }

    pub fn visibility_hidden(&mut self) -> PointerDispatch<A::Position> {
        self.cancel_active(
            PointerLifecyclePhase::VisibilityHidden,
            None,
            CancelReason::Blur,
            true,
        )
    }

    /// Handle `lostpointercapture`; the browser already released capture.
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> PointerDispatch<A::Position> {
        self.cancel_active(
            PointerLifecyclePhase::LostPointerCapture,
            Some(pointer_id),
            CancelReason::PointerCancel,
            false,
        )
    }

    pub fn escape(&mut self) -> PointerDispatch<A::Position> {
        self.cancel_active(
            PointerLifecyclePhase::Escape,
            None,
            CancelReason::EscapeKey,
            true,
        )
    }

    /// Submit the widget, then drop any active pointer. Returns the capture
    /// release the host still owes, if any. A refused submit keeps the
    /// pointer tracked.
    pub fn submit(&mut self, sink: &mut impl HostSink) -> Result<Option<CaptureCommand>, SubmitError> {
        self.widget.submit(sink)?;
        Ok(self.active.take().and_then(release_command))
    }

    fn cancel_active(
        &mut self,
        phase: PointerLifecyclePhase,
        pointer_id: Option<u32>,
        reason: CancelReason,
        release_capture: bool,
    ) -> PointerDispatch<A::Position> {
        let mut context = DispatchContext {
            phase,
            pointer_id,
            occupant: None,
            position: None,
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        context.occupant = Some(active.occupant);
        if pointer_id.is_some_and(|id| id != active.pointer_id) {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        context.pointer_id = Some(active.pointer_id);
        self.active = None;
        let command = if release_capture {
            release_command(active)
        } else {
            None
        };
        let transition = self.widget.cancel(reason);
        self.forward_or_reject(context, transition, command)
    }

    fn forward_or_reject(
        &mut self,
        context: DispatchContext,
        transition: Option<DragTransition<A::Position>>,
        capture_command: Option<CaptureCommand>,
    ) -> PointerDispatch<A::Position> {
        if transition.is_none() {
            let mut dispatch =
                PointerDispatch::ignored(context, PointerIgnoredReason::WidgetRejected);
            dispatch.capture_command = capture_command;
            dispatch.log.capture_command = capture_command;
            return dispatch;
        }
        self.forwarded(context, transition, capture_command)
    }

    fn forwarded(
        &mut self,
        context: DispatchContext,
        transition: Option<DragTransition<A::Position>>,
        capture_command: Option<CaptureCommand>,
    ) -> PointerDispatch<A::Position> {
        let sequence = self.next_sequence();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "pointer.dispatch",
            phase = ?context.phase,
            sequence,
            pointer_id = ?context.pointer_id,
            capture = ?capture_command
        );
        PointerDispatch {
            transition,
            capture_command,
            log: PointerLogEntry {
                phase: context.phase,
                sequence: Some(sequence),
                pointer_id: context.pointer_id,
                occupant: context.occupant,
                position: context.position,
                capture_command,
                outcome: PointerLogOutcome::Forwarded,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

fn release_command(active: ActivePointer) -> Option<CaptureCommand> {
    active
        .capture_state
        .is_acquired()
        .then_some(CaptureCommand::Release {
            pointer_id: active.pointer_id,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::{DragPhase, LayoutKey, LayoutSnapshot, Rect, Zone};
    use formkit_widgets::{RecordingSink, SortableList, WidgetConfig};
    use pretty_assertions::assert_eq;

    fn id(raw: u32) -> OccupantId {
        OccupantId::new(raw)
    }

    fn pos(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn adapter() -> PointerCaptureAdapter<formkit_core::OrderedList> {
        let config = WidgetConfig::new(["X", "Y", "Z"], "sorted").expect("valid config");
        let mut widget = SortableList::new(&config);
        let mut layout = LayoutSnapshot::new().with(
            LayoutKey::Zone { zone: Zone::Single },
            Rect::new(0, 0, 270, 30),
        );
        for i in 0..3 {
            layout.insert(LayoutKey::Occupant { id: id(i) }, Rect::new(90 * i as i32, 0, 80, 30));
        }
        widget.set_layout(layout);
        PointerCaptureAdapter::new(widget, PointerCaptureConfig::default())
    }

    #[test]
    fn pointer_down_lifts_and_requests_capture() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(id(0), 11, PointerButton::Primary, pos(5, 8));
        assert_eq!(
            dispatch.capture_command,
            Some(CaptureCommand::Acquire { pointer_id: 11 })
        );
        assert_eq!(adapter.active_pointer_id(), Some(11));
        assert!(adapter.widget().is_dragging());
        assert_eq!(dispatch.log.sequence, Some(1));
        assert!(matches!(
            dispatch.transition.expect("transition should exist").effect,
            DragEffect::Lifted { .. }
        ));
    }

    #[test]
    fn non_activation_button_is_ignored() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(id(0), 3, PointerButton::Secondary, pos(1, 1));
        assert_eq!(dispatch.transition, None);
        assert_eq!(dispatch.capture_command, None);
        assert_eq!(adapter.active_pointer_id(), None);
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::ButtonNotAllowed)
        );
    }

    #[test]
    fn zero_pointer_id_is_invalid() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(id(0), 0, PointerButton::Primary, pos(1, 1));
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::InvalidPointerId)
        );
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 1, PointerButton::Primary, pos(1, 1));
        let session = adapter.widget().machine().session().copied();
        let dispatch = adapter.pointer_down(id(1), 2, PointerButton::Primary, pos(100, 1));
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::ActivePointerAlreadyInProgress)
        );
        assert_eq!(adapter.widget().machine().session().copied(), session);
    }

    #[test]
    fn unknown_occupant_is_widget_rejected() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(id(9), 1, PointerButton::Primary, pos(1, 1));
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::WidgetRejected)
        );
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn pointer_move_mismatch_is_ignored_without_state_mutation() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 9, PointerButton::Primary, pos(10, 10));
        let before = adapter.widget().machine().session().copied();
        let dispatch = adapter.pointer_move(77, pos(240, 14));
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::PointerMismatch)
        );
        assert_eq!(adapter.widget().machine().session().copied(), before);
        assert_eq!(adapter.active_pointer_id(), Some(9));
    }

    #[test]
    fn pointer_up_commits_and_releases_capture() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 9, PointerButton::Primary, pos(10, 10));
        let ack = adapter.capture_acquired(9);
        assert_eq!(ack.log.outcome, PointerLogOutcome::CaptureStateUpdated);
        adapter.pointer_move(9, pos(240, 10));
        let dispatch = adapter.pointer_up(9, PointerButton::Primary, pos(240, 10));
        assert_eq!(
            dispatch.capture_command,
            Some(CaptureCommand::Release { pointer_id: 9 })
        );
        let transition = dispatch.transition.expect("transition expected");
        assert_eq!(transition.via, Some(DragPhase::Committing));
        assert_eq!(adapter.active_pointer_id(), None);
        assert_eq!(adapter.widget().snapshot(), vec!["Y", "Z", "X"]);
    }

    #[test]
    fn pointer_up_with_wrong_button_is_ignored() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 4, PointerButton::Primary, pos(2, 2));
        let dispatch = adapter.pointer_up(4, PointerButton::Secondary, pos(2, 2));
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::ButtonMismatch)
        );
        assert_eq!(adapter.active_pointer_id(), Some(4));
    }

    #[test]
    fn leave_without_capture_cancels() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 5, PointerButton::Primary, pos(2, 2));
        adapter.pointer_move(5, pos(240, 10));
        let dispatch = adapter.pointer_leave(5);
        assert!(matches!(
            dispatch.transition.expect("cancel transition").effect,
            DragEffect::Cancelled {
                reason: CancelReason::PointerLeave,
                ..
            }
        ));
        assert_eq!(dispatch.capture_command, None);
        assert_eq!(adapter.widget().snapshot(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn leave_while_captured_is_ignored() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 5, PointerButton::Primary, pos(2, 2));
        adapter.capture_acquired(5);
        let dispatch = adapter.pointer_leave(5);
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::LeaveWhileCaptured)
        );
        assert!(adapter.widget().is_dragging());
    }

    #[test]
    fn blur_cancels_and_releases_capture() {
        let mut adapter = adapter();
        adapter.pointer_down(id(1), 6, PointerButton::Primary, pos(100, 2));
        adapter.capture_acquired(6);
        let dispatch = adapter.blur();
        assert_eq!(
            dispatch.capture_command,
            Some(CaptureCommand::Release { pointer_id: 6 })
        );
        assert!(!adapter.widget().is_dragging());
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn lost_capture_cancels_without_release_command() {
        let mut adapter = adapter();
        adapter.pointer_down(id(1), 6, PointerButton::Primary, pos(100, 2));
        adapter.capture_acquired(6);
        let dispatch = adapter.lost_pointer_capture(6);
        assert_eq!(dispatch.capture_command, None);
        assert!(dispatch.is_forwarded());
        assert!(!adapter.widget().is_dragging());
    }

    #[test]
    fn idle_interruptions_are_ignored() {
        let mut adapter = adapter();
        for dispatch in [
            adapter.blur(),
            adapter.visibility_hidden(),
            adapter.escape(),
            adapter.pointer_cancel(None),
        ] {
            assert_eq!(
                dispatch.log.outcome,
                PointerLogOutcome::Ignored(PointerIgnoredReason::NoActivePointer)
            );
        }
    }

    #[test]
    fn submit_mid_drag_returns_owed_release() {
        let mut adapter = adapter();
        adapter.pointer_down(id(0), 7, PointerButton::Primary, pos(2, 2));
        adapter.capture_acquired(7);
        adapter.pointer_move(7, pos(240, 10));
        let mut sink = RecordingSink::new();
        assert_eq!(
            adapter.submit(&mut sink),
            Ok(Some(CaptureCommand::Release { pointer_id: 7 }))
        );
        assert_eq!(adapter.active_pointer_id(), None);
        assert_eq!(sink.messages().len(), 1);

        let dispatch = adapter.pointer_down(id(0), 8, PointerButton::Primary, pos(2, 2));
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::WidgetRejected)
        );
    }

    #[test]
    fn dispatch_routes_layout_without_output() {
        let mut adapter = adapter();
        assert_eq!(adapter.dispatch(HostEvent::Layout(LayoutSnapshot::new())), None);
        assert!(adapter.widget().layout().is_empty());
    }
}
