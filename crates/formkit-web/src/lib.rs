#![forbid(unsafe_code)]

//! `formkit-web` drives formkit ranking widgets from a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes pointer events
//!   and layout snapshots, then drains capture commands.
//! - **Frame batching**: pointer moves are coalesced per animation frame.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. It provides the building
//! blocks a thin JS shim wraps.

pub mod coalescer;
pub mod event;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod pointer_capture;

use std::collections::VecDeque;

use formkit_core::SubmitError;
use formkit_widgets::{HostSink, ReorderModel, ReorderWidget};

pub use coalescer::MoveCoalescer;
pub use event::{HostEvent, PointerButton};
#[cfg(feature = "input-parser")]
pub use input_parser::{InputParseError, parse_host_event};
pub use pointer_capture::{
    CaptureCommand, PointerCaptureAdapter, PointerCaptureConfig, PointerDispatch,
    PointerIgnoredReason, PointerLifecyclePhase, PointerLogEntry, PointerLogOutcome,
};

/// Event queue, capture adapter, and outgoing capture commands for one widget.
#[derive(Debug, Clone)]
pub struct WidgetHost<A: ReorderModel> {
    adapter: PointerCaptureAdapter<A>,
    coalescer: MoveCoalescer,
    commands: VecDeque<CaptureCommand>,
}

impl<A: ReorderModel> WidgetHost<A> {
    #[must_use]
    pub fn new(widget: ReorderWidget<A>, config: PointerCaptureConfig) -> Self {
        Self {
            adapter: PointerCaptureAdapter::new(widget, config),
            coalescer: MoveCoalescer::new(),
            commands: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn adapter(&self) -> &PointerCaptureAdapter<A> {
        &self.adapter
    }

    #[must_use]
    pub fn widget(&self) -> &ReorderWidget<A> {
        self.adapter.widget()
    }

    /// Queue an input event for the next frame.
    pub fn push_event(&mut self, event: HostEvent) {
        self.coalescer.push(event);
    }

    /// Whether events are waiting for [`Self::process_frame`].
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.coalescer.has_pending()
    }

    /// Dispatch every queued event in order and return the dispatch log.
    pub fn process_frame(&mut self) -> Vec<PointerDispatch<A::Position>> {
        let mut log = Vec::new();
        for event in self.coalescer.drain_frame() {
            if let Some(dispatch) = self.adapter.dispatch(event) {
                if let Some(command) = dispatch.capture_command {
                    self.commands.push_back(command);
                }
                log.push(dispatch);
            }
        }
        log
    }

    /// Drain capture commands accumulated since the last call.
    pub fn drain_capture_commands(&mut self) -> Vec<CaptureCommand> {
        self.commands.drain(..).collect()
    }

    /// Submit the widget. On success queued events are dropped and an owed
    /// capture release is queued for the host. On refusal nothing changes.
    pub fn submit(&mut self, sink: &mut impl HostSink) -> Result<(), SubmitError> {
        let release = self.adapter.submit(sink)?;
        self.coalescer.clear();
        self.commands.extend(release);
        Ok(())
    }
}
