#![forbid(unsafe_code)]

//! Frame-level coalescing of host pointer moves.
//!
//! Browsers can deliver several `pointermove` events per animation frame.
//! Each one costs a nearest-candidate search and a projection, so the host
//! queues events here and drains them once per frame.
//!
//! # Design
//!
//! Latest wins for consecutive moves of the same pointer. A move is never
//! reordered across any other event, so a `pointerup` still observes every
//! move that preceded it.
//!
//! # Usage
//!
//! ```
//! use formkit_core::Point;
//! use formkit_web::{HostEvent, MoveCoalescer};
//!
//! let mut coalescer = MoveCoalescer::new();
//! coalescer.push(HostEvent::PointerMove { pointer_id: 1, position: Point::new(1, 1) });
//! coalescer.push(HostEvent::PointerMove { pointer_id: 1, position: Point::new(9, 9) });
//!
//! let frame = coalescer.drain_frame();
//! assert_eq!(frame, vec![HostEvent::PointerMove { pointer_id: 1, position: Point::new(9, 9) }]);
//! assert_eq!(coalescer.coalesced(), 1);
//! ```

use crate::event::HostEvent;

/// Per-frame queue that collapses redundant pointer moves.
#[derive(Debug, Clone, Default)]
pub struct MoveCoalescer {
    queue: Vec<HostEvent>,
    /// Moves dropped since construction.
    coalesced: u64,
}

impl MoveCoalescer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event, replacing the tail if both are moves of one pointer.
    pub fn push(&mut self, event: HostEvent) {
        if let Some(pointer_id) = event.move_pointer()
            && let Some(last) = self.queue.last_mut()
            && last.move_pointer() == Some(pointer_id)
        {
            *last = event;
            self.coalesced = self.coalesced.saturating_add(1);
            return;
        }
        self.queue.push(event);
    }

    /// Take everything queued for this frame, in arrival order.
    pub fn drain_frame(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.queue)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total moves dropped so far.
    #[must_use]
    pub const fn coalesced(&self) -> u64 {
        self.coalesced
    }

    /// Discard queued events without delivering them.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
