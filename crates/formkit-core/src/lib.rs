#![forbid(unsafe_code)]

//! Core: the list-reordering engine behind the ranking widgets.
//!
//! # Role in formkit
//! `formkit-core` owns the authoritative item order and everything that may
//! change it. It has no rendering technology and performs no I/O: the host
//! reports pointer coordinates and the boxes it last rendered, and reads back
//! a projection to draw.
//!
//! # Primary responsibilities
//! - **collection**: [`OrderedList`] (single zone) and [`SlotBoard`] (pool plus
//!   ranked slots) behind the [`Arrangement`] trait.
//! - **spatial**: nearest-candidate hit testing over host-reported boxes.
//! - **session**: the [`DragMachine`] gesture state machine.
//! - **projection**: display entries derived from collection plus session.
//! - **submit**: the one-shot [`SubmitGate`].
//!
//! # How it fits in the system
//! `formkit-widgets` wraps a `DragMachine` per ranking widget and packages
//! snapshots into outbound messages. `formkit-web` adapts raw host pointer
//! streams (capture, coalescing) onto the widget pointer surface.

pub mod collection;
pub mod geometry;
pub mod layout;
pub mod projection;
pub mod session;
pub mod spatial;
pub mod submit;

pub use collection::{
    Arrangement, BoardPosition, CollectionError, ItemLabels, OccupantId, OrderedList, SlotBoard,
};
pub use geometry::{Axis, Point, Rect, Size};
pub use layout::{LayoutEntry, LayoutKey, LayoutSnapshot, Zone};
pub use projection::{BoardProjection, DisplayEntry, ListProjection, SlotView, project_board, project_list};
pub use session::{
    CancelReason, DragConfig, DragEffect, DragMachine, DragPhase, DragSession, DragTransition,
    InvariantPolicy, NoopReason,
};
pub use spatial::{Candidate, InsertionPoint, NearestMode, SpatialIndex};
pub use submit::{SubmitError, SubmitGate, SubmitState};
