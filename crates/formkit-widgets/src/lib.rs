#![forbid(unsafe_code)]

//! Widgets: the chat form components a host renders.
//!
//! # Role in formkit
//! `formkit-widgets` turns a host trace payload into a widget, feeds it user
//! input, and emits exactly one [`OutboundMessage`] through a [`HostSink`]
//! when the user submits.
//!
//! # Widget families
//! - [`SortableList`]: reorder every option (single zone).
//! - [`RankingBoard`]: drag options from a pool into ranked slots.
//! - [`MultipleChoice`]: checkboxes plus a free-text "other" entry.
//! - [`RatingSlider`]: one snapping slider per option.

pub mod choice;
pub mod config;
pub mod message;
pub mod rating;
pub mod reorder;

pub use choice::MultipleChoice;
pub use config::{ConfigError, NONE_SENTINEL, WidgetConfig};
pub use message::{HostSink, OutboundMessage, Rating, RecordingSink, Response};
pub use rating::{RatingScale, RatingSlider};
pub use reorder::{RankingBoard, ReorderModel, ReorderWidget, SortableList};
