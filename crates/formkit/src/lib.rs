#![forbid(unsafe_code)]

//! formkit public facade crate.
//!
//! Re-exports the drag engine, the widgets, and (with the `web` feature) the
//! browser pointer surface, plus a lightweight prelude.

use std::fmt;

// --- Engine re-exports -----------------------------------------------------

pub use formkit_core::{
    Arrangement, BoardPosition, BoardProjection, CancelReason, CollectionError, DisplayEntry,
    DragConfig, DragEffect, DragMachine, DragPhase, DragSession, DragTransition, InvariantPolicy,
    ItemLabels, LayoutKey, LayoutSnapshot, ListProjection, NearestMode, OccupantId, OrderedList,
    Point, Rect, SlotBoard, SlotView, SubmitError, Zone,
};

// --- Widget re-exports -----------------------------------------------------

pub use formkit_widgets::{
    ConfigError, HostSink, MultipleChoice, OutboundMessage, RankingBoard, Rating, RatingSlider,
    RecordingSink, Response, SortableList, WidgetConfig,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use formkit_web::{
    CaptureCommand, HostEvent, PointerButton, PointerCaptureAdapter, PointerCaptureConfig,
    WidgetHost,
};
#[cfg(feature = "input-parser")]
pub use formkit_web::{InputParseError, parse_host_event};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for formkit hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Widget payload was rejected.
    Config(ConfigError),
    /// An arrangement operation failed.
    Collection(CollectionError),
    /// Submission was refused.
    Submit(SubmitError),
    /// Host event JSON could not be parsed.
    #[cfg(feature = "input-parser")]
    InputParse(InputParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Collection(err) => write!(f, "{err}"),
            Self::Submit(err) => write!(f, "{err}"),
            #[cfg(feature = "input-parser")]
            Self::InputParse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Collection(err) => Some(err),
            Self::Submit(err) => Some(err),
            #[cfg(feature = "input-parser")]
            Self::InputParse(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<CollectionError> for Error {
    fn from(err: CollectionError) -> Self {
        Self::Collection(err)
    }
}

impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

#[cfg(feature = "input-parser")]
impl From<InputParseError> for Error {
    fn from(err: InputParseError) -> Self {
        Self::InputParse(err)
    }
}

/// Standard result type for formkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CancelReason, Error, HostSink, LayoutKey, LayoutSnapshot, MultipleChoice, OccupantId,
        Point, RankingBoard, RatingSlider, Rect, Result, SortableList, WidgetConfig, Zone,
    };

    #[cfg(feature = "web")]
    pub use crate::{HostEvent, PointerCaptureConfig, WidgetHost};

    pub use crate::{core, widgets};
}

pub use formkit_core as core;
#[cfg(feature = "web")]
pub use formkit_web as web;
pub use formkit_widgets as widgets;
