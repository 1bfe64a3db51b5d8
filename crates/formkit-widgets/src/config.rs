#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! Configuration arrives as the JSON payload of a host trace. Parsing fails
//! fast: a widget with a bad configuration is never constructed.
//!
//! ```json
//! {
//!   "options": ["Speed", "Price", "None", "Support"],
//!   "submitEvent": "rank_complete",
//!   "labels": ["Poor", "Fair", "Good"],
//!   "otherOption": "Other",
//!   "layout": { "mode": "axis", "axis": "vertical" }
//! }
//! ```

use std::fmt;

use formkit_core::{Axis, NearestMode};
use serde::Deserialize;

/// Option value that stands for "no option" and is dropped before use.
pub const NONE_SENTINEL: &str = "None";

/// Multiple-choice option that reveals the free-text field.
pub const DEFAULT_OTHER_OPTION: &str = "Other";

/// Rating scale used when the payload carries none.
pub const DEFAULT_SCALE: [&str; 2] = ["1", "100"];

/// Invalid widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is absent.
    MissingField { field: &'static str },
    /// `options` is empty after dropping sentinel entries.
    EmptyOptions,
    /// `submitEvent` is empty.
    EmptySubmitEvent,
    /// The rating scale needs at least two labels.
    TooFewLabels { actual: usize },
    /// The payload does not have the expected shape.
    Malformed { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field `{field}`"),
            Self::EmptyOptions => write!(f, "`options` must contain at least one option"),
            Self::EmptySubmitEvent => write!(f, "`submitEvent` must not be empty"),
            Self::TooFewLabels { actual } => {
                write!(f, "rating scale needs at least 2 labels, got {actual}")
            }
            Self::Malformed { message } => write!(f, "malformed widget payload: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    options: Option<Vec<String>>,
    submit_event: Option<String>,
    labels: Option<Vec<ScaleLabel>>,
    other_option: Option<String>,
    layout: Option<RawLayout>,
}

/// Hosts send scale labels as strings or bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScaleLabel {
    Text(String),
    Number(serde_json::Number),
}

impl ScaleLabel {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawMode {
    Center,
    Axis,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Deserialize)]
struct RawLayout {
    mode: RawMode,
    axis: Option<RawAxis>,
}

impl RawLayout {
    fn into_mode(self) -> NearestMode {
        let axis = match self.axis {
            Some(RawAxis::Vertical) => Axis::Vertical,
            Some(RawAxis::Horizontal) | None => Axis::Horizontal,
        };
        match self.mode {
            RawMode::Center => NearestMode::CenterDistance { flow: axis },
            RawMode::Axis => NearestMode::AxisMidpoint { axis },
        }
    }
}

/// Validated configuration shared by every widget family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    options: Vec<String>,
    submit_event: String,
    scale_labels: Vec<String>,
    other_option: String,
    nearest: NearestMode,
}

impl WidgetConfig {
    /// Build from an option list and event name. Sentinel options are dropped.
    pub fn new<I, S>(options: I, submit_event: impl Into<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options
            .into_iter()
            .map(Into::into)
            .filter(|option| option != NONE_SENTINEL)
            .collect();
        if options.is_empty() {
            return Err(ConfigError::EmptyOptions);
        }
        let submit_event = submit_event.into();
        if submit_event.is_empty() {
            return Err(ConfigError::EmptySubmitEvent);
        }
        Ok(Self {
            options,
            submit_event,
            scale_labels: DEFAULT_SCALE.iter().map(|label| (*label).to_owned()).collect(),
            other_option: DEFAULT_OTHER_OPTION.to_owned(),
            nearest: NearestMode::default(),
        })
    }

    /// Parse a host trace payload.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, ConfigError> {
        let raw = RawPayload::deserialize(payload)?;
        let options = raw
            .options
            .ok_or(ConfigError::MissingField { field: "options" })?;
        let submit_event = raw
            .submit_event
            .ok_or(ConfigError::MissingField {
                field: "submitEvent",
            })?;
        let mut config = Self::new(options, submit_event)?;
        if let Some(labels) = raw.labels {
            config = config.with_scale_labels(labels.into_iter().map(ScaleLabel::into_text))?;
        }
        if let Some(other) = raw.other_option {
            config = config.with_other_option(other);
        }
        if let Some(layout) = raw.layout {
            config = config.with_nearest(layout.into_mode());
        }
        tracing::debug!(
            message = "config.parsed",
            options = config.options.len(),
            submit_event = %config.submit_event,
            scale = config.scale_labels.len()
        );
        Ok(config)
    }

    /// Parse a JSON payload string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_payload(&value)
    }

    /// Replace the rating scale. At least two labels are required.
    pub fn with_scale_labels<I, S>(mut self, labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() < 2 {
            return Err(ConfigError::TooFewLabels {
                actual: labels.len(),
            });
        }
        self.scale_labels = labels;
        Ok(self)
    }

    #[must_use]
    pub fn with_other_option(mut self, other: impl Into<String>) -> Self {
        self.other_option = other.into();
        self
    }

    /// Hit-testing rule for the ranking widgets.
    #[must_use]
    pub fn with_nearest(mut self, nearest: NearestMode) -> Self {
        self.nearest = nearest;
        self
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn submit_event(&self) -> &str {
        &self.submit_event
    }

    #[must_use]
    pub fn scale_labels(&self) -> &[String] {
        &self.scale_labels
    }

    #[must_use]
    pub fn other_option(&self) -> &str {
        &self.other_option
    }

    #[must_use]
    pub const fn nearest(&self) -> NearestMode {
        self.nearest
    }
}
