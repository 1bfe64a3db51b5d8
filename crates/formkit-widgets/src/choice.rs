#![forbid(unsafe_code)]

//! Multiple-choice widget with an optional free-text "other" entry.

use formkit_core::{SubmitError, SubmitGate};

use crate::config::WidgetConfig;
use crate::message::{HostSink, OutboundMessage, Response, SELECTION_CONFIRMATION};

/// Checkbox list. Checking the configured other option reveals a text field
/// whose trimmed contents join the selection.
#[derive(Debug, Clone)]
pub struct MultipleChoice {
    options: Vec<String>,
    checked: Vec<bool>,
    other_option: String,
    other_text: String,
    submit_event: String,
    gate: SubmitGate,
}

impl MultipleChoice {
    #[must_use]
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            options: config.options().to_vec(),
            checked: vec![false; config.options().len()],
            other_option: config.other_option().to_owned(),
            other_text: String::new(),
            submit_event: config.submit_event().to_owned(),
            gate: SubmitGate::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.gate.is_submitted()
    }

    /// Flip option `index`, returning its new state. `None` when the index
    /// is unknown or the widget has submitted.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let checked = !self.is_checked(index);
        self.set_checked(index, checked)
    }

    pub fn set_checked(&mut self, index: usize, checked: bool) -> Option<bool> {
        if self.is_submitted() {
            return None;
        }
        let slot = self.checked.get_mut(index)?;
        *slot = checked;
        Some(checked)
    }

    /// Whether the free-text field is shown.
    #[must_use]
    pub fn is_other_checked(&self) -> bool {
        self.options
            .iter()
            .zip(&self.checked)
            .any(|(option, checked)| *checked && *option == self.other_option)
    }

    /// Replace the free-text entry. Ignored after submission.
    pub fn set_other_text(&mut self, text: impl Into<String>) {
        if !self.is_submitted() {
            self.other_text = text.into();
        }
    }

    #[must_use]
    pub fn other_text(&self) -> &str {
        &self.other_text
    }

    /// Checked options in display order, then the trimmed other text.
    #[must_use]
    pub fn selection(&self) -> Vec<String> {
        let mut selection: Vec<String> = self
            .options
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(option, _)| option.clone())
            .collect();
        let other = self.other_text.trim();
        if self.is_other_checked() && !other.is_empty() {
            selection.push(other.to_owned());
        }
        selection
    }

    /// Emit the selection. Refused while nothing is selected.
    pub fn submit(&mut self, sink: &mut impl HostSink) -> Result<(), SubmitError> {
        let selection = self.gate.try_submit(self.selection(), 1)?;
        sink.interact(OutboundMessage::new(
            self.submit_event.clone(),
            Response::SelectedOptions(selection),
            SELECTION_CONFIRMATION,
        ));
        Ok(())
    }
}
