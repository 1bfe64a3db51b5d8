#![forbid(unsafe_code)]

//! Outbound host contract.
//!
//! Every widget reports back through exactly one message, serialized as:
//!
//! ```json
//! { "eventName": "rank_complete", "sortedOptions": ["B", "A"], "confirmationText": "..." }
//! ```

use serde::{Deserialize, Serialize};

pub const SORTED_CONFIRMATION: &str = "Order submitted successfully";
pub const RANKING_CONFIRMATION: &str = "Ranking submitted successfully";
pub const SELECTION_CONFIRMATION: &str = "Work description submitted successfully";
pub const RATING_CONFIRMATION: &str = "Ratings submitted successfully";

/// One rated option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub option: String,
    pub label: String,
}

/// Widget-specific response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Response {
    SortedOptions(Vec<String>),
    SelectedOptions(Vec<String>),
    Ratings(Vec<Rating>),
}

/// The single message a widget emits on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub event_name: String,
    #[serde(flatten)]
    pub response: Response,
    pub confirmation_text: String,
}

impl OutboundMessage {
    #[must_use]
    pub fn new(
        event_name: impl Into<String>,
        response: Response,
        confirmation_text: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            response,
            confirmation_text: confirmation_text.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Receiver of outbound messages (the host chat transport).
pub trait HostSink {
    fn interact(&mut self, message: OutboundMessage);
}

impl<F: FnMut(OutboundMessage)> HostSink for F {
    fn interact(&mut self, message: OutboundMessage) {
        self(message);
    }
}

/// Sink that keeps every message, for hosts that poll and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    messages: Vec<OutboundMessage>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[OutboundMessage] {
        &self.messages
    }

    /// Hand over everything received so far.
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.messages)
    }
}

impl HostSink for RecordingSink {
    fn interact(&mut self, message: OutboundMessage) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sorted_message_shape() {
        let message = OutboundMessage::new(
            "rank_done",
            Response::SortedOptions(vec!["Y".into(), "X".into()]),
            SORTED_CONFIRMATION,
        );
        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "eventName": "rank_done",
                "sortedOptions": ["Y", "X"],
                "confirmationText": "Order submitted successfully"
            })
        );
    }

    #[test]
    fn ratings_message_shape() {
        let message = OutboundMessage::new(
            "rated",
            Response::Ratings(vec![Rating {
                option: "Speed".into(),
                label: "Good".into(),
            }]),
            RATING_CONFIRMATION,
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "eventName": "rated",
                "ratings": [{"option": "Speed", "label": "Good"}],
                "confirmationText": "Ratings submitted successfully"
            })
        );
    }

    #[test]
    fn closure_sink_receives() {
        let mut seen = Vec::new();
        let mut sink = |message: OutboundMessage| seen.push(message.event_name);
        sink.interact(OutboundMessage::new(
            "e",
            Response::SelectedOptions(vec![]),
            SELECTION_CONFIRMATION,
        ));
        assert_eq!(seen, vec!["e".to_owned()]);
    }

    #[test]
    fn recording_sink_drains() {
        let mut sink = RecordingSink::new();
        sink.interact(OutboundMessage::new(
            "e",
            Response::SortedOptions(vec![]),
            SORTED_CONFIRMATION,
        ));
        assert_eq!(sink.messages().len(), 1);
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.messages().is_empty());
    }
}
