#![forbid(unsafe_code)]

//! JSON parser for events posted by a JS host.
//!
//! [`parse_host_event`] accepts one JSON object per DOM event and returns the
//! matching [`HostEvent`]. Event types the widgets do not react to (other
//! keys, focus-in, wheel, ...) return `Ok(None)`.
//!
//! # Schema
//!
//! ```json
//! {"type": "pointerdown", "occupant": 2, "pointerId": 1, "button": 0, "x": 10, "y": 4}
//! {"type": "pointermove", "pointerId": 1, "x": 14, "y": 9}
//! {"type": "keydown", "key": "Escape"}
//! {"type": "layout", "entries": [
//!     {"kind": "zone", "zone": "single", "x": 0, "y": 0, "width": 300, "height": 40},
//!     {"kind": "occupant", "id": 2, "x": 0, "y": 0, "width": 80, "height": 40}
//! ]}
//! ```
//!
//! Coordinates and sizes may be fractional CSS pixels. They are rounded to
//! the nearest whole pixel; out-of-range values saturate and negative sizes
//! are rejected.

use formkit_core::{LayoutKey, LayoutSnapshot, OccupantId, Point, Rect, Zone};
use serde::Deserialize;

use crate::event::{HostEvent, PointerButton};

/// Errors from parsing host event JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown layout entry kind.
    UnknownEntryKind(String),
    /// Unknown zone name.
    UnknownZone(String),
    /// Non-finite number, or a negative size.
    InvalidNumber(&'static str),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownEntryKind(kind) => write!(f, "unknown layout entry kind: {kind}"),
            Self::UnknownZone(zone) => write!(f, "unknown zone: {zone}"),
            Self::InvalidNumber(field) => write!(f, "invalid numeric field: {field}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    occupant: Option<u32>,
    #[serde(default)]
    pointer_id: Option<u32>,
    #[serde(default)]
    button: Option<i32>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    entries: Option<Vec<RawEntry>>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    kind: String,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    zone: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Parse one JSON-encoded host event.
///
/// Returns `Err` for malformed JSON or missing required fields.
pub fn parse_host_event(json: &str) -> Result<Option<HostEvent>, InputParseError> {
    let raw: RawEvent =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    let event = match raw.kind.as_str() {
        "pointerdown" => HostEvent::PointerDown {
            occupant: OccupantId::new(
                raw.occupant
                    .ok_or(InputParseError::MissingField("occupant"))?,
            ),
            pointer_id: pointer_id(&raw)?,
            button: PointerButton::from_dom(raw.button.unwrap_or(0)),
            position: position(&raw)?,
        },
        "pointermove" => HostEvent::PointerMove {
            pointer_id: pointer_id(&raw)?,
            position: position(&raw)?,
        },
        "pointerup" => HostEvent::PointerUp {
            pointer_id: pointer_id(&raw)?,
            button: PointerButton::from_dom(raw.button.unwrap_or(0)),
            position: position(&raw)?,
        },
        "pointercancel" => HostEvent::PointerCancel {
            pointer_id: raw.pointer_id,
        },
        "pointerleave" => HostEvent::PointerLeave {
            pointer_id: pointer_id(&raw)?,
        },
        "gotpointercapture" => HostEvent::CaptureAcquired {
            pointer_id: pointer_id(&raw)?,
        },
        "lostpointercapture" => HostEvent::LostPointerCapture {
            pointer_id: pointer_id(&raw)?,
        },
        "blur" => HostEvent::Blur,
        "visibilityhidden" => HostEvent::VisibilityHidden,
        "keydown" => match raw.key.as_deref() {
            Some("Escape" | "Esc") => HostEvent::Escape,
            Some(_) => return Ok(None),
            None => return Err(InputParseError::MissingField("key")),
        },
        "layout" => HostEvent::Layout(parse_layout(
            raw.entries
                .ok_or(InputParseError::MissingField("entries"))?,
        )?),
        _ => return Ok(None),
    };
    Ok(Some(event))
}

fn pointer_id(raw: &RawEvent) -> Result<u32, InputParseError> {
    raw.pointer_id
        .ok_or(InputParseError::MissingField("pointerId"))
}

fn position(raw: &RawEvent) -> Result<Point, InputParseError> {
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    let y = raw.y.ok_or(InputParseError::MissingField("y"))?;
    Ok(Point::new(coordinate(x, "x")?, coordinate(y, "y")?))
}

// `as` saturates at the integer bounds.
#[allow(clippy::cast_possible_truncation)]
fn coordinate(value: f64, field: &'static str) -> Result<i32, InputParseError> {
    if !value.is_finite() {
        return Err(InputParseError::InvalidNumber(field));
    }
    Ok(value.round() as i32)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn extent(value: f64, field: &'static str) -> Result<u32, InputParseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(InputParseError::InvalidNumber(field));
    }
    Ok(value.round() as u32)
}

fn parse_layout(entries: Vec<RawEntry>) -> Result<LayoutSnapshot, InputParseError> {
    let mut layout = LayoutSnapshot::new();
    for entry in entries {
        let key = match entry.kind.as_str() {
            "occupant" => LayoutKey::Occupant {
                id: OccupantId::new(entry.id.ok_or(InputParseError::MissingField("id"))?),
            },
            "placeholder" => LayoutKey::Placeholder,
            "slot" => LayoutKey::Slot {
                index: entry.index.ok_or(InputParseError::MissingField("index"))?,
            },
            "zone" => LayoutKey::Zone {
                zone: parse_zone(entry.zone.as_deref())?,
            },
            other => return Err(InputParseError::UnknownEntryKind(other.to_owned())),
        };
        let rect = Rect::new(
            coordinate(entry.x, "x")?,
            coordinate(entry.y, "y")?,
            extent(entry.width, "width")?,
            extent(entry.height, "height")?,
        );
        layout.insert(key, rect);
    }
    Ok(layout)
}

fn parse_zone(zone: Option<&str>) -> Result<Zone, InputParseError> {
    match zone {
        Some("single") => Ok(Zone::Single),
        Some("source") => Ok(Zone::Source),
        Some("target") => Ok(Zone::Target),
        Some(other) => Err(InputParseError::UnknownZone(other.to_owned())),
        None => Err(InputParseError::MissingField("zone")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_down() {
        let json = r#"{"type":"pointerdown","occupant":2,"pointerId":7,"button":0,"x":10,"y":4}"#;
        assert_eq!(
            parse_host_event(json).unwrap(),
            Some(HostEvent::PointerDown {
                occupant: OccupantId::new(2),
                pointer_id: 7,
                button: PointerButton::Primary,
                position: Point::new(10, 4),
            })
        );
    }

    #[test]
    fn pointer_up_secondary_button() {
        let json = r#"{"type":"pointerup","pointerId":7,"button":2,"x":1,"y":2}"#;
        assert_eq!(
            parse_host_event(json).unwrap(),
            Some(HostEvent::PointerUp {
                pointer_id: 7,
                button: PointerButton::Secondary,
                position: Point::new(1, 2),
            })
        );
    }

    #[test]
    fn pointer_cancel_without_id() {
        assert_eq!(
            parse_host_event(r#"{"type":"pointercancel"}"#).unwrap(),
            Some(HostEvent::PointerCancel { pointer_id: None })
        );
    }

    #[test]
    fn interruption_events() {
        assert_eq!(
            parse_host_event(r#"{"type":"blur"}"#).unwrap(),
            Some(HostEvent::Blur)
        );
        assert_eq!(
            parse_host_event(r#"{"type":"visibilityhidden"}"#).unwrap(),
            Some(HostEvent::VisibilityHidden)
        );
        assert_eq!(
            parse_host_event(r#"{"type":"lostpointercapture","pointerId":3}"#).unwrap(),
            Some(HostEvent::LostPointerCapture { pointer_id: 3 })
        );
    }

    #[test]
    fn escape_key_only() {
        assert_eq!(
            parse_host_event(r#"{"type":"keydown","key":"Escape"}"#).unwrap(),
            Some(HostEvent::Escape)
        );
        assert_eq!(
            parse_host_event(r#"{"type":"keydown","key":"a"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn layout_entries() {
        let json = r#"{"type":"layout","entries":[
            {"kind":"zone","zone":"target","x":0,"y":0,"width":100,"height":50},
            {"kind":"slot","index":1,"x":0,"y":25,"width":100,"height":25},
            {"kind":"occupant","id":4,"x":5,"y":60,"width":40,"height":20},
            {"kind":"placeholder","x":0,"y":0,"width":40,"height":20}
        ]}"#;
        let Some(HostEvent::Layout(layout)) = parse_host_event(json).unwrap() else {
            panic!("expected layout event");
        };
        assert_eq!(layout.len(), 4);
        assert!(layout.has_zone(Zone::Target));
        assert_eq!(
            layout.rect_of(LayoutKey::Slot { index: 1 }),
            Some(Rect::new(0, 25, 100, 25))
        );
        assert_eq!(
            layout.occupant_rect(OccupantId::new(4)),
            Some(Rect::new(5, 60, 40, 20))
        );
    }

    #[test]
    fn fractional_pixels_round() {
        assert_eq!(
            parse_host_event(r#"{"type":"pointermove","pointerId":1,"x":120.5,"y":10.25}"#)
                .unwrap(),
            Some(HostEvent::PointerMove {
                pointer_id: 1,
                position: Point::new(121, 10),
            })
        );
        let json = r#"{"type":"layout","entries":[
            {"kind":"occupant","id":0,"x":-0.4,"y":39.6,"width":80.4,"height":29.5}
        ]}"#;
        let Some(HostEvent::Layout(layout)) = parse_host_event(json).unwrap() else {
            panic!("expected layout event");
        };
        assert_eq!(
            layout.occupant_rect(OccupantId::new(0)),
            Some(Rect::new(0, 40, 80, 30))
        );
    }

    #[test]
    fn huge_coordinates_saturate() {
        assert_eq!(
            parse_host_event(r#"{"type":"pointermove","pointerId":1,"x":1e12,"y":-1e12}"#)
                .unwrap(),
            Some(HostEvent::PointerMove {
                pointer_id: 1,
                position: Point::new(i32::MAX, i32::MIN),
            })
        );
    }

    #[test]
    fn negative_size_rejected() {
        assert_eq!(
            parse_host_event(
                r#"{"type":"layout","entries":[{"kind":"placeholder","x":0,"y":0,"width":-3.5,"height":1}]}"#
            ),
            Err(InputParseError::InvalidNumber("width"))
        );
        assert_eq!(coordinate(f64::NAN, "x"), Err(InputParseError::InvalidNumber("x")));
        assert_eq!(
            extent(f64::INFINITY, "height"),
            Err(InputParseError::InvalidNumber("height"))
        );
    }

    #[test]
    fn unknown_type_is_none() {
        assert_eq!(parse_host_event(r#"{"type":"wheel"}"#).unwrap(), None);
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            parse_host_event(r#"{"type":"pointermove","x":1,"y":1}"#),
            Err(InputParseError::MissingField("pointerId"))
        );
        assert_eq!(
            parse_host_event(r#"{"type":"pointerdown","pointerId":1,"x":1,"y":1}"#),
            Err(InputParseError::MissingField("occupant"))
        );
        assert_eq!(
            parse_host_event(r#"{"type":"layout"}"#),
            Err(InputParseError::MissingField("entries"))
        );
    }

    #[test]
    fn bad_layout_values() {
        assert_eq!(
            parse_host_event(
                r#"{"type":"layout","entries":[{"kind":"zone","zone":"side","x":0,"y":0,"width":1,"height":1}]}"#
            ),
            Err(InputParseError::UnknownZone("side".into()))
        );
        assert_eq!(
            parse_host_event(
                r#"{"type":"layout","entries":[{"kind":"ghost","x":0,"y":0,"width":1,"height":1}]}"#
            ),
            Err(InputParseError::UnknownEntryKind("ghost".into()))
        );
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            parse_host_event("{not json"),
            Err(InputParseError::Json(_))
        ));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            InputParseError::MissingField("x").to_string(),
            "missing required field: x"
        );
        assert_eq!(
            InputParseError::UnknownZone("side".into()).to_string(),
            "unknown zone: side"
        );
        assert_eq!(
            InputParseError::InvalidNumber("width").to_string(),
            "invalid numeric field: width"
        );
    }
}
