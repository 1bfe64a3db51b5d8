#![forbid(unsafe_code)]

//! Rating sliders.
//!
//! Each option gets a 0..=100 track with labels spread evenly along it.
//! Values always snap to the nearest label position.

use formkit_core::{Point, Rect, SubmitError, SubmitGate};

use crate::config::{ConfigError, WidgetConfig};
use crate::message::{HostSink, OutboundMessage, RATING_CONFIRMATION, Rating, Response};

/// Track value a fresh slider starts at.
pub const INITIAL_VALUE: f64 = 50.0;

/// Labels and their percentage positions on the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingScale {
    labels: Vec<String>,
    positions: Vec<u8>,
}

impl RatingScale {
    /// Label `i` of `n` sits at `round(i / (n - 1) * 100)`.
    pub fn new(labels: Vec<String>) -> Result<Self, ConfigError> {
        if labels.len() < 2 {
            return Err(ConfigError::TooFewLabels {
                actual: labels.len(),
            });
        }
        let last = (labels.len() - 1) as f64;
        let positions = (0..labels.len())
            .map(|i| ((i as f64 / last) * 100.0).round() as u8)
            .collect();
        Ok(Self { labels, positions })
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    /// Index of the position nearest to `value`. Ties keep the earlier label.
    #[must_use]
    pub fn snap(&self, value: f64) -> usize {
        let mut best = 0;
        let mut best_diff = f64::INFINITY;
        for (index, position) in self.positions.iter().enumerate() {
            let diff = (f64::from(*position) - value).abs();
            if diff < best_diff {
                best_diff = diff;
                best = index;
            }
        }
        best
    }

    #[must_use]
    pub fn position(&self, index: usize) -> Option<u8> {
        self.positions.get(index).copied()
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

/// Map a pointer x-coordinate on `track` to a clamped 0..=100 percentage.
#[must_use]
pub fn track_percent(point: Point, track: Rect) -> Option<f64> {
    if track.width == 0 {
        return None;
    }
    let percent = (f64::from(point.x) - f64::from(track.x)) / f64::from(track.width) * 100.0;
    Some(percent.clamp(0.0, 100.0))
}

/// One slider per option.
#[derive(Debug, Clone)]
pub struct RatingSlider {
    scale: RatingScale,
    options: Vec<String>,
    values: Vec<usize>,
    submit_event: String,
    gate: SubmitGate,
}

impl RatingSlider {
    pub fn new(config: &WidgetConfig) -> Result<Self, ConfigError> {
        let scale = RatingScale::new(config.scale_labels().to_vec())?;
        let initial = scale.snap(INITIAL_VALUE);
        Ok(Self {
            values: vec![initial; config.options().len()],
            options: config.options().to_vec(),
            scale,
            submit_event: config.submit_event().to_owned(),
            gate: SubmitGate::new(),
        })
    }

    #[must_use]
    pub fn scale(&self) -> &RatingScale {
        &self.scale
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.gate.is_submitted()
    }

    /// Snapped track position of slider `option`.
    #[must_use]
    pub fn value(&self, option: usize) -> Option<u8> {
        self.values
            .get(option)
            .and_then(|index| self.scale.position(*index))
    }

    /// Label currently displayed by slider `option`.
    #[must_use]
    pub fn display_label(&self, option: usize) -> Option<&str> {
        self.values
            .get(option)
            .and_then(|index| self.scale.label(*index))
    }

    /// Set slider `option` from a raw track value, returning the snapped
    /// label index. `None` for unknown sliders or after submission.
    pub fn set_value(&mut self, option: usize, value: f64) -> Option<usize> {
        if self.is_submitted() {
            return None;
        }
        let snapped = self.scale.snap(value.clamp(0.0, 100.0));
        let slot = self.values.get_mut(option)?;
        *slot = snapped;
        tracing::trace!(message = "rating.set", option, value, snapped);
        Some(snapped)
    }

    /// Drag the thumb of slider `option` to `point` over `track`.
    pub fn drag_thumb(&mut self, option: usize, point: Point, track: Rect) -> Option<usize> {
        let percent = track_percent(point, track)?;
        self.set_value(option, percent)
    }

    #[must_use]
    pub fn ratings(&self) -> Vec<Rating> {
        self.options
            .iter()
            .zip(&self.values)
            .map(|(option, index)| Rating {
                option: option.clone(),
                label: self.scale.label(*index).unwrap_or_default().to_owned(),
            })
            .collect()
    }

    pub fn submit(&mut self, sink: &mut impl HostSink) -> Result<(), SubmitError> {
        let ratings = self.gate.try_submit(self.ratings(), 1)?;
        sink.interact(OutboundMessage::new(
            self.submit_event.clone(),
            Response::Ratings(ratings),
            RATING_CONFIRMATION,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::RecordingSink;

    fn scale(labels: &[&str]) -> RatingScale {
        RatingScale::new(labels.iter().map(|l| (*l).to_owned()).collect()).unwrap()
    }

    #[test]
    fn positions_are_evenly_rounded() {
        assert_eq!(scale(&["a", "b"]).positions(), &[0, 100]);
        assert_eq!(scale(&["a", "b", "c", "d"]).positions(), &[0, 33, 67, 100]);
    }

    #[test]
    fn snap_picks_nearest_and_ties_keep_earlier() {
        let s = scale(&["a", "b", "c"]);
        assert_eq!(s.snap(20.0), 0);
        assert_eq!(s.snap(30.0), 1);
        assert_eq!(s.snap(25.0), 0);
        assert_eq!(s.snap(75.0), 1);
        assert_eq!(s.snap(100.0), 2);
    }

    #[test]
    fn too_few_labels() {
        assert_eq!(
            RatingScale::new(vec!["x".into()]),
            Err(ConfigError::TooFewLabels { actual: 1 })
        );
    }

    #[test]
    fn track_percent_clamps() {
        let track = Rect::new(100, 0, 200, 10);
        assert_eq!(track_percent(Point::new(200, 5), track), Some(50.0));
        assert_eq!(track_percent(Point::new(0, 5), track), Some(0.0));
        assert_eq!(track_percent(Point::new(900, 5), track), Some(100.0));
        assert_eq!(track_percent(Point::new(0, 0), Rect::new(0, 0, 0, 10)), None);
    }

    fn slider() -> RatingSlider {
        let config = WidgetConfig::new(["Speed", "Price"], "rated")
            .unwrap()
            .with_scale_labels(["Poor", "Fair", "Good"])
            .unwrap();
        RatingSlider::new(&config).unwrap()
    }

    #[test]
    fn starts_at_middle() {
        let s = slider();
        assert_eq!(s.value(0), Some(50));
        assert_eq!(s.display_label(1), Some("Fair"));
    }

    #[test]
    fn default_scale_starts_at_low_end_on_tie() {
        let config = WidgetConfig::new(["A"], "e").unwrap();
        let s = RatingSlider::new(&config).unwrap();
        // 50 is equidistant from 0 and 100.
        assert_eq!(s.display_label(0), Some("1"));
    }

    #[test]
    fn drag_thumb_snaps() {
        let mut s = slider();
        let track = Rect::new(0, 0, 100, 10);
        assert_eq!(s.drag_thumb(0, Point::new(90, 5), track), Some(2));
        assert_eq!(s.value(0), Some(100));
        assert_eq!(s.drag_thumb(5, Point::new(90, 5), track), None);
    }

    #[test]
    fn submit_reports_labels() {
        let mut s = slider();
        s.set_value(0, 95.0);
        let mut sink = RecordingSink::new();
        s.submit(&mut sink).unwrap();
        assert_eq!(
            sink.messages()[0].response,
            Response::Ratings(vec![
                Rating {
                    option: "Speed".into(),
                    label: "Good".into()
                },
                Rating {
                    option: "Price".into(),
                    label: "Fair".into()
                },
            ])
        );
        assert_eq!(s.set_value(1, 0.0), None);
        assert!(s.submit(&mut sink).is_err());
        assert_eq!(sink.messages().len(), 1);
    }
}
