#![forbid(unsafe_code)]

//! Property-based tests for the widget layer.
//!
//! 1. A sortable list always submits a permutation of its options, whatever
//!    gestures preceded the submit.
//! 2. Rating snap returns the label position nearest to the value.
//! 3. Multiple-choice selections only contain checked options plus the
//!    trimmed free text.

use formkit_core::{LayoutKey, LayoutSnapshot, OccupantId, Point, Rect, Zone};
use formkit_widgets::{
    MultipleChoice, RatingScale, RecordingSink, Response, SortableList, WidgetConfig,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Gesture {
    Down(u32),
    Move(i32, i32),
    Up(i32, i32),
    Escape,
}

fn gesture_strategy(count: u32) -> impl Strategy<Value = Gesture> {
    prop_oneof![
        2 => (0..count).prop_map(Gesture::Down),
        4 => (-20i32..400, -20i32..60).prop_map(|(x, y)| Gesture::Move(x, y)),
        2 => (-20i32..400, -20i32..60).prop_map(|(x, y)| Gesture::Up(x, y)),
        1 => Just(Gesture::Escape),
    ]
}

fn options_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..6)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn chip_row(count: u32) -> LayoutSnapshot {
    let mut layout = LayoutSnapshot::new().with(
        LayoutKey::Zone { zone: Zone::Single },
        Rect::new(0, 0, 90 * count, 30),
    );
    for i in 0..count {
        layout.insert(
            LayoutKey::Occupant {
                id: OccupantId::new(i),
            },
            Rect::new(90 * i as i32, 0, 80, 30),
        );
    }
    layout
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

// ═══ 1. Sortable list submits a permutation ═════════════════════════════

proptest! {
    #[test]
    fn sortable_submits_permutation(
        (options, gestures) in options_strategy().prop_flat_map(|options| {
            let count = options.len() as u32;
            (Just(options), prop::collection::vec(gesture_strategy(count), 0..40))
        })
    ) {
        let config = WidgetConfig::new(options.clone(), "sorted").unwrap();
        let mut widget = SortableList::new(&config);
        widget.set_layout(chip_row(options.len() as u32));

        for gesture in &gestures {
            match gesture {
                Gesture::Down(raw) => { widget.pointer_down(OccupantId::new(*raw)); }
                Gesture::Move(x, y) => { widget.pointer_move(Point::new(*x, *y)); }
                Gesture::Up(x, y) => { widget.pointer_up(Point::new(*x, *y)); }
                Gesture::Escape => { widget.escape(); }
            }
        }

        let mut sink = RecordingSink::new();
        widget.submit(&mut sink).unwrap();
        prop_assert_eq!(sink.messages().len(), 1);
        let Response::SortedOptions(submitted) = sink.messages()[0].response.clone() else {
            panic!("sortable list must submit sortedOptions");
        };
        prop_assert_eq!(sorted(submitted), sorted(options));
    }
}

// ═══ 2. Rating snap ═════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_is_nearest_position(label_count in 2usize..12, value in 0.0f64..=100.0) {
        let labels = (0..label_count).map(|i| i.to_string()).collect();
        let scale = RatingScale::new(labels).unwrap();
        let index = scale.snap(value);
        prop_assert!(index < label_count);
        let chosen = (f64::from(scale.positions()[index]) - value).abs();
        for position in scale.positions() {
            prop_assert!(chosen <= (f64::from(*position) - value).abs());
        }
    }
}

// ═══ 3. Multiple-choice selection ═══════════════════════════════════════

proptest! {
    #[test]
    fn selection_is_checked_subset(
        toggles in prop::collection::vec(0usize..4, 0..16),
        other in "[ a-z]{0,8}",
    ) {
        let config = WidgetConfig::new(["A", "B", "C", "Other"], "work").unwrap();
        let mut choice = MultipleChoice::new(&config);
        for index in &toggles {
            choice.toggle(*index);
        }
        choice.set_other_text(other.clone());

        let mut expected: Vec<String> = (0..4)
            .filter(|i| choice.is_checked(*i))
            .map(|i| choice.options()[i].clone())
            .collect();
        if choice.is_checked(3) && !other.trim().is_empty() {
            expected.push(other.trim().to_owned());
        }
        prop_assert_eq!(choice.selection(), expected);
    }
}
