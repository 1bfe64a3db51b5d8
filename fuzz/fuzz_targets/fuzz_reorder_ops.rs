#![no_main]

use arbitrary::Arbitrary;
use formkit_core::{
    Arrangement, Axis, CancelReason, DragConfig, DragMachine, InvariantPolicy, LayoutKey,
    LayoutSnapshot, NearestMode, OccupantId, OrderedList, Point, Rect, SlotBoard, SpatialIndex,
    Zone,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Begin(u8),
    Move(i16, i16),
    Release,
    Cancel,
    Relayout(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    count: u8,
    board: bool,
    axis_midpoint: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let count = u32::from(input.count % 8) + 1;
    let mode = if input.axis_midpoint {
        NearestMode::AxisMidpoint {
            axis: Axis::Vertical,
        }
    } else {
        NearestMode::CenterDistance {
            flow: Axis::Vertical,
        }
    };
    let config = DragConfig::default()
        .with_spatial(SpatialIndex::new(mode))
        .with_invariant_policy(InvariantPolicy::Panic);

    if input.board {
        let machine = DragMachine::new(SlotBoard::new(count as usize), config);
        run(machine, count, &input.ops);
    } else {
        let machine = DragMachine::new(OrderedList::new(count as usize), config);
        run(machine, count, &input.ops);
    }
});

fn run<A: Arrangement>(mut machine: DragMachine<A>, count: u32, ops: &[Op]) {
    let mut layout = make_layout(count, 40);
    for op in ops.iter().take(256) {
        match op {
            Op::Begin(raw) => {
                machine.begin(OccupantId::new(u32::from(*raw) % (count + 1)), &layout);
            }
            Op::Move(x, y) => {
                machine.update(Point::new(i32::from(*x), i32::from(*y)), &layout);
            }
            Op::Release => {
                machine.release();
            }
            Op::Cancel => {
                machine.cancel(CancelReason::PointerCancel);
            }
            Op::Relayout(height) => layout = make_layout(count, u32::from(*height) + 1),
        }

        let expected = if machine.is_dragging() {
            count as usize - 1
        } else {
            count as usize
        };
        assert_eq!(machine.arrangement().occupant_count(), expected);
        let mut seen = machine.arrangement().occupants();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), expected, "occupant held twice");
    }

    machine.force_cancel();
    assert_eq!(machine.arrangement().occupant_count(), count as usize);
}

/// Slots stacked over the pool, `row` pixels per entry.
fn make_layout(count: u32, row: u32) -> LayoutSnapshot {
    let top = (row * count) as i32;
    let mut layout = LayoutSnapshot::new()
        .with(LayoutKey::Zone { zone: Zone::Single }, Rect::new(0, 0, 200, 2 * row * count))
        .with(LayoutKey::Zone { zone: Zone::Target }, Rect::new(0, 0, 200, row * count))
        .with(LayoutKey::Zone { zone: Zone::Source }, Rect::new(0, top, 200, row * count));
    for i in 0..count {
        let y = (row * i) as i32;
        layout.insert(LayoutKey::Slot { index: i as usize }, Rect::new(0, y, 200, row));
        layout.insert(
            LayoutKey::Occupant {
                id: OccupantId::new(i),
            },
            Rect::new(0, top + y, 200, row),
        );
    }
    layout
}
