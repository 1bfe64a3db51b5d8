//! Benchmarks for hit testing and drag updates.
//!
//! Run with: cargo bench -p formkit-core

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use formkit_core::{
    Axis, Candidate, DragConfig, DragMachine, LayoutKey, LayoutSnapshot, NearestMode, OccupantId,
    OrderedList, Point, Rect, SpatialIndex,
};
use std::hint::black_box;

/// `n` chips of 80x30 wrapping at 8 per row.
fn make_candidates(n: u32) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            let (col, row) = ((i % 8) as i32, (i / 8) as i32);
            Candidate::new(
                LayoutKey::Occupant {
                    id: OccupantId::new(i),
                },
                Rect::new(col * 90, row * 40, 80, 30),
            )
        })
        .collect()
}

fn make_layout(candidates: &[Candidate]) -> LayoutSnapshot {
    candidates
        .iter()
        .fold(LayoutSnapshot::new(), |layout, c| layout.with(c.key, c.rect))
}

fn bench_insertion_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial/insertion_point");
    let modes = [
        (
            "center",
            NearestMode::CenterDistance {
                flow: Axis::Horizontal,
            },
        ),
        (
            "axis",
            NearestMode::AxisMidpoint {
                axis: Axis::Vertical,
            },
        ),
    ];

    for n in [4, 16, 64, 256] {
        let candidates = make_candidates(n);
        for (name, mode) in modes {
            let index = SpatialIndex::new(mode);
            group.bench_with_input(BenchmarkId::new(name, n), &candidates, |b, candidates| {
                b.iter(|| {
                    black_box(index.insertion_point(
                        candidates,
                        Point::new(355, 95),
                        Some(OccupantId::new(0)),
                    ))
                })
            });
        }
    }

    group.finish();
}

fn bench_drag_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/gesture");

    for n in [8, 64] {
        let layout = make_layout(&make_candidates(n));
        group.bench_with_input(BenchmarkId::new("begin_60_moves_release", n), &layout, |b, layout| {
            b.iter_batched(
                || DragMachine::new(OrderedList::new(n as usize), DragConfig::default()),
                |mut machine| {
                    machine.begin(OccupantId::new(0), layout);
                    for step in 0..60 {
                        machine.update(Point::new(step * 12, step * 3), layout);
                    }
                    black_box(machine.release())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insertion_point, bench_drag_gesture);
criterion_main!(benches);
