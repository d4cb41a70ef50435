// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_drag_drop::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
use understory_drag_drop::{DragCoordinator, Protocol};

/// One draggable card plus a `cols` x `rows` grid of receiving, monitoring cells.
fn board(cols: usize, rows: usize, counter: &Rc<Cell<u64>>) -> DragCoordinator<usize> {
    let mut c = DragCoordinator::new();
    c.register("card", None, None);
    c.update_measurements("card", Some(Rect::new(0.0, 0.0, 40.0, 40.0)));
    c.update_protocol("card", Protocol::new().with_drag_payload(0));
    for y in 0..rows {
        for x in 0..cols {
            let id = format!("cell{x}_{y}");
            let (x0, y0) = (x as f64 * 50.0, 50.0 + y as f64 * 50.0);
            c.register(id.as_str(), None, None);
            c.update_measurements(&id, Some(Rect::new(x0, y0, x0 + 50.0, y0 + 50.0)));
            let (enter, over) = (counter.clone(), counter.clone());
            c.update_protocol(
                &id,
                Protocol::new()
                    .with_receiver_payload(y * cols + x)
                    .on_receive_drag_enter(move |_, _| enter.set(enter.get() + 1))
                    .on_monitor_drag_over(move |_, _| over.set(over.get() + 1)),
            );
        }
    }
    c
}

fn bench_drag_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_sweep");
    for &n in &[8usize, 32] {
        let counter = Rc::new(Cell::new(0));
        let path: Vec<Point> = (0..200)
            .map(|i| {
                let t = i as f64 / 200.0;
                Point::new(20.0 + t * n as f64 * 50.0, 20.0 + t * (50.0 + n as f64 * 50.0))
            })
            .collect();
        group.bench_function(format!("grid{n}x{n}_200_moves"), |b| {
            b.iter_batched(
                || board(n, n, &counter),
                |mut drag| {
                    drag.handle_state_change(
                        "card",
                        GestureStateEvent {
                            state: GestureState::Active,
                            position: Point::new(20.0, 20.0),
                            parent_position: Point::new(20.0, 20.0),
                        },
                    );
                    for p in &path {
                        drag.handle_position("card", GesturePositionEvent { parent_position: *p });
                    }
                    drag.handle_state_change(
                        "card",
                        GestureStateEvent {
                            state: GestureState::Ended,
                            position: Point::new(20.0, 20.0),
                            parent_position: path[path.len() - 1],
                        },
                    );
                    black_box(drag.phase())
                },
                BatchSize::SmallInput,
            );
        });
        black_box(counter.get());
    }
    group.finish();
}

criterion_group!(benches, bench_drag_sweep);
criterion_main!(benches);
