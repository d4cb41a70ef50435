// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging into a scrolled list.
//!
//! Rows report rectangles relative to the list; the list's scroll offset is a
//! live handle. Hit testing follows the scroll and ignores rows scrolled out
//! of the list's visible bounds.
//!
//! Run:
//! - `cargo run -p understory_drag_demos --example drag_scroll`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_drag_drop::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
use understory_drag_drop::snap::SnapQueue;
use understory_drag_drop::{DragCoordinator, Protocol, SnapTarget};
use understory_drag_registry::ScrollPosition;

fn main() {
    let queue = SnapQueue::new();
    let mut drag: DragCoordinator<usize> =
        DragCoordinator::new().with_animator(Rc::new(queue.clone()));
    let dropped: Rc<RefCell<Option<usize>>> = Rc::default();

    // A list at x 300..500 showing y 0..200, with ten 50 px rows.
    let scroll = ScrollPosition::new();
    drag.register("list", None, Some(scroll.clone()));
    drag.update_measurements("list", Some(Rect::new(300.0, 0.0, 500.0, 200.0)));
    for i in 0..10 {
        let id = format!("row{i}");
        let y0 = i as f64 * 50.0;
        drag.register(id.as_str(), Some("list".into()), None);
        drag.update_measurements(&id, Some(Rect::new(0.0, y0, 200.0, y0 + 50.0)));
        let d = dropped.clone();
        drag.update_protocol(
            &id,
            Protocol::new()
                .with_receiver_payload(i)
                .on_receive_drag_drop(move |_, e| {
                    *d.borrow_mut() = e.receiver.as_ref().and_then(|r| r.payload);
                    Some(SnapTarget::None)
                }),
        );
    }

    drag.register("chip", None, None);
    drag.update_measurements("chip", Some(Rect::new(0.0, 0.0, 40.0, 40.0)));
    drag.update_protocol("chip", Protocol::new().with_drag_payload(99));

    drag.handle_state_change(
        "chip",
        GestureStateEvent {
            state: GestureState::Active,
            position: Point::new(20.0, 20.0),
            parent_position: Point::new(20.0, 20.0),
        },
    );
    drag.handle_position("chip", GesturePositionEvent { parent_position: Point::new(400.0, 120.0) });
    let over = drag.tracker().receiver().map(|r| r.id.to_string());
    println!("before scrolling: over {over:?}");
    assert_eq!(over.as_deref(), Some("row2"));

    // Scroll the list down by 230 px; row 7 now sits under the same point.
    scroll.set(Vec2::new(0.0, 230.0));
    drag.handle_position("chip", GesturePositionEvent { parent_position: Point::new(400.0, 121.0) });
    let over = drag.tracker().receiver().map(|r| r.id.to_string());
    println!("after scrolling: over {over:?}");
    assert_eq!(over.as_deref(), Some("row7"));

    // Row 0 is scrolled out of view; its clipped bounds never match.
    assert_eq!(
        drag.registry().resolve_absolute("row0", true),
        Some(understory_drag_registry::geometry::CLIPPED_OUT)
    );

    drag.handle_state_change(
        "chip",
        GestureStateEvent {
            state: GestureState::Ended,
            position: Point::new(20.0, 20.0),
            parent_position: Point::new(400.0, 121.0),
        },
    );
    println!("dropped on row {:?}", dropped.borrow());
    assert_eq!(*dropped.borrow(), Some(7));
    assert!(queue.is_empty(), "the row asked for no snap-back");
}
