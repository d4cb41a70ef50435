// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a card over a drop zone and back, with a monitor watching.
//!
//! A is draggable, B receives, C monitors the whole area. The drag enters B,
//! leaves it again, and ends over nothing, so A snaps back to its origin.
//!
//! Run:
//! - `cargo run -p understory_drag_demos --example drag_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_drag_drop::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
use understory_drag_drop::snap::SnapQueue;
use understory_drag_drop::{DragCoordinator, DragPhase, Protocol};

fn main() {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let queue = SnapQueue::new();
    let mut drag: DragCoordinator<&'static str> =
        DragCoordinator::new().with_animator(Rc::new(queue.clone()));

    let l = log.clone();
    let a = Protocol::new()
        .with_drag_payload("A")
        .on_drag_start(move |_, e| l.borrow_mut().push(format!("A start at {:?}", e.absolute_position)))
        .on_drag_end({
            let l = log.clone();
            move |_, e| {
                l.borrow_mut().push(format!("A end cancelled={}", e.cancelled));
                None
            }
        });
    let (enter, exit) = (log.clone(), log.clone());
    let b = Protocol::new()
        .with_receiver_payload("B")
        .on_receive_drag_enter(move |_, e| {
            enter.borrow_mut().push(format!("B enter {:?}", e.dragged.payload))
        })
        .on_receive_drag_exit(move |_, _| exit.borrow_mut().push("B exit".into()));
    let (enter, over) = (log.clone(), log.clone());
    let c = Protocol::new()
        .on_monitor_drag_enter(move |_, e| {
            enter.borrow_mut().push(format!("C enter at {:?}", e.monitor_offset))
        })
        .on_monitor_drag_over(move |_, _| over.borrow_mut().push("C over".into()));

    for (id, rect, protocol) in [
        ("A", Rect::new(0.0, 0.0, 100.0, 100.0), a),
        ("B", Rect::new(200.0, 0.0, 300.0, 100.0), b),
        ("C", Rect::new(0.0, 0.0, 400.0, 400.0), c),
    ] {
        drag.register(id, None, None);
        drag.update_measurements(id, Some(rect));
        drag.update_protocol(id, protocol);
    }

    let at = |x, y| Point::new(x, y);
    drag.handle_state_change(
        "A",
        GestureStateEvent {
            state: GestureState::Active,
            position: at(50.0, 50.0),
            parent_position: at(50.0, 50.0),
        },
    );
    drag.handle_position("A", GesturePositionEvent { parent_position: at(250.0, 50.0) });
    assert_eq!(drag.phase(), DragPhase::DraggingOverReceiver);
    drag.handle_position("A", GesturePositionEvent { parent_position: at(50.0, 50.0) });
    assert_eq!(drag.phase(), DragPhase::Dragging);
    drag.handle_state_change(
        "A",
        GestureStateEvent {
            state: GestureState::Ended,
            position: at(50.0, 50.0),
            parent_position: at(50.0, 50.0),
        },
    );

    for line in log.borrow().iter() {
        println!("{line}");
    }
    let requests = queue.drain();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].to, Point::ZERO);
    println!(
        "snap back {:?} -> {:?} after {:?} over {:?}",
        requests[0].from, requests[0].to, requests[0].delay, requests[0].duration
    );
    assert_eq!(drag.phase(), DragPhase::Releasing);
    drag.finish_release(requests[0].release, true);
    assert_eq!(drag.phase(), DragPhase::Idle);
}
