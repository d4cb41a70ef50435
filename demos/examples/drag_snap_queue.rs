// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving snap-back from a host frame loop.
//!
//! The coordinator hands snap requests to a `SnapQueue`. The host drains it,
//! steps each animation at a fixed frame time, writes the hover position back,
//! and completes the release. One card uses its own queue and a shorter
//! duration; the other uses the coordinator default.
//!
//! Run:
//! - `cargo run -p understory_drag_demos --example drag_snap_queue`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};
use understory_drag_drop::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
use understory_drag_drop::snap::{SnapQueue, SnapRequest};
use understory_drag_drop::{DragConfig, DragCoordinator, DragStatus, Protocol};

const FRAME: Duration = Duration::from_millis(16);

fn throw(drag: &mut DragCoordinator<()>, id: &str, to: Point) {
    let start = Point::new(10.0, 10.0);
    drag.handle_state_change(
        id,
        GestureStateEvent {
            state: GestureState::Active,
            position: start,
            parent_position: start,
        },
    );
    drag.handle_position(id, GesturePositionEvent { parent_position: to });
    drag.handle_state_change(
        id,
        GestureStateEvent {
            state: GestureState::Ended,
            position: start,
            parent_position: to,
        },
    );
}

/// Step every request to completion. Returns the frame count per request.
fn run_frames(drag: &mut DragCoordinator<()>, requests: &[SnapRequest]) -> Vec<u32> {
    let mut frames = vec![0_u32; requests.len()];
    let mut elapsed = Duration::ZERO;
    let mut live: Vec<usize> = (0..requests.len()).collect();
    while !live.is_empty() {
        elapsed += FRAME;
        live.retain(|&i| {
            let r = &requests[i];
            frames[i] += 1;
            drag.set_release_position(r.release, r.position_at(elapsed));
            if r.is_complete_at(elapsed) {
                drag.finish_release(r.release, true);
                false
            } else {
                true
            }
        });
    }
    frames
}

fn main() {
    let shared = SnapQueue::new();
    let own = SnapQueue::new();
    let config = DragConfig::default().with_snap_delay(Duration::ZERO);
    let mut drag: DragCoordinator<()> =
        DragCoordinator::with_config(config).with_animator(Rc::new(shared.clone()));
    let finished: Rc<RefCell<Vec<&'static str>>> = Rc::default();

    let f = finished.clone();
    drag.register("slow", None, None);
    drag.update_measurements("slow", Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
    drag.update_protocol(
        "slow",
        Protocol::new()
            .draggable(true)
            .on_snap_end(move |_, e| {
                assert!(e.finished);
                f.borrow_mut().push("slow");
            }),
    );

    let f = finished.clone();
    drag.register("quick", None, None);
    drag.update_measurements("quick", Some(Rect::new(100.0, 0.0, 150.0, 50.0)));
    drag.update_protocol(
        "quick",
        Protocol::new()
            .with_snap_duration(Duration::from_millis(64))
            .with_snap_animator(Rc::new(own.clone()))
            .on_snap_end(move |_, _| f.borrow_mut().push("quick")),
    );

    throw(&mut drag, "slow", Point::new(300.0, 300.0));
    throw(&mut drag, "quick", Point::new(400.0, 200.0));

    let mut requests = shared.drain();
    requests.extend(own.drain());
    assert_eq!(requests.len(), 2);
    println!("hover copies before animating: {:?}", drag.hover_items());
    assert_eq!(
        drag.view_state("quick").map(|s| s.drag_status),
        Some(DragStatus::Released)
    );

    let frames = run_frames(&mut drag, &requests);
    println!("frames: slow {} quick {}", frames[0], frames[1]);
    assert!(frames[0] > frames[1]);
    assert_eq!(*finished.borrow(), vec!["quick", "slow"]);
    assert!(drag.hover_items().is_empty());
}
