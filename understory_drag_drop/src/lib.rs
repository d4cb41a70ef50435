// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop --heading-base-level=0

//! Understory Drag Drop: a deterministic, `no_std` drag-and-drop lifecycle for UI.
//!
//! ## Overview
//!
//! Any registered view can be draggable, receptive (a drop target), and/or monitoring (an observer of drags
//! passing over it). A [`DragCoordinator`] owns the view registry, the single current drag, and the views still
//! snapping back after release. Feed it gesture events; it hit tests, tracks the drag, and calls the handlers in
//! each view's [`Protocol`] in a fixed order.
//!
//! Views are stored in an [`understory_drag_registry::ViewRegistry`], which resolves absolute bounds through
//! parent chains and live scroll offsets.
//!
//! ## Inputs
//!
//! - Layout: [`DragCoordinator::register`], [`DragCoordinator::update_measurements`], and
//!   [`DragCoordinator::unregister`] as views mount, move, and unmount.
//! - Gestures: [`DragCoordinator::handle_state_change`] (or [`DragCoordinator::handle_state_code`] for raw codes)
//!   and [`DragCoordinator::handle_position`].
//! - Animation: [`DragCoordinator::set_release_position`] and [`DragCoordinator::finish_release`], driven by the
//!   runtime behind a [`snap::SnapAnimator`].
//!
//! ## Outputs
//!
//! - Handler calls with [`DragEvent`], [`MonitorEvent`], and [`SnapEndEvent`] payloads. See [`dispatch`] for the
//!   exact order.
//! - Queries for rendering: [`DragCoordinator::view_state`], [`DragCoordinator::tracking_status`],
//!   [`DragCoordinator::hover_items`], and [`DragCoordinator::phase`].
//!
//! ## Snap-back
//!
//! When a drag ends, the end or drop handlers may return a [`SnapTarget`]. The first one to answer wins, in the
//! order dragged view, receiver, monitors. Without an answer the view snaps back to its resting position. The
//! target is captured once; [`DragCoordinator::release_scroll_delta`] reports how far the view's scroll container
//! has moved since, for renderers that want to compensate.
//!
//! ## Reentrancy
//!
//! Handlers receive `&mut DragCoordinator`, so a drop handler may unregister views or replace protocols. Every list
//! the dispatcher walks is a snapshot taken before the first handler runs, and views are looked up again by id
//! before each call.
//!
//! ## Minimal example
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
//! use understory_drag_drop::snap::SnapQueue;
//! use understory_drag_drop::{DragCoordinator, DragPhase, Protocol, SnapTarget};
//!
//! let queue = SnapQueue::new();
//! let mut drag: DragCoordinator<&str> = DragCoordinator::new().with_animator(Rc::new(queue.clone()));
//!
//! drag.register("card", None, None);
//! drag.update_measurements("card", Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
//! drag.update_protocol("card", Protocol::new().with_drag_payload("card"));
//!
//! drag.register("bin", None, None);
//! drag.update_measurements("bin", Some(Rect::new(200.0, 0.0, 300.0, 100.0)));
//! drag.update_protocol(
//!     "bin",
//!     Protocol::new().on_receive_drag_drop(|_, e| {
//!         assert_eq!(e.dragged.payload, Some("card"));
//!         Some(SnapTarget::None)
//!     }),
//! );
//!
//! let at = |x, y| Point::new(x, y);
//! drag.handle_state_change(
//!     "card",
//!     GestureStateEvent { state: GestureState::Active, position: at(50.0, 50.0), parent_position: at(50.0, 50.0) },
//! );
//! drag.handle_position("card", GesturePositionEvent { parent_position: at(250.0, 50.0) });
//! assert_eq!(drag.phase(), DragPhase::DraggingOverReceiver);
//!
//! drag.handle_state_change(
//!     "card",
//!     GestureStateEvent { state: GestureState::Ended, position: at(50.0, 50.0), parent_position: at(250.0, 50.0) },
//! );
//! // The bin asked for no snap-back.
//! assert!(queue.is_empty());
//! assert_eq!(drag.phase(), DragPhase::Idle);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod coordinator;
pub mod dispatch;
mod error;
mod event;
pub mod gesture;
pub mod monitor;
mod protocol;
pub mod snap;
mod status;
pub mod tracker;

pub use config::DragConfig;
pub use coordinator::DragCoordinator;
pub use error::DragError;
pub use event::{DragEvent, DraggedInfo, MonitorEvent, ReceiverInfo, SnapEndEvent, SnapTarget};
pub use protocol::{Handler, Protocol, SnapHandler};
pub use status::{DragStatus, ReceiveStatus, TrackingStatus, ViewState};
pub use tracker::{DragPhase, DragTracker};
