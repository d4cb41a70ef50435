// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_registry --heading-base-level=0

//! Understory Drag Registry: a Kurbo-native registry of drag-and-drop views.
//!
//! Understory Drag Registry is the bookkeeping half of a drag-and-drop system.
//!
//! - Stores every participating view: identity, parent linkage, capability flags, and its last reported
//!   rectangle relative to its parent.
//! - Resolves absolute (root-space) bounds by composing parent chains and compensating for the live scroll
//!   offset of scrollable ancestors, optionally clipping to each ancestor's visible bounds.
//! - Hit tests an absolute point against every receptive or monitoring view.
//!
//! The drag lifecycle, callbacks, and snap-back live in `understory_drag_drop`, which builds on this crate.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything.
//! The render layer reports each view's rectangle relative to its parent with
//! [`ViewRegistry::update_measurements`] and keeps [`ScrollPosition`] handles current as containers scroll.
//! Absolute bounds are resolved on demand, so they always reflect the latest reports and scroll offsets.
//!
//! ## Failure-soft lookups
//!
//! Registration, layout, and gesture events race each other in any real UI.
//! Nothing here panics or errors on an unknown id: lookups return `None` and updates do nothing.
//! An unmeasured view anywhere on a parent chain makes the whole chain unresolvable rather than stale.
//!
//! ## API overview
//!
//! - [`ViewRegistry`]: the registry; generic over the stored protocol type.
//! - [`ViewProtocol`]: what a stored protocol must expose (its [`ViewFlags`]).
//! - [`ViewId`]: cheap-to-clone opaque string id.
//! - [`ScrollPosition`]: live scroll offset shared with the render layer.
//! - [`geometry`]: clipping, containment, and relative-position helpers.
//! - [`Hits`]: result of [`ViewRegistry::find_monitors_and_receiver`].
//!
//! ### Minimal usage
//!
//! ```
//! use understory_drag_registry::{ScrollPosition, ViewFlags, ViewRegistry};
//! use kurbo::{Point, Rect, Vec2};
//!
//! let mut registry: ViewRegistry<ViewFlags> = ViewRegistry::new();
//!
//! // A scrollable list with one drop zone inside it.
//! let scroll = ScrollPosition::new();
//! registry.register("list".into(), None, Some(scroll.clone()));
//! registry.register("zone".into(), Some("list".into()), None);
//! registry.update_protocol("zone", ViewFlags::RECEPTIVE);
//! registry.update_measurements("list", Some(Rect::new(0.0, 100.0, 300.0, 400.0)));
//! registry.update_measurements("zone", Some(Rect::new(0.0, 200.0, 300.0, 260.0)));
//!
//! assert_eq!(
//!     registry.resolve_absolute("zone", false),
//!     Some(Rect::new(0.0, 300.0, 300.0, 360.0))
//! );
//!
//! // Scroll the list; the zone moves up with it.
//! scroll.set(Vec2::new(0.0, 150.0));
//! let hits = registry.find_monitors_and_receiver(Point::new(10.0, 160.0), None);
//! assert_eq!(hits.receiver_id().map(|id| id.as_str()), Some("zone"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geometry;
mod hit;
mod registry;
mod types;

pub use hit::{HitView, Hits};
pub use registry::{AbsoluteView, View, ViewRegistry};
pub use types::{ScrollPosition, ViewFlags, ViewId, ViewProtocol};
