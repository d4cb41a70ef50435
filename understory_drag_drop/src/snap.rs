// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap-back animation interface.
//!
//! The coordinator never tweens anything itself. When a released view should
//! animate back, it creates a release entry, then hands a [`SnapRequest`] to a
//! [`SnapAnimator`]. The animation runtime reports progress and completion
//! back through the coordinator:
//!
//! - [`DragCoordinator::set_release_position`](crate::DragCoordinator::set_release_position)
//!   on every frame.
//! - [`DragCoordinator::finish_release`](crate::DragCoordinator::finish_release)
//!   once, whether the animation finished or was interrupted.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_drag_drop::snap::{ReleaseId, SnapAnimator, SnapQueue, SnapRequest};
//!
//! let queue = SnapQueue::new();
//! let animator: &dyn SnapAnimator = &queue;
//! animator.animate(SnapRequest {
//!     release: ReleaseId::new(1),
//!     view: "card".into(),
//!     from: Point::new(40.0, 40.0),
//!     to: Point::ZERO,
//!     delay: Duration::ZERO,
//!     duration: Duration::from_millis(200),
//! });
//!
//! let pending = queue.drain();
//! assert_eq!(pending.len(), 1);
//! assert_eq!(pending[0].position_at(Duration::from_millis(100)), Point::new(20.0, 20.0));
//! ```

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use kurbo::Point;
use understory_drag_registry::ViewId;

/// Identifies one release (one snap-back animation).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseId(u64);

impl ReleaseId {
    /// Wrap a raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A snap-back animation to run.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapRequest {
    /// Release this animation belongs to.
    pub release: ReleaseId,
    /// The released view.
    pub view: ViewId,
    /// Hover position at release.
    pub from: Point,
    /// Destination in root coordinates.
    pub to: Point,
    /// Wait before moving.
    pub delay: Duration,
    /// Length of the movement.
    pub duration: Duration,
}

impl SnapRequest {
    /// Linear position `elapsed` after the request was issued, delay included.
    pub fn position_at(&self, elapsed: Duration) -> Point {
        let Some(moving) = elapsed.checked_sub(self.delay) else {
            return self.from;
        };
        if moving >= self.duration || self.duration.is_zero() {
            return self.to;
        }
        let t = moving.as_secs_f64() / self.duration.as_secs_f64();
        self.from.lerp(self.to, t)
    }

    /// Returns true once `elapsed` covers both delay and duration.
    pub fn is_complete_at(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay.saturating_add(self.duration)
    }
}

/// An animation runtime for snap-back.
///
/// Fire-and-forget: `animate` must not call back into the coordinator
/// synchronously. Report progress later through the coordinator.
pub trait SnapAnimator {
    /// Start animating `request`.
    fn animate(&self, request: SnapRequest);
}

/// A [`SnapAnimator`] that queues requests for a host loop to drive.
///
/// Clones share the same queue, so the host keeps one clone and installs
/// another in the coordinator.
#[derive(Clone, Debug, Default)]
pub struct SnapQueue {
    pending: Rc<RefCell<VecDeque<SnapRequest>>>,
}

impl SnapQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued request, oldest first.
    pub fn drain(&self) -> Vec<SnapRequest> {
        self.pending.borrow_mut().drain(..).collect()
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl SnapAnimator for SnapQueue {
    fn animate(&self, request: SnapRequest) {
        self.pending.borrow_mut().push_back(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SnapRequest {
        SnapRequest {
            release: ReleaseId::new(3),
            view: "v".into(),
            from: Point::new(100.0, 0.0),
            to: Point::new(0.0, 0.0),
            delay: Duration::from_millis(100),
            duration: Duration::from_millis(200),
        }
    }

    #[test]
    fn position_waits_for_delay() {
        let r = request();
        assert_eq!(r.position_at(Duration::from_millis(50)), Point::new(100.0, 0.0));
        assert_eq!(r.position_at(Duration::from_millis(200)), Point::new(50.0, 0.0));
        assert_eq!(r.position_at(Duration::from_millis(400)), Point::new(0.0, 0.0));
        assert!(!r.is_complete_at(Duration::from_millis(299)));
        assert!(r.is_complete_at(Duration::from_millis(300)));
    }

    #[test]
    fn queue_clones_share_requests() {
        let host = SnapQueue::new();
        let installed = host.clone();
        installed.animate(request());
        assert_eq!(host.len(), 1);
        let drained = host.drain();
        assert_eq!(drained[0].release, ReleaseId::new(3));
        assert!(installed.is_empty());
    }
}
