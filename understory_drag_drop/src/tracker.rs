// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle state machine.
//!
//! [`DragTracker`] owns the single current [`Drag`] and every [`Release`]
//! still animating back. It knows nothing about handlers or the registry;
//! the coordinator resolves geometry and feeds it in.
//!
//! ```text
//! Idle ──start_drag──▶ Dragging ◀──update_receiver / reset_receiver──▶ DraggingOverReceiver
//!                          │                                                   │
//!                          └───────────────────reset_drag──────────────────────┘
//!                                                │
//!                             Idle ◀── finish_release ── Releasing
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect, Vec2};
use understory_drag_registry::geometry::{dimensions, ratio_of, relative_position};
use understory_drag_registry::{ScrollPosition, ViewId};

use crate::event::SnapTarget;
use crate::snap::{ReleaseId, SnapRequest};

/// Coarse lifecycle phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Nothing is dragged or releasing.
    Idle,
    /// A view is dragged over no receiver.
    Dragging,
    /// A view is dragged over a receiver.
    DraggingOverReceiver,
    /// No drag, but at least one view is snapping back.
    Releasing,
}

/// The receiver of the current drag.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiverTracking {
    /// The receiving view.
    pub id: ViewId,
    /// Drag point relative to the receiver's absolute origin.
    pub offset: Vec2,
    /// [`offset`](Self::offset) as a fraction of the receiver's size.
    pub offset_ratio: Vec2,
}

impl ReceiverTracking {
    fn at(id: ViewId, position: Point, bounds: Rect) -> Self {
        let relative = relative_position(position, bounds);
        Self {
            id,
            offset: relative.offset,
            offset_ratio: relative.ratio,
        }
    }
}

/// Values captured when a drag starts.
#[derive(Clone, Debug, PartialEq)]
pub struct DragStart {
    /// The dragged view.
    pub dragged: ViewId,
    /// Touch point in root coordinates.
    pub absolute_start: Point,
    /// Touch point relative to the dragged view's parent.
    pub parent_start: Point,
    /// Touch point within the dragged view.
    pub grab_offset: Vec2,
    /// [`grab_offset`](Self::grab_offset) as a fraction of the view's size.
    pub grab_offset_ratio: Vec2,
}

/// Which translation axes are pinned to zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisLocks {
    /// No horizontal movement.
    pub x: bool,
    /// No vertical movement.
    pub y: bool,
}

/// The drag in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Drag {
    /// The dragged view.
    pub dragged: ViewId,
    /// Touch point in root coordinates at start. Never recomputed.
    pub absolute_start: Point,
    /// Touch point relative to the dragged view's parent at start. Never recomputed.
    pub parent_start: Point,
    /// Current drag point in root coordinates.
    pub absolute_position: Point,
    /// Movement since start, zero on locked axes.
    pub translation: Vec2,
    /// [`translation`](Self::translation) as a fraction of the dragged view's size.
    pub translation_ratio: Vec2,
    /// Drag point relative to the dragged view's current absolute origin.
    pub offset: Vec2,
    /// Touch point within the dragged view at start.
    pub grab_offset: Vec2,
    /// [`grab_offset`](Self::grab_offset) as a fraction of the view's size.
    pub grab_offset_ratio: Vec2,
    /// Origin of the floating hover copy.
    pub hover_position: Point,
    /// Current receiver, if any.
    pub receiver: Option<ReceiverTracking>,
    /// Monitors under the drag point as of the last position update.
    pub monitors: Vec<ViewId>,
}

/// A scroll container and its offset when a release began.
#[derive(Clone, Debug)]
pub struct ScrollAnchor {
    /// The container's live scroll handle.
    pub handle: ScrollPosition,
    /// Its offset at release time.
    pub baseline: Vec2,
}

impl ScrollAnchor {
    /// Anchor `handle` at its current offset.
    pub fn new(handle: ScrollPosition) -> Self {
        let baseline = handle.get();
        Self { handle, baseline }
    }

    /// How far the container has scrolled since it was anchored.
    pub fn delta(&self) -> Vec2 {
        self.handle.get() - self.baseline
    }
}

/// A released view whose hover copy is animating back.
#[derive(Clone, Debug)]
pub struct Release {
    /// Token shared with the animator.
    pub token: ReleaseId,
    /// The released view.
    pub view: ViewId,
    /// Receiver at release time.
    pub receiver: Option<ViewId>,
    /// Current origin of the hover copy.
    pub hover_position: Point,
    /// Snap destination, captured once.
    pub target: Point,
    /// Scroll container of the released view's parent.
    pub parent_scroll: Option<ScrollAnchor>,
    /// Scroll container of the receiver's parent. Only recorded when the
    /// view was released over a receiver to an explicit target.
    pub receiver_scroll: Option<ScrollAnchor>,
}

impl Release {
    /// How far the container holding [`target`](Self::target) has scrolled
    /// since release.
    ///
    /// That is the receiver's parent for an explicit target dropped into a
    /// receiver, and the released view's parent otherwise.
    pub fn scroll_delta(&self) -> Vec2 {
        self.receiver_scroll
            .as_ref()
            .or(self.parent_scroll.as_ref())
            .map_or(Vec2::ZERO, ScrollAnchor::delta)
    }
}

/// What [`DragTracker::reset_drag`] needs to know about the world.
#[derive(Clone, Debug, Default)]
pub struct ResetContext {
    /// False if the dragged view has been unregistered.
    pub dragged_exists: bool,
    /// The dragged view's current absolute origin, if resolvable.
    pub resting_position: Option<Point>,
    /// True if snap-back should animate and an animator is available.
    pub animate: bool,
    /// Snap-back delay.
    pub delay: Duration,
    /// Snap-back duration.
    pub duration: Duration,
    /// Scroll handle of the dragged view's parent.
    pub parent_scroll: Option<ScrollPosition>,
    /// Scroll handle of the current receiver's parent.
    pub receiver_scroll: Option<ScrollPosition>,
}

/// Result of [`DragTracker::reset_drag`].
#[derive(Clone, Debug)]
pub enum ResetOutcome {
    /// There was no drag.
    NoDrag,
    /// The drag was torn down and its hover copy hidden immediately.
    Immediate(Drag),
    /// A release was created; the request should go to an animator.
    Released(Drag, SnapRequest),
}

/// Owner of the current drag and pending releases.
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    drag: Option<Drag>,
    releases: Vec<Release>,
    next_release: u64,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current drag.
    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Returns true if `id` is the dragged view.
    pub fn is_dragging(&self, id: &str) -> bool {
        self.drag.as_ref().is_some_and(|d| d.dragged.as_str() == id)
    }

    /// The current receiver.
    pub fn receiver(&self) -> Option<&ReceiverTracking> {
        self.drag.as_ref()?.receiver.as_ref()
    }

    /// Monitors as of the last position update.
    pub fn monitors(&self) -> &[ViewId] {
        match &self.drag {
            Some(drag) => &drag.monitors,
            None => &[],
        }
    }

    /// Pending releases, oldest first.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Look up a pending release.
    pub fn release(&self, token: ReleaseId) -> Option<&Release> {
        self.releases.iter().find(|r| r.token == token)
    }

    /// The pending release of `view`, if any.
    pub fn release_for(&self, view: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.view.as_str() == view)
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        match &self.drag {
            Some(d) if d.receiver.is_some() => DragPhase::DraggingOverReceiver,
            Some(_) => DragPhase::Dragging,
            None if !self.releases.is_empty() => DragPhase::Releasing,
            None => DragPhase::Idle,
        }
    }

    /// Start a drag. Returns false, leaving the current drag untouched, if
    /// one is already active.
    ///
    /// A pending release of the same view is discarded; the new drag owns
    /// the hover copy from here on.
    pub fn start_drag(&mut self, start: DragStart) -> bool {
        if let Some(current) = &self.drag {
            tracing::warn!(
                view = %start.dragged,
                current = %current.dragged,
                "drag start while another drag is active"
            );
            return false;
        }
        self.releases.retain(|r| r.view != start.dragged);
        tracing::debug!(view = %start.dragged, "drag started");
        self.drag = Some(Drag {
            hover_position: start.absolute_start - start.grab_offset,
            absolute_position: start.absolute_start,
            translation: Vec2::ZERO,
            translation_ratio: Vec2::ZERO,
            offset: start.grab_offset,
            dragged: start.dragged,
            absolute_start: start.absolute_start,
            parent_start: start.parent_start,
            grab_offset: start.grab_offset,
            grab_offset_ratio: start.grab_offset_ratio,
            receiver: None,
            monitors: Vec::new(),
        });
        true
    }

    /// Move the drag point. Returns false if there is no drag.
    ///
    /// `dragged_bounds` is the dragged view's unclipped absolute rectangle;
    /// when it cannot be resolved, ratios and offset keep their last values.
    pub fn update_position(
        &mut self,
        position: Point,
        dragged_bounds: Option<Rect>,
        locks: AxisLocks,
    ) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let mut translation = position - drag.absolute_start;
        if locks.x {
            translation.x = 0.0;
        }
        if locks.y {
            translation.y = 0.0;
        }
        drag.absolute_position = position;
        drag.translation = translation;
        drag.hover_position = drag.absolute_start + translation - drag.grab_offset;
        if let Some(bounds) = dragged_bounds {
            drag.translation_ratio = ratio_of(translation, dimensions(bounds));
            drag.offset = position - bounds.origin();
        }
        true
    }

    /// Track `id` as the receiver, given its absolute bounds.
    ///
    /// If `id` already is the receiver only its offsets are refreshed and
    /// `None` is returned. Otherwise the previous receiver, if any, is
    /// replaced and returned as `Some(previous)`.
    pub fn update_receiver(
        &mut self,
        id: &ViewId,
        bounds: Rect,
    ) -> Option<Option<ReceiverTracking>> {
        let drag = self.drag.as_mut()?;
        let next = ReceiverTracking::at(id.clone(), drag.absolute_position, bounds);
        match &mut drag.receiver {
            Some(current) if current.id == *id => {
                *current = next;
                None
            }
            slot => Some(slot.replace(next)),
        }
    }

    /// Stop tracking the receiver and return it.
    pub fn reset_receiver(&mut self) -> Option<ReceiverTracking> {
        self.drag.as_mut()?.receiver.take()
    }

    /// Replace the monitor list and return the previous one.
    pub fn set_monitors(&mut self, monitors: Vec<ViewId>) -> Vec<ViewId> {
        match self.drag.as_mut() {
            Some(drag) => core::mem::replace(&mut drag.monitors, monitors),
            None => Vec::new(),
        }
    }

    /// Forget `id` as a monitor. Returns true if it was one.
    pub fn drop_monitor(&mut self, id: &str) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let before = drag.monitors.len();
        drag.monitors.retain(|m| m.as_str() != id);
        drag.monitors.len() != before
    }

    /// End the drag.
    ///
    /// The receiver is cleared first. With [`SnapTarget::None`], or once the
    /// dragged view is gone, the drag is torn down immediately. Otherwise the
    /// destination is the explicit target, or the view's resting position,
    /// and a [`Release`] is created when an animation can run.
    ///
    /// Without a drag this does nothing and returns [`ResetOutcome::NoDrag`].
    pub fn reset_drag(&mut self, target: SnapTarget, ctx: ResetContext) -> ResetOutcome {
        let Some(mut drag) = self.drag.take() else {
            return ResetOutcome::NoDrag;
        };
        let receiver = drag.receiver.take().map(|r| r.id);
        let destination = match target {
            SnapTarget::None => None,
            _ if !ctx.dragged_exists => None,
            SnapTarget::To(point) => Some(point),
            SnapTarget::Default => Some(
                ctx.resting_position
                    .unwrap_or(drag.absolute_start - drag.grab_offset),
            ),
        };
        let Some(to) = destination.filter(|_| ctx.animate && !ctx.duration.is_zero()) else {
            tracing::debug!(view = %drag.dragged, "drag reset without snap-back");
            return ResetOutcome::Immediate(drag);
        };

        self.next_release += 1;
        let token = ReleaseId::new(self.next_release);
        let receiver_scroll = match target {
            SnapTarget::To(_) if receiver.is_some() => ctx.receiver_scroll.map(ScrollAnchor::new),
            _ => None,
        };
        self.releases.push(Release {
            token,
            view: drag.dragged.clone(),
            receiver,
            hover_position: drag.hover_position,
            target: to,
            parent_scroll: ctx.parent_scroll.map(ScrollAnchor::new),
            receiver_scroll,
        });
        tracing::debug!(view = %drag.dragged, release = token.get(), "drag released");
        let request = SnapRequest {
            release: token,
            view: drag.dragged.clone(),
            from: drag.hover_position,
            to,
            delay: ctx.delay,
            duration: ctx.duration,
        };
        ResetOutcome::Released(drag, request)
    }

    /// Move a release's hover copy. Returns false for an unknown token.
    pub fn set_release_position(&mut self, token: ReleaseId, position: Point) -> bool {
        match self.releases.iter_mut().find(|r| r.token == token) {
            Some(release) => {
                release.hover_position = position;
                true
            }
            None => false,
        }
    }

    /// Remove and return a release.
    pub fn finish_release(&mut self, token: ReleaseId) -> Option<Release> {
        let index = self.releases.iter().position(|r| r.token == token)?;
        Some(self.releases.remove(index))
    }

    /// Remove and return every release of `view`.
    pub fn discard_releases(&mut self, view: &str) -> Vec<Release> {
        let (discarded, kept): (Vec<_>, Vec<_>) = core::mem::take(&mut self.releases)
            .into_iter()
            .partition(|r| r.view.as_str() == view);
        self.releases = kept;
        discarded
    }
}
