// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinator: one owner for the registry, the drag, and releases.

use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use understory_drag_registry::{ScrollPosition, View, ViewId, ViewRegistry};

use crate::config::DragConfig;
use crate::event::{SnapEndEvent, SnapTarget};
use crate::protocol::{Handler, Protocol};
use crate::snap::{ReleaseId, SnapAnimator};
use crate::status::{DragStatus, ReceiveStatus, TrackingStatus, ViewState};
use crate::tracker::{DragPhase, DragTracker, Release, ResetContext, ResetOutcome};

/// Owns every piece of drag-and-drop state for one UI subtree.
///
/// All mutation goes through `&mut self`, so registry updates, drag updates,
/// and handler calls never interleave. Handlers get the coordinator back and
/// may mutate it; the dispatcher re-reads state by id after each call.
pub struct DragCoordinator<P> {
    pub(crate) registry: ViewRegistry<Protocol<P>>,
    pub(crate) tracker: DragTracker,
    pub(crate) config: DragConfig,
    pub(crate) animator: Option<Rc<dyn SnapAnimator>>,
}

impl<P> core::fmt::Debug for DragCoordinator<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("registry", &self.registry)
            .field("tracker", &self.tracker)
            .field("config", &self.config)
            .field("animator", &self.animator.is_some())
            .finish_non_exhaustive()
    }
}

impl<P> Default for DragCoordinator<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DragCoordinator<P> {
    /// Create a coordinator with default configuration and no animator.
    ///
    /// Without an animator, released views snap back immediately unless
    /// their protocol supplies one.
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    /// Create a coordinator with the given configuration.
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            registry: ViewRegistry::new(),
            tracker: DragTracker::new(),
            config,
            animator: None,
        }
    }

    /// Use `animator` for snap-back of views without their own.
    pub fn with_animator(mut self, animator: Rc<dyn SnapAnimator>) -> Self {
        self.animator = Some(animator);
        self
    }

    /// The view registry.
    pub fn registry(&self) -> &ViewRegistry<Protocol<P>> {
        &self.registry
    }

    /// The drag state machine.
    pub fn tracker(&self) -> &DragTracker {
        &self.tracker
    }

    /// Current configuration.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Register a view, or update the parent and scroll linkage of a known one.
    pub fn register(
        &mut self,
        id: impl Into<ViewId>,
        parent: Option<ViewId>,
        scroll: Option<ScrollPosition>,
    ) {
        self.registry.register(id.into(), parent, scroll);
    }

    /// Replace a view's protocol. Returns false if `id` is unknown.
    pub fn update_protocol(&mut self, id: &str, protocol: Protocol<P>) -> bool {
        self.registry.update_protocol(id, protocol)
    }

    /// Replace a view's relative measurements. Returns false if `id` is unknown.
    ///
    /// `None` marks the view as off-screen or unmeasurable.
    pub fn update_measurements(&mut self, id: &str, measurements: Option<Rect>) -> bool {
        self.registry.update_measurements(id, measurements)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DragPhase {
        self.tracker.phase()
    }

    /// Whether anything is dragged or received.
    pub fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus {
            dragging: self.tracker.drag().is_some(),
            receiving: self.tracker.receiver().is_some(),
        }
    }

    /// Every hover copy to render: the dragged view first, then releases.
    pub fn hover_items(&self) -> Vec<(ViewId, Point)> {
        self.tracker
            .drag()
            .map(|d| (d.dragged.clone(), d.hover_position))
            .into_iter()
            .chain(
                self.tracker
                    .releases()
                    .iter()
                    .map(|r| (r.view.clone(), r.hover_position)),
            )
            .collect()
    }

    /// End the current drag, snapping back to `target`.
    ///
    /// Does nothing without a drag. Delay and duration come from the dragged
    /// view's protocol, falling back to [`DragConfig`]. The animator is the
    /// protocol's own, falling back to the coordinator's.
    pub fn reset_drag(&mut self, target: SnapTarget) {
        let Some(drag) = self.tracker.drag() else {
            tracing::trace!("reset without an active drag");
            return;
        };
        let id = drag.dragged.clone();
        let view = self.registry.view(id.as_str());
        let protocol = view.map(View::protocol);
        let animator = protocol
            .and_then(|p| p.snap_animator.clone())
            .or_else(|| self.animator.clone());
        let ctx = ResetContext {
            dragged_exists: view.is_some(),
            resting_position: self
                .registry
                .resolve_absolute(id.as_str(), false)
                .map(|r| r.origin()),
            animate: animator.is_some() && protocol.is_some_and(|p| p.animate_snap),
            delay: protocol
                .and_then(|p| p.snap_delay)
                .unwrap_or(self.config.snap_delay),
            duration: protocol
                .and_then(|p| p.snap_duration)
                .unwrap_or(self.config.snap_duration),
            parent_scroll: self.parent_scroll(id.as_str()),
            receiver_scroll: self
                .tracker
                .receiver()
                .and_then(|r| self.parent_scroll(r.id.as_str())),
        };
        if let ResetOutcome::Released(_, request) = self.tracker.reset_drag(target, ctx)
            && let Some(animator) = animator
        {
            animator.animate(request);
        }
    }

    /// Move a release's hover copy. Returns false for an unknown token.
    pub fn set_release_position(&mut self, token: ReleaseId, position: Point) -> bool {
        self.tracker.set_release_position(token, position)
    }

    /// How far the container holding a release's target has scrolled since
    /// release.
    ///
    /// For a view dropped into a receiver with [`SnapTarget::To`] this is the
    /// receiver's parent; otherwise the released view's parent. Both anchors
    /// are available on the [`Release`] itself.
    pub fn release_scroll_delta(&self, token: ReleaseId) -> Option<Vec2> {
        self.tracker.release(token).map(|r| r.scroll_delta())
    }

    fn parent_scroll(&self, id: &str) -> Option<ScrollPosition> {
        let parent = self.registry.view(id)?.parent()?;
        self.registry.scroll_position(parent.as_str()).cloned()
    }

    pub(crate) fn handler<E, R>(
        &self,
        id: &str,
        pick: impl FnOnce(&Protocol<P>) -> Option<Handler<P, E, R>>,
    ) -> Option<Handler<P, E, R>> {
        self.registry.protocol(id).and_then(pick)
    }
}

impl<P: Clone> DragCoordinator<P> {
    /// Remove a view. Returns false if it was not registered.
    ///
    /// A dragged view ends its drag without snap-back. A receiving view stops
    /// receiving without an exit event. A monitoring view is silently
    /// forgotten. A pending release of the view is completed with
    /// `finished` false; its own `on_snap_end` is gone with it, but the
    /// receiver it was released over still gets `on_receive_snap_end`.
    pub fn unregister(&mut self, id: &str) -> bool {
        if self.registry.unregister(id).is_none() {
            return false;
        }
        if self.tracker.is_dragging(id) {
            self.reset_drag(SnapTarget::None);
        } else if self.tracker.receiver().is_some_and(|r| r.id.as_str() == id) {
            self.tracker.reset_receiver();
        }
        self.tracker.drop_monitor(id);
        for release in self.tracker.discard_releases(id) {
            tracing::debug!(view = id, release = release.token.get(), "release discarded");
            self.complete_release(release, false);
        }
        true
    }

    /// Complete a release.
    ///
    /// Called once per release by the animation runtime, with `finished`
    /// false if the animation was interrupted. The release is removed first,
    /// then `on_snap_end` fires on the released view and
    /// `on_receive_snap_end` on the receiver it was released over. Unknown or
    /// discarded tokens are ignored.
    pub fn finish_release(&mut self, token: ReleaseId, finished: bool) {
        let Some(release) = self.tracker.finish_release(token) else {
            tracing::trace!(release = token.get(), "ignoring completion of unknown release");
            return;
        };
        tracing::debug!(view = %release.view, release = token.get(), finished, "release finished");
        self.complete_release(release, finished);
    }

    fn complete_release(&mut self, release: Release, finished: bool) {
        let event = SnapEndEvent {
            dragged: release.view.clone(),
            dragged_payload: self
                .registry
                .protocol(release.view.as_str())
                .and_then(|p| p.drag_payload.clone()),
            receiver: release.receiver.clone(),
            receiver_payload: release
                .receiver
                .as_ref()
                .and_then(|r| self.registry.protocol(r.as_str()))
                .and_then(|p| p.receiver_payload.clone()),
            finished,
        };
        if let Some(handler) = self.handler(release.view.as_str(), |p| p.on_snap_end.clone()) {
            handler(self, &event);
        }
        if let Some(receiver) = &release.receiver
            && let Some(handler) = self.handler(receiver.as_str(), |p| p.on_receive_snap_end.clone())
        {
            handler(self, &event);
        }
    }

    /// Render state of one view, or `None` if it is not registered.
    pub fn view_state(&self, id: &str) -> Option<ViewState<P>> {
        if !self.registry.contains(id) {
            return None;
        }
        let mut state = ViewState::default();
        if let Some(drag) = self.tracker.drag() {
            if drag.dragged.as_str() == id {
                state.drag_status = DragStatus::Dragging;
                state.drag_absolute_position = Some(drag.absolute_position);
                state.drag_translation = Some(drag.translation);
                state.drag_translation_ratio = Some(drag.translation_ratio);
                state.drag_offset = Some(drag.offset);
                state.grab_offset = Some(drag.grab_offset);
                state.grab_offset_ratio = Some(drag.grab_offset_ratio);
                state.hover_position = Some(drag.hover_position);
                state.dragging_over_receiver = drag.receiver.as_ref().map(|r| r.id.clone());
            }
            if let Some(receiver) = &drag.receiver
                && receiver.id.as_str() == id
            {
                state.receive_status = ReceiveStatus::Receiving;
                state.receive_offset = Some(receiver.offset);
                state.receive_offset_ratio = Some(receiver.offset_ratio);
                state.receiving_drag = Some(drag.dragged.clone());
                state.receiving_payload = self
                    .registry
                    .protocol(drag.dragged.as_str())
                    .and_then(|p| p.drag_payload.clone());
            }
        }
        if state.drag_status == DragStatus::Inactive
            && let Some(release) = self.tracker.release_for(id)
        {
            state.drag_status = DragStatus::Released;
            state.hover_position = Some(release.hover_position);
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
    use crate::snap::SnapQueue;
    use crate::tracker::DragStart;
    use alloc::vec;
    use core::cell::RefCell;

    fn coordinator(queue: &SnapQueue) -> DragCoordinator<&'static str> {
        let mut c = DragCoordinator::new().with_animator(Rc::new(queue.clone()));
        c.register("list", None, Some(ScrollPosition::new()));
        c.register("card", Some("list".into()), None);
        c.register("zone", None, None);
        c.update_measurements("list", Some(Rect::new(0.0, 0.0, 300.0, 300.0)));
        c.update_measurements("card", Some(Rect::new(10.0, 10.0, 110.0, 60.0)));
        c.update_measurements("zone", Some(Rect::new(200.0, 0.0, 300.0, 100.0)));
        c.update_protocol("card", Protocol::new().with_drag_payload("card"));
        c.update_protocol("zone", Protocol::new().with_receiver_payload("zone"));
        c
    }

    fn start(c: &mut DragCoordinator<&'static str>) {
        c.tracker.start_drag(DragStart {
            dragged: "card".into(),
            absolute_start: Point::new(20.0, 20.0),
            parent_start: Point::new(20.0, 20.0),
            grab_offset: Vec2::new(10.0, 10.0),
            grab_offset_ratio: Vec2::new(0.1, 0.2),
        });
    }

    #[test]
    fn reset_hands_request_to_animator() {
        let queue = SnapQueue::new();
        let mut c = coordinator(&queue);
        start(&mut c);
        c.reset_drag(SnapTarget::Default);
        let requests = queue.drain();
        assert_eq!(requests.len(), 1, "one snap request");
        assert_eq!(requests[0].to, Point::new(10.0, 10.0), "resting origin");
        assert_eq!(requests[0].delay, DragConfig::DEFAULT_SNAP_DELAY, "default delay");
        assert_eq!(c.phase(), DragPhase::Releasing, "releasing");
        assert_eq!(
            c.view_state("card").map(|s| s.drag_status),
            Some(DragStatus::Released),
            "released status"
        );
    }

    #[test]
    fn reset_without_animator_is_immediate() {
        let mut c = coordinator(&SnapQueue::new());
        c.animator = None;
        start(&mut c);
        c.reset_drag(SnapTarget::Default);
        assert_eq!(c.phase(), DragPhase::Idle, "no release without an animator");
        c.reset_drag(SnapTarget::Default);
        assert_eq!(c.phase(), DragPhase::Idle, "second reset is a no-op");
    }

    #[test]
    fn per_view_animator_and_timing_win() {
        let shared = SnapQueue::new();
        let own = SnapQueue::new();
        let mut c = coordinator(&shared);
        c.update_protocol(
            "card",
            Protocol::new()
                .with_drag_payload("card")
                .with_snap_duration(core::time::Duration::from_millis(40))
                .with_snap_animator(Rc::new(own.clone())),
        );
        start(&mut c);
        c.reset_drag(SnapTarget::To(Point::new(1.0, 2.0)));
        assert!(shared.is_empty(), "coordinator animator unused");
        let requests = own.drain();
        assert_eq!(requests[0].to, Point::new(1.0, 2.0), "explicit target");
        assert_eq!(
            requests[0].duration,
            core::time::Duration::from_millis(40),
            "protocol duration"
        );
    }

    #[test]
    fn finish_release_fires_snap_end_in_order() {
        let queue = SnapQueue::new();
        let mut c = coordinator(&queue);
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let (a, b) = (log.clone(), log.clone());
        c.update_protocol(
            "card",
            Protocol::new()
                .with_drag_payload("card")
                .on_snap_end(move |_, e| {
                    assert!(e.finished, "finished flag");
                    a.borrow_mut().push("dragged");
                }),
        );
        c.update_protocol(
            "zone",
            Protocol::new()
                .with_receiver_payload("zone")
                .on_receive_snap_end(move |_, e| {
                    assert_eq!(e.dragged_payload, Some("card"), "payload");
                    b.borrow_mut().push("receiver");
                }),
        );
        start(&mut c);
        c.tracker.update_receiver(&"zone".into(), Rect::new(200.0, 0.0, 300.0, 100.0));
        c.reset_drag(SnapTarget::Default);
        let token = queue.drain()[0].release;
        assert!(c.set_release_position(token, Point::new(5.0, 5.0)), "known token");
        assert_eq!(
            c.hover_items(),
            vec![(ViewId::from("card"), Point::new(5.0, 5.0))],
            "release still rendered"
        );
        c.finish_release(token, true);
        c.finish_release(token, true);
        assert_eq!(*log.borrow(), vec!["dragged", "receiver"], "fired once, in order");
        assert!(c.hover_items().is_empty(), "release gone");
    }

    #[test]
    fn unregister_dragged_view_resets_without_snap() {
        let queue = SnapQueue::new();
        let mut c = coordinator(&queue);
        start(&mut c);
        assert!(c.unregister("card"), "was registered");
        assert_eq!(c.phase(), DragPhase::Idle, "drag torn down");
        assert!(queue.is_empty(), "no snap-back for a missing view");
        assert!(!c.unregister("card"), "already gone");
    }

    #[test]
    fn unregister_receiver_clears_receiver_only() {
        let mut c = coordinator(&SnapQueue::new());
        start(&mut c);
        c.tracker.update_receiver(&"zone".into(), Rect::new(200.0, 0.0, 300.0, 100.0));
        assert_eq!(
            c.tracking_status(),
            TrackingStatus {
                dragging: true,
                receiving: true
            },
            "receiving"
        );
        c.unregister("zone");
        assert_eq!(c.phase(), DragPhase::Dragging, "drag continues");
    }

    #[test]
    fn release_records_parent_scroll() {
        let queue = SnapQueue::new();
        let mut c = coordinator(&queue);
        start(&mut c);
        c.reset_drag(SnapTarget::Default);
        let token = queue.drain()[0].release;
        if let Some(scroll) = c.registry().scroll_position("list") {
            scroll.set(Vec2::new(0.0, 12.0));
        }
        assert_eq!(
            c.release_scroll_delta(token),
            Some(Vec2::new(0.0, 12.0)),
            "drift since release"
        );
    }

    #[test]
    fn drop_into_scrolled_list_follows_list_scroll() {
        let queue = SnapQueue::new();
        let mut c: DragCoordinator<&'static str> =
            DragCoordinator::new().with_animator(Rc::new(queue.clone()));
        let list_scroll = ScrollPosition::new();
        c.register("a", None, None);
        c.update_measurements("a", Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        c.update_protocol("a", Protocol::new().with_drag_payload("a"));
        c.register("list", None, Some(list_scroll.clone()));
        c.update_measurements("list", Some(Rect::new(100.0, 0.0, 300.0, 200.0)));
        c.register("slot", Some("list".into()), None);
        c.update_measurements("slot", Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
        c.update_protocol(
            "slot",
            Protocol::new().on_receive_drag_drop(|_, _| Some(SnapTarget::To(Point::new(200.0, 0.0)))),
        );

        let grab = Point::new(25.0, 25.0);
        c.handle_state_change(
            "a",
            GestureStateEvent {
                state: GestureState::Active,
                position: grab,
                parent_position: grab,
            },
        );
        let over_slot = Point::new(150.0, 50.0);
        c.handle_position("a", GesturePositionEvent { parent_position: over_slot });
        assert_eq!(
            c.tracker().receiver().map(|r| r.id.as_str()),
            Some("slot"),
            "over the slot"
        );
        c.handle_state_change(
            "a",
            GestureStateEvent {
                state: GestureState::Ended,
                position: grab,
                parent_position: over_slot,
            },
        );
        let requests = queue.drain();
        assert_eq!(requests[0].to, Point::new(200.0, 0.0), "receiver's target");

        list_scroll.set(Vec2::new(0.0, 40.0));
        assert_eq!(
            c.release_scroll_delta(requests[0].release),
            Some(Vec2::new(0.0, 40.0)),
            "list drift during release"
        );
    }

    #[test]
    fn unregister_releasing_view_ends_receiver_snap() {
        let queue = SnapQueue::new();
        let mut c = coordinator(&queue);
        let ends: Rc<RefCell<Vec<bool>>> = Rc::default();
        let seen = ends.clone();
        c.update_protocol(
            "zone",
            Protocol::new()
                .with_receiver_payload("zone")
                .on_receive_snap_end(move |_, e| {
                    assert_eq!(e.dragged.as_str(), "card", "released view");
                    assert_eq!(e.receiver_payload, Some("zone"), "receiver payload");
                    seen.borrow_mut().push(e.finished);
                }),
        );
        start(&mut c);
        c.tracker.update_receiver(&"zone".into(), Rect::new(200.0, 0.0, 300.0, 100.0));
        c.reset_drag(SnapTarget::Default);
        let token = queue.drain()[0].release;

        assert!(c.unregister("card"), "was registered");
        assert_eq!(*ends.borrow(), vec![false], "interrupted snap-back reported once");
        assert_eq!(c.phase(), DragPhase::Idle, "release gone");
        c.finish_release(token, true);
        assert_eq!(ends.borrow().len(), 1, "late completion ignored");
    }

    #[test]
    fn debug_summarizes_without_handlers() {
        let c: DragCoordinator<()> = DragCoordinator::new();
        let text = alloc::format!("{c:?}");
        assert!(text.starts_with("DragCoordinator {"), "struct name");
        assert!(text.contains("animator: false"), "animator presence only");
        assert!(text.ends_with(", .. }"), "marked non-exhaustive");
    }
}
