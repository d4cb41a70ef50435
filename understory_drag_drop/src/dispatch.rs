// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture dispatch: route gesture events through the tracker and fire handlers.
//!
//! ## State changes
//!
//! - While a drag is active, events for any other view are ignored.
//! - `Active` on an idle coordinator starts a drag if the view is draggable
//!   and the touch lies inside it. `on_drag_start` fires, then
//!   `on_monitor_drag_start` on every monitor under the touch.
//! - `Ended`, `Cancelled`, or `Failed` for the dragged view ends the drag.
//!   A normal end over a receiver drops: `on_drag_drop`, `on_receive_drag_drop`,
//!   then `on_monitor_drag_drop` per monitor. Anything else ends without a
//!   drop: `on_drag_end`, `on_receive_drag_exit` if over a receiver, then
//!   `on_monitor_drag_end` per monitor. The first handler returning a
//!   [`SnapTarget`] decides where the view snaps back; later handlers still run.
//!
//! ## Position updates
//!
//! Each tick recomputes the drag, hit tests, then fires exactly one receiver
//! case followed by the monitor transitions:
//!
//! | previous | found | handlers |
//! |---|---|---|
//! | R | R | `on_drag_over`, `on_receive_drag_over` |
//! | R | S | `on_drag_exit`, R `on_receive_drag_exit`, `on_drag_enter`, S `on_receive_drag_enter` |
//! | none | S | `on_drag_enter`, S `on_receive_drag_enter` |
//! | R | none | `on_drag_exit`, R `on_receive_drag_exit` |
//! | none | none | `on_drag` |
//!
//! Id lists are snapshotted before any handler runs, so handlers may mutate
//! the coordinator freely.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use understory_drag_registry::geometry::{dimensions, is_inside, ratio_of, relative_position};
use understory_drag_registry::{HitView, ViewFlags, ViewId};

use crate::coordinator::DragCoordinator;
use crate::event::{DragEvent, DraggedInfo, MonitorEvent, ReceiverInfo, SnapTarget};
use crate::gesture::{GesturePositionEvent, GestureState, GestureStateEvent};
use crate::monitor::{MonitorTransition, diff_monitors};
use crate::protocol::{Handler, Protocol, SnapHandler};
use crate::tracker::{AxisLocks, Drag, DragStart, ReceiverTracking};

impl<P: Clone> DragCoordinator<P> {
    /// Handle a recognizer state change for view `id`.
    pub fn handle_state_change(&mut self, id: &str, event: GestureStateEvent) {
        if let Some(drag) = self.tracker.drag() {
            if drag.dragged.as_str() != id {
                tracing::trace!(view = id, dragged = %drag.dragged, "ignoring gesture of non-dragged view");
            } else if event.state.is_finished() {
                self.end_drag(event);
            } else {
                tracing::trace!(view = id, state = ?event.state, "ignoring state change during drag");
            }
            return;
        }
        if event.state == GestureState::Active {
            self.begin_drag(id, event);
        } else {
            tracing::trace!(view = id, state = ?event.state, "ignoring state change while idle");
        }
    }

    /// Handle a state change given as a raw code.
    ///
    /// Unknown codes are logged and ignored.
    pub fn handle_state_code(&mut self, id: &str, code: u8, position: Point, parent_position: Point) {
        match GestureStateEvent::from_code(code, position, parent_position) {
            Ok(event) => self.handle_state_change(id, event),
            Err(err) => tracing::warn!(view = id, %err, "ignoring gesture state"),
        }
    }

    /// Handle continuous movement of view `id`.
    pub fn handle_position(&mut self, id: &str, event: GesturePositionEvent) {
        if !self.tracker.is_dragging(id) {
            tracing::trace!(view = id, "ignoring position of non-dragged view");
            return;
        }
        let Some(position) = self.move_drag(event.parent_position) else {
            return;
        };
        let hits = self.registry.find_monitors_and_receiver(position, Some(id));
        let monitors = hits.monitor_ids();
        let dragged = ViewId::from(id);
        self.notify_receiver(&dragged, hits.receiver);
        self.notify_monitors(monitors);
    }

    fn begin_drag(&mut self, id: &str, event: GestureStateEvent) {
        let Some(view) = self.registry.view(id) else {
            tracing::trace!(view = id, "ignoring activation of unknown view");
            return;
        };
        if !view.flags().contains(ViewFlags::DRAGGABLE) {
            return;
        }
        let Some(bounds) = self.registry.resolve_absolute(id, false) else {
            tracing::trace!(view = id, "ignoring activation of unmeasured view");
            return;
        };
        let size = dimensions(bounds);
        if !is_inside(event.position, Rect::from_origin_size(Point::ZERO, size)) {
            return;
        }
        let grab_offset = event.position.to_vec2();
        let started = self.tracker.start_drag(DragStart {
            dragged: view.id().clone(),
            absolute_start: bounds.origin() + grab_offset,
            parent_start: event.parent_position,
            grab_offset,
            grab_offset_ratio: ratio_of(grab_offset, size),
        });
        if !started {
            return;
        }

        let Some(event) = self.drag_event(None, false) else {
            return;
        };
        self.emit(id, |p| p.on_drag_start.clone(), &event);

        // Monitors are notified but not tracked; the first move enters them.
        let monitors = self
            .registry
            .find_monitors_and_receiver(event.absolute_position, Some(id))
            .monitor_ids();
        for monitor in monitors {
            let monitor_event = self.monitor_event(&event, &monitor);
            self.emit(monitor.as_str(), |p| p.on_monitor_drag_start.clone(), &monitor_event);
        }
    }

    fn end_drag(&mut self, event: GestureStateEvent) {
        self.move_drag(event.parent_position);
        let receiver = self.tracker.receiver().cloned();
        let monitors = self.tracker.monitors().to_vec();
        let dropping = event.state == GestureState::Ended;
        let Some(drag_event) = self.drag_event(receiver.as_ref(), !dropping) else {
            return;
        };
        let dragged = drag_event.dragged.id.clone();
        let mut target = None;

        match (&receiver, dropping) {
            (Some(receiver), true) => {
                self.ask(&dragged, |p| p.on_drag_drop.clone(), &drag_event, &mut target);
                self.ask(&receiver.id, |p| p.on_receive_drag_drop.clone(), &drag_event, &mut target);
                for monitor in &monitors {
                    let monitor_event = self.monitor_event(&drag_event, monitor);
                    self.ask(monitor, |p| p.on_monitor_drag_drop.clone(), &monitor_event, &mut target);
                }
            }
            (receiver, _) => {
                self.ask(&dragged, |p| p.on_drag_end.clone(), &drag_event, &mut target);
                if let Some(receiver) = receiver {
                    self.emit(&receiver.id, |p| p.on_receive_drag_exit.clone(), &drag_event);
                }
                for monitor in &monitors {
                    let monitor_event = self.monitor_event(&drag_event, monitor);
                    self.ask(monitor, |p| p.on_monitor_drag_end.clone(), &monitor_event, &mut target);
                }
            }
        }

        tracing::debug!(
            view = %dragged,
            dropped = dropping && receiver.is_some(),
            cancelled = !dropping,
            target = ?target,
            "drag ended"
        );
        self.reset_drag(target.unwrap_or_default());
    }

    /// Recompute the drag from a parent-relative touch point.
    ///
    /// Returns the new absolute position, or `None` without a drag.
    fn move_drag(&mut self, parent_position: Point) -> Option<Point> {
        let drag = self.tracker.drag()?;
        let position = drag.absolute_start + (parent_position - drag.parent_start);
        let dragged = drag.dragged.as_str();
        let bounds = self.registry.resolve_absolute(dragged, false);
        let locks = self
            .registry
            .protocol(dragged)
            .map_or_else(AxisLocks::default, |p| AxisLocks {
                x: p.lock_drag_x,
                y: p.lock_drag_y,
            });
        self.tracker.update_position(position, bounds, locks);
        Some(position)
    }

    fn notify_receiver(&mut self, dragged: &ViewId, found: Option<HitView>) {
        let previous = self.tracker.receiver().map(|r| r.id.clone());
        match (previous, found) {
            (Some(previous), Some(found)) if previous == found.id => {
                self.track_receiver(&found);
                let Some(event) = self.drag_event(self.tracker.receiver(), false) else {
                    return;
                };
                self.emit(dragged, |p| p.on_drag_over.clone(), &event);
                self.emit(&found.id, |p| p.on_receive_drag_over.clone(), &event);
            }
            (None, None) => {
                let Some(event) = self.drag_event(None, false) else {
                    return;
                };
                self.emit(dragged, |p| p.on_drag.clone(), &event);
            }
            (previous, found) => {
                if let Some(previous) = previous {
                    let left = self.tracker.reset_receiver();
                    if let Some(event) = self.drag_event(left.as_ref(), false) {
                        self.emit(dragged, |p| p.on_drag_exit.clone(), &event);
                        self.emit(&previous, |p| p.on_receive_drag_exit.clone(), &event);
                    }
                }
                if let Some(found) = found {
                    self.track_receiver(&found);
                    let Some(event) = self.drag_event(self.tracker.receiver(), false) else {
                        return;
                    };
                    self.emit(dragged, |p| p.on_drag_enter.clone(), &event);
                    self.emit(&found.id, |p| p.on_receive_drag_enter.clone(), &event);
                }
            }
        }
    }

    fn track_receiver(&mut self, found: &HitView) {
        let bounds = self
            .registry
            .resolve_absolute(found.id.as_str(), false)
            .unwrap_or(found.bounds);
        self.tracker.update_receiver(&found.id, bounds);
    }

    fn notify_monitors(&mut self, current: Vec<ViewId>) {
        let previous = self.tracker.set_monitors(current.clone());
        let Some(event) = self.drag_event(self.tracker.receiver(), false) else {
            return;
        };
        for transition in diff_monitors(&previous, &current) {
            let monitor_event = self.monitor_event(&event, transition.monitor());
            match transition {
                MonitorTransition::Enter(m) => {
                    self.emit(&m, |p| p.on_monitor_drag_enter.clone(), &monitor_event);
                }
                MonitorTransition::Over(m) => {
                    self.emit(&m, |p| p.on_monitor_drag_over.clone(), &monitor_event);
                }
                MonitorTransition::Exit(m) => {
                    self.emit(&m, |p| p.on_monitor_drag_exit.clone(), &monitor_event);
                }
            }
        }
    }

    fn emit<E>(
        &mut self,
        id: &(impl AsRef<str> + ?Sized),
        pick: impl FnOnce(&Protocol<P>) -> Option<Handler<P, E>>,
        event: &E,
    ) {
        if let Some(handler) = self.handler(id.as_ref(), pick) {
            handler(self, event);
        }
    }

    fn ask<E>(
        &mut self,
        id: &(impl AsRef<str> + ?Sized),
        pick: impl FnOnce(&Protocol<P>) -> Option<SnapHandler<P, E>>,
        event: &E,
        target: &mut Option<SnapTarget>,
    ) {
        if let Some(handler) = self.handler(id.as_ref(), pick) {
            let response = handler(self, event);
            if target.is_none() {
                *target = response;
            }
        }
    }

    fn drag_event(&self, receiver: Option<&ReceiverTracking>, cancelled: bool) -> Option<DragEvent<P>> {
        let drag = self.tracker.drag()?;
        Some(DragEvent {
            absolute_position: drag.absolute_position,
            translation: drag.translation,
            translation_ratio: drag.translation_ratio,
            dragged: self.dragged_info(drag),
            receiver: receiver.map(|r| self.receiver_info(r)),
            cancelled,
        })
    }

    fn dragged_info(&self, drag: &Drag) -> DraggedInfo<P> {
        let view = self.registry.view(drag.dragged.as_str());
        DraggedInfo {
            id: drag.dragged.clone(),
            parent_id: view.and_then(|v| v.parent().cloned()),
            payload: view.and_then(|v| v.protocol().drag_payload.clone()),
            drag_offset: drag.offset,
            grab_offset: drag.grab_offset,
            grab_offset_ratio: drag.grab_offset_ratio,
            hover_position: drag.hover_position,
        }
    }

    fn receiver_info(&self, receiver: &ReceiverTracking) -> ReceiverInfo<P> {
        let view = self.registry.view(receiver.id.as_str());
        ReceiverInfo {
            id: receiver.id.clone(),
            parent_id: view.and_then(|v| v.parent().cloned()),
            payload: view.and_then(|v| v.protocol().receiver_payload.clone()),
            receive_offset: receiver.offset,
            receive_offset_ratio: receiver.offset_ratio,
        }
    }

    fn monitor_event(&self, drag: &DragEvent<P>, monitor: &ViewId) -> MonitorEvent<P> {
        let relative = self
            .registry
            .resolve_absolute(monitor.as_str(), false)
            .map(|bounds| relative_position(drag.absolute_position, bounds));
        MonitorEvent {
            drag: drag.clone(),
            monitor: monitor.clone(),
            monitor_payload: self
                .registry
                .protocol(monitor.as_str())
                .and_then(|p| p.receiver_payload.clone()),
            monitor_offset: relative.map_or(Vec2::ZERO, |r| r.offset),
            monitor_offset_ratio: relative.map_or(Vec2::ZERO, |r| r.ratio),
        }
    }
}
