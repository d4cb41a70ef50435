// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view protocol: capabilities, payloads, snap options, and handlers.
//!
//! A [`Protocol`] is a bundle of optional handlers. Capability flags are
//! derived from which handlers are present when the protocol is built:
//!
//! - any dragged-role handler or a drag payload makes the view draggable,
//! - any receiver-role handler or a receiver payload makes it receptive,
//! - any monitor-role handler makes it monitoring.
//!
//! [`Protocol::draggable`], [`Protocol::receptive`], and
//! [`Protocol::monitoring`] override the derived value either way.
//!
//! ```
//! use understory_drag_drop::{Protocol, SnapTarget};
//! use understory_drag_registry::{ViewFlags, ViewProtocol};
//!
//! let zone: Protocol<u32> = Protocol::new()
//!     .with_receiver_payload(7)
//!     .on_receive_drag_drop(|_, _| Some(SnapTarget::None));
//! assert_eq!(zone.flags(), ViewFlags::RECEPTIVE);
//!
//! let passive: Protocol<u32> = zone.clone().receptive(false);
//! assert!(passive.flags().is_empty());
//! ```

use alloc::rc::Rc;
use core::time::Duration;

use understory_drag_registry::{ViewFlags, ViewProtocol};

use crate::coordinator::DragCoordinator;
use crate::event::{DragEvent, MonitorEvent, SnapEndEvent, SnapTarget};
use crate::snap::SnapAnimator;

/// A protocol handler.
///
/// Handlers receive the coordinator mutably, so they may unregister views or
/// update protocols and measurements while an event is being dispatched.
pub type Handler<P, E, R = ()> = Rc<dyn Fn(&mut DragCoordinator<P>, &E) -> R>;

/// A handler that may override the snap-back target.
pub type SnapHandler<P, E> = Handler<P, E, Option<SnapTarget>>;

/// Capabilities, payloads, and handlers of one view.
pub struct Protocol<P> {
    pub(crate) derived: ViewFlags,
    pub(crate) draggable: Option<bool>,
    pub(crate) receptive: Option<bool>,
    pub(crate) monitoring: Option<bool>,

    pub(crate) drag_payload: Option<P>,
    pub(crate) receiver_payload: Option<P>,
    pub(crate) lock_drag_x: bool,
    pub(crate) lock_drag_y: bool,
    pub(crate) animate_snap: bool,
    pub(crate) snap_delay: Option<Duration>,
    pub(crate) snap_duration: Option<Duration>,
    pub(crate) snap_animator: Option<Rc<dyn SnapAnimator>>,

    pub(crate) on_drag_start: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_drag: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_drag_enter: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_drag_over: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_drag_exit: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_drag_end: Option<SnapHandler<P, DragEvent<P>>>,
    pub(crate) on_drag_drop: Option<SnapHandler<P, DragEvent<P>>>,
    pub(crate) on_snap_end: Option<Handler<P, SnapEndEvent<P>>>,

    pub(crate) on_receive_drag_enter: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_receive_drag_over: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_receive_drag_exit: Option<Handler<P, DragEvent<P>>>,
    pub(crate) on_receive_drag_drop: Option<SnapHandler<P, DragEvent<P>>>,
    pub(crate) on_receive_snap_end: Option<Handler<P, SnapEndEvent<P>>>,

    pub(crate) on_monitor_drag_start: Option<Handler<P, MonitorEvent<P>>>,
    pub(crate) on_monitor_drag_enter: Option<Handler<P, MonitorEvent<P>>>,
    pub(crate) on_monitor_drag_over: Option<Handler<P, MonitorEvent<P>>>,
    pub(crate) on_monitor_drag_exit: Option<Handler<P, MonitorEvent<P>>>,
    pub(crate) on_monitor_drag_end: Option<SnapHandler<P, MonitorEvent<P>>>,
    pub(crate) on_monitor_drag_drop: Option<SnapHandler<P, MonitorEvent<P>>>,
}

impl<P> Default for Protocol<P> {
    fn default() -> Self {
        Self {
            derived: ViewFlags::empty(),
            draggable: None,
            receptive: None,
            monitoring: None,
            drag_payload: None,
            receiver_payload: None,
            lock_drag_x: false,
            lock_drag_y: false,
            animate_snap: true,
            snap_delay: None,
            snap_duration: None,
            snap_animator: None,
            on_drag_start: None,
            on_drag: None,
            on_drag_enter: None,
            on_drag_over: None,
            on_drag_exit: None,
            on_drag_end: None,
            on_drag_drop: None,
            on_snap_end: None,
            on_receive_drag_enter: None,
            on_receive_drag_over: None,
            on_receive_drag_exit: None,
            on_receive_drag_drop: None,
            on_receive_snap_end: None,
            on_monitor_drag_start: None,
            on_monitor_drag_enter: None,
            on_monitor_drag_over: None,
            on_monitor_drag_exit: None,
            on_monitor_drag_end: None,
            on_monitor_drag_drop: None,
        }
    }
}

impl<P: Clone> Clone for Protocol<P> {
    fn clone(&self) -> Self {
        Self {
            derived: self.derived,
            draggable: self.draggable,
            receptive: self.receptive,
            monitoring: self.monitoring,
            drag_payload: self.drag_payload.clone(),
            receiver_payload: self.receiver_payload.clone(),
            lock_drag_x: self.lock_drag_x,
            lock_drag_y: self.lock_drag_y,
            animate_snap: self.animate_snap,
            snap_delay: self.snap_delay,
            snap_duration: self.snap_duration,
            snap_animator: self.snap_animator.clone(),
            on_drag_start: self.on_drag_start.clone(),
            on_drag: self.on_drag.clone(),
            on_drag_enter: self.on_drag_enter.clone(),
            on_drag_over: self.on_drag_over.clone(),
            on_drag_exit: self.on_drag_exit.clone(),
            on_drag_end: self.on_drag_end.clone(),
            on_drag_drop: self.on_drag_drop.clone(),
            on_snap_end: self.on_snap_end.clone(),
            on_receive_drag_enter: self.on_receive_drag_enter.clone(),
            on_receive_drag_over: self.on_receive_drag_over.clone(),
            on_receive_drag_exit: self.on_receive_drag_exit.clone(),
            on_receive_drag_drop: self.on_receive_drag_drop.clone(),
            on_receive_snap_end: self.on_receive_snap_end.clone(),
            on_monitor_drag_start: self.on_monitor_drag_start.clone(),
            on_monitor_drag_enter: self.on_monitor_drag_enter.clone(),
            on_monitor_drag_over: self.on_monitor_drag_over.clone(),
            on_monitor_drag_exit: self.on_monitor_drag_exit.clone(),
            on_monitor_drag_end: self.on_monitor_drag_end.clone(),
            on_monitor_drag_drop: self.on_monitor_drag_drop.clone(),
        }
    }
}

impl<P: core::fmt::Debug> core::fmt::Debug for Protocol<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Protocol")
            .field("flags", &self.flags())
            .field("drag_payload", &self.drag_payload)
            .field("receiver_payload", &self.receiver_payload)
            .field("lock_drag_x", &self.lock_drag_x)
            .field("lock_drag_y", &self.lock_drag_y)
            .field("animate_snap", &self.animate_snap)
            .field("snap_delay", &self.snap_delay)
            .field("snap_duration", &self.snap_duration)
            .finish_non_exhaustive()
    }
}

impl<P> ViewProtocol for Protocol<P> {
    fn flags(&self) -> ViewFlags {
        let mut flags = self.derived;
        for (flag, explicit) in [
            (ViewFlags::DRAGGABLE, self.draggable),
            (ViewFlags::RECEPTIVE, self.receptive),
            (ViewFlags::MONITORING, self.monitoring),
        ] {
            if let Some(on) = explicit {
                flags.set(flag, on);
            }
        }
        flags
    }
}

macro_rules! handler_setters {
    ($($(#[$doc:meta])* $name:ident($event:ty) -> $ret:ty => $flag:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(
                mut self,
                handler: impl Fn(&mut DragCoordinator<P>, &$event) -> $ret + 'static,
            ) -> Self {
                self.$name = Some(Rc::new(handler));
                self.derived |= ViewFlags::$flag;
                self
            }
        )*
    };
}

impl<P> Protocol<P> {
    /// An empty protocol: no capabilities, no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the draggable capability on or off.
    pub fn draggable(mut self, on: bool) -> Self {
        self.draggable = Some(on);
        self
    }

    /// Force the receptive capability on or off.
    pub fn receptive(mut self, on: bool) -> Self {
        self.receptive = Some(on);
        self
    }

    /// Force the monitoring capability on or off.
    pub fn monitoring(mut self, on: bool) -> Self {
        self.monitoring = Some(on);
        self
    }

    /// Payload handed to other parties while this view is dragged.
    pub fn with_drag_payload(mut self, payload: P) -> Self {
        self.drag_payload = Some(payload);
        self.derived |= ViewFlags::DRAGGABLE;
        self
    }

    /// Payload handed to other parties while this view receives or monitors.
    pub fn with_receiver_payload(mut self, payload: P) -> Self {
        self.receiver_payload = Some(payload);
        self.derived |= ViewFlags::RECEPTIVE;
        self
    }

    /// Pin the drag to the vertical axis.
    pub fn with_lock_drag_x(mut self, lock: bool) -> Self {
        self.lock_drag_x = lock;
        self
    }

    /// Pin the drag to the horizontal axis.
    pub fn with_lock_drag_y(mut self, lock: bool) -> Self {
        self.lock_drag_y = lock;
        self
    }

    /// Whether a released view animates back. Defaults to true.
    pub fn with_animate_snap(mut self, animate: bool) -> Self {
        self.animate_snap = animate;
        self
    }

    /// Override the coordinator's snap-back delay.
    pub fn with_snap_delay(mut self, delay: Duration) -> Self {
        self.snap_delay = Some(delay);
        self
    }

    /// Override the coordinator's snap-back duration.
    pub fn with_snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = Some(duration);
        self
    }

    /// Animate this view's snap-back with a custom animator.
    pub fn with_snap_animator(mut self, animator: Rc<dyn SnapAnimator>) -> Self {
        self.snap_animator = Some(animator);
        self
    }

    /// Drag payload, if any.
    pub fn drag_payload(&self) -> Option<&P> {
        self.drag_payload.as_ref()
    }

    /// Receiver payload, if any.
    pub fn receiver_payload(&self) -> Option<&P> {
        self.receiver_payload.as_ref()
    }

    /// Axis locks as `(x, y)`.
    pub fn drag_locks(&self) -> (bool, bool) {
        (self.lock_drag_x, self.lock_drag_y)
    }

    /// Whether a released view animates back.
    pub fn animates_snap(&self) -> bool {
        self.animate_snap
    }

    handler_setters! {
        /// Called once when this view starts being dragged.
        on_drag_start(DragEvent<P>) -> () => DRAGGABLE;
        /// Called on every move while dragged over no receiver.
        on_drag(DragEvent<P>) -> () => DRAGGABLE;
        /// Called when this dragged view enters a receiver.
        on_drag_enter(DragEvent<P>) -> () => DRAGGABLE;
        /// Called on every move while dragged over the same receiver.
        on_drag_over(DragEvent<P>) -> () => DRAGGABLE;
        /// Called when this dragged view leaves a receiver.
        on_drag_exit(DragEvent<P>) -> () => DRAGGABLE;
        /// Called when the drag ends without a drop. May override the snap target.
        on_drag_end(DragEvent<P>) -> Option<SnapTarget> => DRAGGABLE;
        /// Called when this view is dropped on a receiver. May override the snap target.
        on_drag_drop(DragEvent<P>) -> Option<SnapTarget> => DRAGGABLE;
        /// Called when this view's snap-back animation completes.
        on_snap_end(SnapEndEvent<P>) -> () => DRAGGABLE;
        /// Called when a dragged view enters this receiver.
        on_receive_drag_enter(DragEvent<P>) -> () => RECEPTIVE;
        /// Called on every move while a dragged view stays over this receiver.
        on_receive_drag_over(DragEvent<P>) -> () => RECEPTIVE;
        /// Called when a dragged view leaves this receiver, or ends over it without dropping.
        on_receive_drag_exit(DragEvent<P>) -> () => RECEPTIVE;
        /// Called when a dragged view is dropped on this receiver. May override the snap target.
        on_receive_drag_drop(DragEvent<P>) -> Option<SnapTarget> => RECEPTIVE;
        /// Called when the snap-back of a view dropped here completes.
        on_receive_snap_end(SnapEndEvent<P>) -> () => RECEPTIVE;
        /// Called when a drag starts over this monitor.
        on_monitor_drag_start(MonitorEvent<P>) -> () => MONITORING;
        /// Called when the drag point enters this monitor.
        on_monitor_drag_enter(MonitorEvent<P>) -> () => MONITORING;
        /// Called on every move while the drag point stays over this monitor.
        on_monitor_drag_over(MonitorEvent<P>) -> () => MONITORING;
        /// Called when the drag point leaves this monitor.
        on_monitor_drag_exit(MonitorEvent<P>) -> () => MONITORING;
        /// Called when a drag ends over this monitor without a drop. May override the snap target.
        on_monitor_drag_end(MonitorEvent<P>) -> Option<SnapTarget> => MONITORING;
        /// Called when a drop happens over this monitor. May override the snap target.
        on_monitor_drag_drop(MonitorEvent<P>) -> Option<SnapTarget> => MONITORING;
    }
}
