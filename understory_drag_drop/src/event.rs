// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads delivered to protocol handlers, and snap-back targets.

use kurbo::{Point, Vec2};
use understory_drag_registry::ViewId;

/// Where a released view's hover copy should go.
///
/// Returned (optionally) by the end and drop handlers. The first handler to
/// return `Some(..)` decides; see the crate docs for the order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum SnapTarget {
    /// Snap back to the dragged view's resting position.
    #[default]
    Default,
    /// Do not animate; hide the hover copy immediately.
    None,
    /// Snap to an explicit point in root coordinates.
    To(Point),
}

/// The dragged view, as seen by any handler.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggedInfo<P> {
    /// Identifier of the dragged view.
    pub id: ViewId,
    /// Its registered parent.
    pub parent_id: Option<ViewId>,
    /// Its drag payload.
    pub payload: Option<P>,
    /// Drag point relative to the dragged view's current absolute origin.
    pub drag_offset: Vec2,
    /// Where the touch began within the dragged view.
    pub grab_offset: Vec2,
    /// [`grab_offset`](Self::grab_offset) as a fraction of the view's size.
    pub grab_offset_ratio: Vec2,
    /// Current origin of the floating hover copy.
    pub hover_position: Point,
}

/// The receiving view, as seen by any handler.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiverInfo<P> {
    /// Identifier of the receiving view.
    pub id: ViewId,
    /// Its registered parent.
    pub parent_id: Option<ViewId>,
    /// Its receiver payload.
    pub payload: Option<P>,
    /// Drag point relative to the receiver's absolute origin.
    pub receive_offset: Vec2,
    /// [`receive_offset`](Self::receive_offset) as a fraction of the receiver's size.
    pub receive_offset_ratio: Vec2,
}

/// Payload for dragged-role and receiver-role handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent<P> {
    /// Drag point in root coordinates.
    pub absolute_position: Point,
    /// Movement since the drag started (zero on locked axes).
    pub translation: Vec2,
    /// [`translation`](Self::translation) as a fraction of the dragged view's size.
    pub translation_ratio: Vec2,
    /// The dragged view.
    pub dragged: DraggedInfo<P>,
    /// The receiver involved in this event, if any.
    ///
    /// For exit events this is the receiver being left.
    pub receiver: Option<ReceiverInfo<P>>,
    /// True only on end and exit events of a cancelled or failed gesture.
    pub cancelled: bool,
}

/// Payload for monitor-role handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorEvent<P> {
    /// The drag as seen by dragged and receiver handlers.
    pub drag: DragEvent<P>,
    /// Identifier of the monitoring view.
    pub monitor: ViewId,
    /// The monitor's receiver payload.
    pub monitor_payload: Option<P>,
    /// Drag point relative to the monitor's absolute origin.
    pub monitor_offset: Vec2,
    /// [`monitor_offset`](Self::monitor_offset) as a fraction of the monitor's size.
    pub monitor_offset_ratio: Vec2,
}

/// Payload for snap-end handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapEndEvent<P> {
    /// The view that was released.
    pub dragged: ViewId,
    /// Its drag payload.
    pub dragged_payload: Option<P>,
    /// The receiver at the time of release, if any.
    pub receiver: Option<ViewId>,
    /// The receiver's payload.
    pub receiver_payload: Option<P>,
    /// False if the animation was interrupted.
    pub finished: bool,
}
