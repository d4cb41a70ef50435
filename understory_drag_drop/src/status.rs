// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-facing snapshots of drag state.

use kurbo::{Point, Vec2};
use understory_drag_registry::ViewId;

/// Drag status of one view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragStatus {
    /// Not dragged.
    #[default]
    Inactive,
    /// Currently dragged.
    Dragging,
    /// Released and snapping back.
    Released,
}

/// Receive status of one view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReceiveStatus {
    /// Not the current receiver.
    #[default]
    Inactive,
    /// The current receiver.
    Receiving,
}

/// Everything a view needs to render its drag state.
///
/// Drag fields are set while the view is dragged. Hover position is also set
/// while it is released. Receive fields are set while it receives.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<P> {
    /// Drag status.
    pub drag_status: DragStatus,
    /// Receive status.
    pub receive_status: ReceiveStatus,
    /// Drag point in root coordinates.
    pub drag_absolute_position: Option<Point>,
    /// Movement since the drag started.
    pub drag_translation: Option<Vec2>,
    /// Movement as a fraction of this view's size.
    pub drag_translation_ratio: Option<Vec2>,
    /// Drag point relative to this view's absolute origin.
    pub drag_offset: Option<Vec2>,
    /// Where the touch began within this view.
    pub grab_offset: Option<Vec2>,
    /// Grab offset as a fraction of this view's size.
    pub grab_offset_ratio: Option<Vec2>,
    /// Origin of this view's floating hover copy.
    pub hover_position: Option<Point>,
    /// Receiver this view is dragged over.
    pub dragging_over_receiver: Option<ViewId>,
    /// Drag point relative to this receiver's absolute origin.
    pub receive_offset: Option<Vec2>,
    /// Receive offset as a fraction of this receiver's size.
    pub receive_offset_ratio: Option<Vec2>,
    /// View being dragged over this receiver.
    pub receiving_drag: Option<ViewId>,
    /// Drag payload of the view being received.
    pub receiving_payload: Option<P>,
}

impl<P> Default for ViewState<P> {
    fn default() -> Self {
        Self {
            drag_status: DragStatus::Inactive,
            receive_status: ReceiveStatus::Inactive,
            drag_absolute_position: None,
            drag_translation: None,
            drag_translation_ratio: None,
            drag_offset: None,
            grab_offset: None,
            grab_offset_ratio: None,
            hover_position: None,
            dragging_over_receiver: None,
            receive_offset: None,
            receive_offset_ratio: None,
            receiving_drag: None,
            receiving_payload: None,
        }
    }
}

/// Whether anything, anywhere, is dragged or received.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackingStatus {
    /// A drag is in progress.
    pub dragging: bool,
    /// The drag is over a receiver.
    pub receiving: bool,
}
