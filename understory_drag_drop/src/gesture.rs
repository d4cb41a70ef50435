// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input from the gesture source.
//!
//! The gesture source recognizes press-and-drag on a view and reports two
//! kinds of events, both tagged with the view's id:
//!
//! - [`GestureStateEvent`] when the recognizer changes state, carrying the
//!   touch position local to the view and relative to the view's parent.
//! - [`GesturePositionEvent`] repeatedly while active, carrying only the
//!   parent-relative position.

use kurbo::Point;

use crate::error::DragError;

/// Discrete recognizer states.
///
/// Numeric codes follow the common gesture-handler convention:
/// 0 undetermined, 1 failed, 2 began, 3 cancelled, 4 active, 5 ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// Not yet recognized.
    Undetermined,
    /// Touch down; not yet a drag.
    Began,
    /// Recognized as a drag.
    Active,
    /// Released normally.
    Ended,
    /// Cancelled by the system or another recognizer.
    Cancelled,
    /// Recognition failed.
    Failed,
}

impl GestureState {
    /// Returns true for the states that finish a gesture.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

impl TryFrom<u8> for GestureState {
    type Error = DragError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Undetermined,
            1 => Self::Failed,
            2 => Self::Began,
            3 => Self::Cancelled,
            4 => Self::Active,
            5 => Self::Ended,
            other => return Err(DragError::UnknownGestureState(other)),
        })
    }
}

/// A recognizer state change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureStateEvent {
    /// New state.
    pub state: GestureState,
    /// Touch position relative to the view's own origin.
    pub position: Point,
    /// Touch position relative to the view's immediate parent.
    pub parent_position: Point,
}

impl GestureStateEvent {
    /// Build an event from a raw state code.
    pub fn from_code(code: u8, position: Point, parent_position: Point) -> Result<Self, DragError> {
        Ok(Self {
            state: GestureState::try_from(code)?,
            position,
            parent_position,
        })
    }
}

/// Continuous movement while a gesture is active.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GesturePositionEvent {
    /// Touch position relative to the dragged view's immediate parent.
    pub parent_position: Point,
}
