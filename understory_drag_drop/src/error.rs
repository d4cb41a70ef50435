// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors.

/// Errors produced when converting gesture-source input.
///
/// Everything else in this crate is failure-soft and reports missing data as
/// `None` or a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// The gesture source reported a state code this crate does not model.
    #[error("unknown gesture state code {0}")]
    UnknownGestureState(u8),
}
