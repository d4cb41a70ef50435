// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator-wide defaults.

use core::time::Duration;

/// Defaults applied when a view's protocol does not override them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DragConfig {
    /// Delay before a released view starts snapping back.
    pub snap_delay: Duration,
    /// Length of the snap-back animation. Zero disables the animation.
    pub snap_duration: Duration,
}

impl DragConfig {
    /// Default snap-back delay.
    pub const DEFAULT_SNAP_DELAY: Duration = Duration::from_millis(100);
    /// Default snap-back duration.
    pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(250);

    /// Set the default snap-back delay.
    pub fn with_snap_delay(mut self, delay: Duration) -> Self {
        self.snap_delay = delay;
        self
    }

    /// Set the default snap-back duration.
    pub fn with_snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = duration;
        self
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            snap_delay: Self::DEFAULT_SNAP_DELAY,
            snap_duration: Self::DEFAULT_SNAP_DURATION,
        }
    }
}
