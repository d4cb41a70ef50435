// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monitor transitions: compute enter/over/exit from successive monitor sets.
//!
//! Each position update hit-tests a fresh list of monitors under the drag
//! point. Diffing it against the previous list tells each monitor what
//! happened:
//!
//! - present before and now: `Over`
//! - present now only: `Enter`
//! - present before only: `Exit`
//!
//! ## Minimal example
//!
//! ```
//! use understory_drag_drop::monitor::{MonitorTransition, diff_monitors};
//!
//! let t = diff_monitors(&[1, 2], &[2, 3]);
//! assert_eq!(
//!     t,
//!     vec![
//!         MonitorTransition::Over(2),
//!         MonitorTransition::Enter(3),
//!         MonitorTransition::Exit(1),
//!     ]
//! );
//! ```

use alloc::vec::Vec;

/// A monitor transition.
///
/// Returned by [`diff_monitors`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonitorTransition<K> {
    /// The drag point moved into the monitor.
    Enter(K),
    /// The drag point stayed over the monitor.
    Over(K),
    /// The drag point left the monitor.
    Exit(K),
}

impl<K> MonitorTransition<K> {
    /// The monitor this transition is for.
    pub fn monitor(&self) -> &K {
        match self {
            Self::Enter(k) | Self::Over(k) | Self::Exit(k) => k,
        }
    }
}

/// Diff two monitor lists.
///
/// Enters and overs come first, in `current` order; exits follow, in
/// `previous` order. Only membership matters; reordering alone yields only
/// `Over` transitions.
pub fn diff_monitors<K: Clone + PartialEq>(
    previous: &[K],
    current: &[K],
) -> Vec<MonitorTransition<K>> {
    let mut out = Vec::with_capacity(current.len() + previous.len());
    for k in current {
        if previous.contains(k) {
            out.push(MonitorTransition::Over(k.clone()));
        } else {
            out.push(MonitorTransition::Enter(k.clone()));
        }
    }
    for k in previous {
        if !current.contains(k) {
            out.push(MonitorTransition::Exit(k.clone()));
        }
    }
    out
}
