// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the registry: view identifiers, capability flags, and scroll handles.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use core::borrow::Borrow;
use core::cell::Cell;

use kurbo::Vec2;

/// Identifier for a registered view.
///
/// An opaque string that stays stable for the registered lifetime of the view.
/// Cloning is cheap (the string is shared), and lookups accept plain `&str`
/// through [`Borrow`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(Arc<str>);

impl ViewId {
    /// Create an identifier from anything string-like.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl Borrow<str> for ViewId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ViewId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ViewId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags::bitflags! {
    /// Capabilities a view takes part in.
    ///
    /// Hit testing only considers views that are [`RECEPTIVE`](Self::RECEPTIVE)
    /// or [`MONITORING`](Self::MONITORING).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// The view can be dragged.
        const DRAGGABLE  = 0b0000_0001;
        /// The view can receive drops.
        const RECEPTIVE  = 0b0000_0010;
        /// The view observes drags passing over its bounds.
        const MONITORING = 0b0000_0100;
    }
}

/// Anything stored as a view's protocol must expose its capability flags.
///
/// The registry never inspects a protocol beyond this.
pub trait ViewProtocol {
    /// Capability flags for the view.
    fn flags(&self) -> ViewFlags;
}

impl ViewProtocol for ViewFlags {
    #[inline]
    fn flags(&self) -> ViewFlags {
        *self
    }
}

/// Live scroll offset of a scrollable container.
///
/// The render layer keeps one clone and writes the offset as the container
/// scrolls; the registry keeps another and reads it whenever a descendant's
/// absolute measurements are resolved. Clones share the same value.
#[derive(Clone, Debug, Default)]
pub struct ScrollPosition(Rc<Cell<Vec2>>);

impl ScrollPosition {
    /// Create a scroll handle at offset zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scroll handle at the given offset.
    pub fn at(offset: Vec2) -> Self {
        Self(Rc::new(Cell::new(offset)))
    }

    /// Current offset.
    #[inline]
    pub fn get(&self) -> Vec2 {
        self.0.get()
    }

    /// Replace the current offset.
    #[inline]
    pub fn set(&self, offset: Vec2) {
        self.0.set(offset);
    }

    /// Returns true if both handles observe the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
