// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core registry implementation: registration, updates, and absolute resolution.

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Rect, Vec2};

use crate::geometry;
use crate::types::{ScrollPosition, ViewFlags, ViewId, ViewProtocol};

/// A registered view.
#[derive(Clone, Debug)]
pub struct View<T> {
    id: ViewId,
    parent: Option<ViewId>,
    scroll: Option<ScrollPosition>,
    protocol: T,
    measurements: Option<Rect>,
}

impl<T> View<T> {
    /// Identifier of the view.
    pub fn id(&self) -> &ViewId {
        &self.id
    }

    /// Registered parent, if any.
    pub fn parent(&self) -> Option<&ViewId> {
        self.parent.as_ref()
    }

    /// Scroll handle, present when this view is a scrollable container.
    pub fn scroll(&self) -> Option<&ScrollPosition> {
        self.scroll.as_ref()
    }

    /// The stored protocol.
    pub fn protocol(&self) -> &T {
        &self.protocol
    }

    /// Last reported rectangle relative to the parent's coordinate space.
    ///
    /// `None` until the first layout report, or after the view reported
    /// itself unmeasurable.
    pub fn measurements(&self) -> Option<Rect> {
        self.measurements
    }
}

impl<T: ViewProtocol> View<T> {
    /// Capability flags from the stored protocol.
    pub fn flags(&self) -> ViewFlags {
        self.protocol.flags()
    }
}

/// A view together with its resolved absolute measurements.
#[derive(Clone, Copy, Debug)]
pub struct AbsoluteView<'a, T> {
    /// The registered view.
    pub view: &'a View<T>,
    /// Bounds in root coordinates.
    pub absolute: Rect,
}

/// Registry of every view taking part in drag-and-drop.
///
/// Iteration follows registration order. All lookups are failure-soft: an
/// unknown identifier yields `None` or does nothing.
pub struct ViewRegistry<T> {
    order: Vec<ViewId>,
    views: HashMap<ViewId, View<T>>,
}

impl<T> core::fmt::Debug for ViewRegistry<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let measured = self
            .views
            .values()
            .filter(|v| v.measurements.is_some())
            .count();
        f.debug_struct("ViewRegistry")
            .field("views", &self.order.len())
            .field("measured", &measured)
            .finish_non_exhaustive()
    }
}

impl<T> Default for ViewRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            views: HashMap::new(),
        }
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no views are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.views.contains_key(id)
    }

    /// Registered identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &ViewId> + '_ {
        self.order.iter()
    }

    /// Look up a view.
    pub fn view(&self, id: &str) -> Option<&View<T>> {
        self.views.get(id)
    }

    /// Look up a view's protocol.
    pub fn protocol(&self, id: &str) -> Option<&T> {
        self.views.get(id).map(|v| &v.protocol)
    }

    /// Registered parent of `id`.
    pub fn parent_of(&self, id: &str) -> Option<&ViewId> {
        self.views.get(id)?.parent.as_ref()
    }

    /// Scroll handle of `id`, if it is a scrollable container.
    pub fn scroll_position(&self, id: &str) -> Option<&ScrollPosition> {
        self.views.get(id)?.scroll.as_ref()
    }

    /// Remove a view and return it.
    ///
    /// Descendants stay registered; their absolute measurements become
    /// unavailable until they are re-parented or their parent returns.
    pub fn unregister(&mut self, id: &str) -> Option<View<T>> {
        let view = self.views.remove(id)?;
        self.order.retain(|v| v.as_str() != id);
        tracing::trace!(view = %view.id, "unregistered view");
        Some(view)
    }

    /// Replace the stored protocol. Returns false if `id` is unknown.
    pub fn update_protocol(&mut self, id: &str, protocol: T) -> bool {
        match self.views.get_mut(id) {
            Some(view) => {
                view.protocol = protocol;
                true
            }
            None => false,
        }
    }

    /// Replace the stored relative measurements. Returns false if `id` is unknown.
    ///
    /// `None` marks the view as off-screen or unmeasurable.
    pub fn update_measurements(&mut self, id: &str, measurements: Option<Rect>) -> bool {
        match self.views.get_mut(id) {
            Some(view) => {
                view.measurements = measurements;
                true
            }
            None => false,
        }
    }

    /// Returns true if `ancestor` appears on the parent chain of `id`.
    ///
    /// A view is not its own ancestor. Broken or cyclic chains stop the walk.
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut cur = self.parent_of(id);
        let mut steps = 0;
        while let Some(p) = cur {
            if p.as_str() == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.order.len() {
                return false;
            }
            cur = self.parent_of(p.as_str());
        }
        false
    }

    /// Resolve bounds of `id` in root coordinates.
    ///
    /// Each level translates by `parent_absolute + own_relative - parent_scroll`.
    /// With `clip`, each level is additionally intersected with the parent's
    /// (clipped) absolute bounds, so a view inside a scrolled container reports
    /// only its visible part.
    ///
    /// Returns `None` if the view or any ancestor is unknown or unmeasured.
    pub fn resolve_absolute(&self, id: &str, clip: bool) -> Option<Rect> {
        self.resolve_chain(id, 0)
            .map(|(absolute, clipped)| if clip { clipped } else { absolute })
    }

    /// Look up a view together with its absolute measurements.
    pub fn absolute_view(&self, id: &str, clip: bool) -> Option<AbsoluteView<'_, T>> {
        let view = self.views.get(id)?;
        let absolute = self.resolve_absolute(id, clip)?;
        Some(AbsoluteView { view, absolute })
    }

    /// Returns `(absolute, clipped)` for `id`.
    ///
    /// Translation always composes unclipped parent origins; clipping only
    /// narrows the result.
    fn resolve_chain(&self, id: &str, depth: usize) -> Option<(Rect, Rect)> {
        if depth > self.order.len() {
            tracing::warn!(view = id, "parent chain does not terminate");
            return None;
        }
        let view = self.views.get(id)?;
        let own = view.measurements?;
        let Some(parent_id) = view.parent.as_ref() else {
            return Some((own, own));
        };
        let parent = self.views.get(parent_id.as_str())?;
        let (parent_abs, parent_clipped) = self.resolve_chain(parent_id.as_str(), depth + 1)?;
        let scroll = parent.scroll.as_ref().map_or(Vec2::ZERO, ScrollPosition::get);
        let absolute = own + (parent_abs.origin().to_vec2() - scroll);
        Some((absolute, geometry::clip(absolute, parent_clipped)))
    }
}

impl<T: Default> ViewRegistry<T> {
    /// Register a view, or update the linkage of an already registered one.
    ///
    /// A new view starts with a default (empty) protocol and no measurements.
    /// Re-registering an existing id keeps its protocol and measurements and
    /// only replaces `parent` and `scroll`; the id keeps its position in
    /// registration order.
    pub fn register(&mut self, id: ViewId, parent: Option<ViewId>, scroll: Option<ScrollPosition>) {
        if let Some(view) = self.views.get_mut(id.as_str()) {
            view.parent = parent;
            view.scroll = scroll;
            return;
        }
        tracing::trace!(view = %id, parent = ?parent.as_ref().map(ViewId::as_str), "registered view");
        self.order.push(id.clone());
        self.views.insert(
            id.clone(),
            View {
                id,
                parent,
                scroll,
                protocol: T::default(),
                measurements: None,
            },
        );
    }
}
