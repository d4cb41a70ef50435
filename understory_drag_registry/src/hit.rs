// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing: monitors and the receiving view under an absolute point.
//!
//! ## Receiver selection
//!
//! Several receptive views can contain the same point (a drop zone nested in
//! another drop zone, or overlapping siblings). The most specific one wins:
//!
//! 1. Any candidate that is an ancestor of another candidate is dropped.
//! 2. Among the rest, the smallest unclipped area wins, so a view partly
//!    scrolled out of its container keeps its full size.
//! 3. Equal areas go to the later-registered view.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::geometry::is_inside;
use crate::registry::ViewRegistry;
use crate::types::{ViewFlags, ViewId, ViewProtocol};

/// A view matched by [`ViewRegistry::find_monitors_and_receiver`].
#[derive(Clone, Debug, PartialEq)]
pub struct HitView {
    /// The matched view.
    pub id: ViewId,
    /// Its clipped absolute bounds.
    pub bounds: Rect,
}

/// Results of a hit test.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hits {
    /// Monitoring views containing the point, in registration order.
    pub monitors: Vec<HitView>,
    /// The most specific receptive view containing the point.
    pub receiver: Option<HitView>,
}

impl Hits {
    /// Identifiers of the matched monitors, in order.
    pub fn monitor_ids(&self) -> Vec<ViewId> {
        self.monitors.iter().map(|m| m.id.clone()).collect()
    }

    /// Identifier of the matched receiver.
    pub fn receiver_id(&self) -> Option<&ViewId> {
        self.receiver.as_ref().map(|r| &r.id)
    }
}

impl<T: ViewProtocol> ViewRegistry<T> {
    /// Find every monitoring view and the receiving view under `point`.
    ///
    /// `point` is in root coordinates. `exclude` (typically the dragged view)
    /// is skipped. Views are tested against their clipped absolute bounds, so
    /// parts scrolled out of a container never match; views whose bounds
    /// cannot be resolved are skipped.
    pub fn find_monitors_and_receiver(&self, point: Point, exclude: Option<&str>) -> Hits {
        let mut hits = Hits::default();
        let mut receptive: Vec<(HitView, f64)> = Vec::new();

        for id in self.ids() {
            if exclude == Some(id.as_str()) {
                continue;
            }
            let Some(view) = self.view(id.as_str()) else {
                continue;
            };
            let flags = view.flags();
            if !flags.intersects(ViewFlags::RECEPTIVE | ViewFlags::MONITORING) {
                continue;
            }
            let Some(bounds) = self.resolve_absolute(id.as_str(), true) else {
                continue;
            };
            if !is_inside(point, bounds) {
                continue;
            }
            let hit = HitView {
                id: id.clone(),
                bounds,
            };
            if flags.contains(ViewFlags::MONITORING) {
                hits.monitors.push(hit.clone());
            }
            if flags.contains(ViewFlags::RECEPTIVE) {
                let area = self
                    .resolve_absolute(id.as_str(), false)
                    .map_or(bounds.area(), |r| r.area());
                receptive.push((hit, area));
            }
        }

        hits.receiver = self.most_specific(&receptive);
        hits
    }

    fn most_specific(&self, candidates: &[(HitView, f64)]) -> Option<HitView> {
        let mut best: Option<(&HitView, f64)> = None;
        for (i, (candidate, area)) in candidates.iter().enumerate() {
            let is_ancestor_of_other = candidates.iter().enumerate().any(|(j, (other, _))| {
                i != j && self.is_ancestor(candidate.id.as_str(), other.id.as_str())
            });
            if is_ancestor_of_other {
                continue;
            }
            match best {
                Some((_, best_area)) if *area > best_area => {}
                _ => best = Some((candidate, *area)),
            }
        }
        best.map(|(hit, _)| hit.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn registry(views: &[(&str, Option<&str>, ViewFlags, Rect)]) -> ViewRegistry<ViewFlags> {
        let mut reg = ViewRegistry::new();
        for &(id, parent, flags, rect) in views {
            reg.register(id.into(), parent.map(ViewId::from), None);
            reg.update_protocol(id, flags);
            reg.update_measurements(id, Some(rect));
        }
        reg
    }

    fn ids(hits: &[HitView]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn nested_child_beats_parent() {
        let reg = registry(&[
            ("parent", None, ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 100.0, 100.0)),
            // Fully overlapping child.
            ("child", Some("parent"), ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 100.0, 100.0)),
        ]);
        let hits = reg.find_monitors_and_receiver(Point::new(50.0, 50.0), None);
        assert_eq!(hits.receiver_id().map(ViewId::as_str), Some("child"));
    }

    #[test]
    fn ancestor_excluded_even_if_smaller() {
        let reg = registry(&[
            ("parent", None, ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 50.0, 50.0)),
            // Larger than the parent, but clipped to it.
            ("child", Some("parent"), ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 500.0, 500.0)),
        ]);
        let hits = reg.find_monitors_and_receiver(Point::new(10.0, 10.0), None);
        assert_eq!(hits.receiver_id().map(ViewId::as_str), Some("child"));
    }

    #[test]
    fn smallest_sibling_wins() {
        let reg = registry(&[
            ("big", None, ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 100.0, 100.0)),
            ("small", None, ViewFlags::RECEPTIVE, Rect::new(40.0, 40.0, 60.0, 60.0)),
            ("medium", None, ViewFlags::RECEPTIVE, Rect::new(20.0, 20.0, 80.0, 80.0)),
        ]);
        let hits = reg.find_monitors_and_receiver(Point::new(50.0, 50.0), None);
        assert_eq!(hits.receiver_id().map(ViewId::as_str), Some("small"));
    }

    #[test]
    fn area_is_measured_unclipped() {
        let reg = registry(&[
            ("list", None, ViewFlags::empty(), Rect::new(0.0, 0.0, 100.0, 100.0)),
            // Clipped to 100 x 50, but 1000 x 50 in full.
            ("wide", Some("list"), ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 1000.0, 50.0)),
            ("zone", None, ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 80.0, 80.0)),
        ]);
        let hits = reg.find_monitors_and_receiver(Point::new(10.0, 10.0), None);
        assert_eq!(hits.receiver_id().map(ViewId::as_str), Some("zone"));
        assert_eq!(
            hits.receiver.map(|r| r.bounds),
            Some(Rect::new(0.0, 0.0, 80.0, 80.0))
        );
    }

    #[test]
    fn equal_area_later_registration_wins() {
        let reg = registry(&[
            ("first", None, ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 100.0, 100.0)),
            ("second", None, ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 100.0, 100.0)),
        ]);
        let hits = reg.find_monitors_and_receiver(Point::new(50.0, 50.0), None);
        assert_eq!(hits.receiver_id().map(ViewId::as_str), Some("second"));
    }

    #[test]
    fn monitors_in_registration_order_and_excluded_view_skipped() {
        let reg = registry(&[
            ("m1", None, ViewFlags::MONITORING, Rect::new(0.0, 0.0, 400.0, 400.0)),
            ("dragged", None, ViewFlags::MONITORING | ViewFlags::DRAGGABLE, Rect::new(0.0, 0.0, 100.0, 100.0)),
            ("both", None, ViewFlags::MONITORING | ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 200.0, 200.0)),
            ("plain", None, ViewFlags::DRAGGABLE, Rect::new(0.0, 0.0, 200.0, 200.0)),
            ("m2", None, ViewFlags::MONITORING, Rect::new(0.0, 0.0, 300.0, 300.0)),
        ]);
        let hits = reg.find_monitors_and_receiver(Point::new(50.0, 50.0), Some("dragged"));
        assert_eq!(ids(&hits.monitors), vec!["m1", "both", "m2"]);
        assert_eq!(hits.receiver_id().map(ViewId::as_str), Some("both"));
        assert_eq!(hits.monitor_ids().len(), 3);
    }

    #[test]
    fn scrolled_out_region_does_not_match() {
        let mut reg = registry(&[
            ("list", None, ViewFlags::empty(), Rect::new(0.0, 100.0, 200.0, 300.0)),
            ("row", Some("list"), ViewFlags::RECEPTIVE, Rect::new(0.0, 0.0, 200.0, 50.0)),
        ]);
        // Unclipped the row spans y 100..150 until the list scrolls.
        let scroll = crate::types::ScrollPosition::at(kurbo::Vec2::new(0.0, 30.0));
        reg.register("list".into(), None, Some(scroll));
        // Row now spans 70..120 absolute, but only 100..120 is visible.
        let above = reg.find_monitors_and_receiver(Point::new(10.0, 80.0), None);
        assert!(above.receiver.is_none(), "scrolled-out part must not receive");
        let visible = reg.find_monitors_and_receiver(Point::new(10.0, 110.0), None);
        assert_eq!(visible.receiver_id().map(ViewId::as_str), Some("row"));
        assert_eq!(
            visible.receiver.map(|r| r.bounds),
            Some(Rect::new(0.0, 100.0, 200.0, 120.0))
        );
    }

    #[test]
    fn unmeasured_views_are_skipped() {
        let mut reg = registry(&[(
            "zone",
            None,
            ViewFlags::RECEPTIVE | ViewFlags::MONITORING,
            Rect::new(0.0, 0.0, 10.0, 10.0),
        )]);
        reg.update_measurements("zone", None);
        let hits = reg.find_monitors_and_receiver(Point::new(5.0, 5.0), None);
        assert_eq!(hits, Hits::default());
    }
}
