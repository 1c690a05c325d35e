use kurbo::Point;

use crate::geom::{Circle, Radius};

use super::BoundaryEvent;

/// Watches the internal decisions of a [`Sweeper`](super::Sweeper).
///
/// Every method has a no-op default, and `()` observes nothing. This is the
/// hook for diagnostics like the `debug-svg` trace; it has no influence on
/// the output.
pub trait Observer {
    /// A disk joined the active window.
    fn circle_inserted(&mut self, _circle: &Circle, _radius: &Radius) {}

    /// A previously live crossing at `point` turned out to be inside the
    /// newly arrived disk `by`.
    fn crossing_occluded(&mut self, _point: Point, _by: &Circle) {}

    /// A freshly computed crossing at `point` was discarded because it is
    /// inside the already present disk `by`.
    fn crossing_rejected(&mut self, _point: Point, _by: &Circle) {}

    /// A boundary event was finalized.
    fn event_emitted(&mut self, _event: &BoundaryEvent) {}
}

impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn circle_inserted(&mut self, circle: &Circle, radius: &Radius) {
        (**self).circle_inserted(circle, radius)
    }

    fn crossing_occluded(&mut self, point: Point, by: &Circle) {
        (**self).crossing_occluded(point, by)
    }

    fn crossing_rejected(&mut self, point: Point, by: &Circle) {
        (**self).crossing_rejected(point, by)
    }

    fn event_emitted(&mut self, event: &BoundaryEvent) {
        (**self).event_emitted(event)
    }
}

/// Counts what happened during a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Disks inserted into the window.
    pub circles: usize,
    /// Crossings occluded after insertion.
    pub occluded: usize,
    /// Crossings discarded before insertion.
    pub rejected: usize,
    /// Crossing records emitted.
    pub crossings: usize,
    /// Standalone records emitted.
    pub standalone: usize,
}

impl Observer for Tally {
    fn circle_inserted(&mut self, _circle: &Circle, _radius: &Radius) {
        self.circles += 1;
    }

    fn crossing_occluded(&mut self, _point: Point, _by: &Circle) {
        self.occluded += 1;
    }

    fn crossing_rejected(&mut self, _point: Point, _by: &Circle) {
        self.rejected += 1;
    }

    fn event_emitted(&mut self, event: &BoundaryEvent) {
        if event.is_standalone() {
            self.standalone += 1;
        } else {
            self.crossings += 1;
        }
    }
}
