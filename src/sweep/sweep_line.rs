//! The sweep-line engine.
//!
//! Disks arrive in order of increasing center `x`. The frontier is the `x`
//! of the latest disk, and since nothing arriving later can be to the left
//! of it, anything sufficiently far to the left of the frontier is final:
//!
//! - a crossing more than `R` to the left can't be covered by a future disk,
//!   so it can be emitted (if nothing has covered it so far);
//! - a disk more than `2R` to the left can't overlap a future disk, so it
//!   can be dropped (and reported, if it never overlapped anything).
//!
//! Each new disk first lets the frontier advance (flushing crossings and
//! retiring disks), then occludes the live crossings it covers, and finally
//! computes its own crossings with the nearby disks. A new crossing is only
//! kept if none of those nearby disks covers it. Every disk that could cover
//! it is among them, because a crossing is within `R` of both of its owners'
//! centers, and a disk covering it has its center within `R` of the crossing.

use kurbo::Point;

use crate::{
    geom::{crossing_point, d_sq, Circle, CircleId, Radius},
    Error,
};

use super::{
    circles::ActiveCircles,
    crossings::{ActiveCrossings, CrossingState},
    BoundaryEvent, Observer,
};

/// What to do with disks that never overlap anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Report them as [`BoundaryEvent::Standalone`] when they leave the window.
    #[default]
    ReportStandalone,
    /// Drop them silently: the output consists of crossings only.
    DropStandalone,
}

/// A [`Sweeper`] method was called out of order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleViolation {
    /// `push` or `end` was called before `begin`.
    NotStarted,
    /// `push` or `end` was called after `end`, without a new `begin`.
    Finished,
}

impl std::fmt::Display for LifecycleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleViolation::NotStarted => write!(f, "the sweep was not started"),
            LifecycleViolation::Finished => write!(f, "the sweep has already finished"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Sweeping,
    Finished,
}

/// Computes the boundary of a union of equal disks, one disk at a time.
///
/// The lifecycle is [`begin`](Sweeper::begin), then any number of
/// [`push`](Sweeper::push)es with non-decreasing `x`, then
/// [`end`](Sweeper::end). Boundary events are handed to the sink passed to
/// `push` and `end` as soon as they are final, in the order that the
/// frontier passes them. After `end`, the sweeper can be reused by calling
/// `begin` again.
///
/// The observer `O` gets to watch the sweep; see [`Observer`].
#[derive(Clone, Debug)]
pub struct Sweeper<O = ()> {
    radius: Radius,
    policy: Policy,
    phase: Phase,
    next_id: usize,
    frontier: Option<f64>,
    circles: ActiveCircles,
    crossings: ActiveCrossings,
    observer: O,
}

impl Sweeper {
    /// Creates a sweeper for disks of the given radius.
    pub fn new(radius: Radius) -> Self {
        Sweeper::with_observer(radius, ())
    }
}

impl Default for Sweeper {
    fn default() -> Self {
        Sweeper::new(Radius::default())
    }
}

fn emit<O: Observer>(observer: &mut O, sink: &mut impl FnMut(BoundaryEvent), event: BoundaryEvent) {
    tracing::trace!(%event, "emit");
    observer.event_emitted(&event);
    sink(event);
}

fn check_coordinate(x: f64) -> Result<(), Error> {
    if x.is_nan() {
        Err(Error::NaN)
    } else if x.is_infinite() {
        Err(Error::Infinity)
    } else {
        Ok(())
    }
}

impl<O: Observer> Sweeper<O> {
    /// Creates a sweeper that reports its internal decisions to `observer`.
    pub fn with_observer(radius: Radius, observer: O) -> Self {
        Sweeper {
            radius,
            policy: Policy::default(),
            phase: Phase::Idle,
            next_id: 0,
            frontier: None,
            circles: ActiveCircles::default(),
            crossings: ActiveCrossings::default(),
            observer,
        }
    }

    /// Chooses whether isolated disks get reported.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// The disk radius.
    pub fn radius(&self) -> &Radius {
        &self.radius
    }

    /// The policy for isolated disks.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consumes the sweeper, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// The `x` coordinate of the latest disk, if any disk was pushed since `begin`.
    pub fn frontier(&self) -> Option<f64> {
        self.frontier
    }

    /// The id that the next pushed disk will get.
    pub fn next_id(&self) -> CircleId {
        CircleId(self.next_id)
    }

    /// The disks that can still overlap future disks, in no particular order.
    pub fn active_circles(&self) -> impl Iterator<Item = &Circle> + '_ {
        self.circles.iter()
    }

    /// The crossings that are not yet final and not (yet) covered by any
    /// disk, in increasing `y` order.
    pub fn live_crossings(&self) -> impl Iterator<Item = (CircleId, CircleId, Point)> + '_ {
        self.crossings.live().map(|c| (c.a, c.b, c.point))
    }

    /// The number of crossings waiting for the frontier to pass, covered or not.
    pub fn pending_crossings(&self) -> usize {
        self.crossings.len()
    }

    /// Starts a new sweep, forgetting everything about the previous one.
    pub fn begin(&mut self) {
        tracing::debug!(radius = self.radius.get(), policy = ?self.policy, "begin sweep");
        self.phase = Phase::Sweeping;
        self.next_id = 0;
        self.frontier = None;
        self.circles.clear();
        self.crossings.clear();
    }

    fn check_sweeping(&self) -> Result<(), Error> {
        match self.phase {
            Phase::Sweeping => Ok(()),
            Phase::Idle => Err(Error::Lifecycle(LifecycleViolation::NotStarted)),
            Phase::Finished => Err(Error::Lifecycle(LifecycleViolation::Finished)),
        }
    }

    /// Adds the disk centered at `(x, y)`, returning its id.
    ///
    /// `x` must not be smaller than the `x` of any disk pushed before. Events
    /// that become final because of the frontier moving to `x` go to `sink`.
    ///
    /// A disk whose center (almost) coincides with an existing one is
    /// rejected with [`Error::DegenerateInput`]: it doesn't get an id, doesn't
    /// move the frontier and doesn't take part in the sweep, but the sweeper
    /// stays usable.
    pub fn push(
        &mut self,
        x: f64,
        y: f64,
        sink: &mut impl FnMut(BoundaryEvent),
    ) -> Result<CircleId, Error> {
        self.check_sweeping()?;
        check_coordinate(x)?;
        check_coordinate(y)?;
        if let Some(previous) = self.frontier {
            if x < previous {
                return Err(Error::Unsorted { previous, x });
            }
        }
        // Nothing changes until the center is known to be acceptable. A twin
        // is within `2R` of the center, so it can't have been retired yet.
        let center = Point::new(x, y);
        let two_r = self.radius.two_r();
        if let Some(twin) = self
            .circles
            .in_band(y - two_r, y + two_r)
            .find(|c| d_sq(center, c.center) < self.radius.degenerate_sq())
        {
            return Err(Error::DegenerateInput {
                existing: twin.id,
                x,
                y,
            });
        }
        self.frontier = Some(x);

        let r = self.radius.get();
        let left = x - r;
        self.flush_crossings(left, sink);
        self.retire_circles(left - r, sink);

        let candidates: Vec<Circle> = self
            .circles
            .in_band(y - two_r, y + two_r)
            .copied()
            .collect();

        let circle = Circle {
            id: CircleId(self.next_id),
            center,
        };
        self.next_id += 1;

        self.occlude(&circle);
        let overlapped = self.overlap_and_insert(&circle, &candidates);
        self.insert_circle(circle, !overlapped);

        #[cfg(feature = "slow-asserts")]
        self.check_invariants();

        tracing::trace!(
            circles = self.circles.len(),
            isolated = self.circles.isolated_len(),
            live = self.crossings.live_len(),
            pending = self.crossings.len(),
            "window"
        );
        Ok(circle.id)
    }

    /// Finishes the sweep, sending all the remaining events to `sink`.
    pub fn end(&mut self, sink: &mut impl FnMut(BoundaryEvent)) -> Result<(), Error> {
        self.check_sweeping()?;
        self.flush_crossings(f64::INFINITY, sink);
        self.retire_circles(f64::INFINITY, sink);
        debug_assert_eq!(self.circles.len(), 0);
        debug_assert_eq!(self.crossings.len(), 0);
        self.phase = Phase::Finished;
        tracing::debug!(circles = self.next_id, "end sweep");
        Ok(())
    }

    /// Finalizes the crossings with `x < left`.
    fn flush_crossings(&mut self, left: f64, sink: &mut impl FnMut(BoundaryEvent)) {
        while let Some(crossing) = self.crossings.pop_before(left) {
            match crossing.state {
                CrossingState::Live => emit(
                    &mut self.observer,
                    sink,
                    BoundaryEvent::Crossing {
                        a: crossing.a,
                        b: crossing.b,
                        point: crossing.point,
                    },
                ),
                CrossingState::Occluded => {
                    tracing::trace!(a = ?crossing.a, b = ?crossing.b, "drop occluded crossing");
                }
            }
        }
    }

    /// Drops the disks with `x < threshold`, reporting the isolated ones.
    fn retire_circles(&mut self, threshold: f64, sink: &mut impl FnMut(BoundaryEvent)) {
        while let Some((circle, isolated)) = self.circles.pop_before(threshold) {
            tracing::trace!(id = ?circle.id, isolated, "retire circle");
            if isolated {
                emit(
                    &mut self.observer,
                    sink,
                    BoundaryEvent::Standalone {
                        id: circle.id,
                        center: circle.center,
                    },
                );
            }
        }
    }

    /// Marks the live crossings covered by `circle` as occluded.
    fn occlude(&mut self, circle: &Circle) {
        let observer = &mut self.observer;
        self.crossings
            .occlude_near(circle.center, &self.radius, |crossing| {
                tracing::trace!(a = ?crossing.a, b = ?crossing.b, by = ?circle.id, "occlude crossing");
                observer.crossing_occluded(crossing.point, circle);
            });
    }

    /// Computes the crossings between `circle` and the overlapping
    /// `candidates`, keeping the ones that no candidate covers.
    ///
    /// Returns true if `circle` overlaps any candidate.
    fn overlap_and_insert(&mut self, circle: &Circle, candidates: &[Circle]) -> bool {
        let mut overlapped = false;
        for other in candidates {
            let dist_sq = d_sq(circle.center, other.center);
            if dist_sq >= self.radius.two_r_sq() {
                continue;
            }
            overlapped = true;
            self.circles.mark_overlapped(other.id);

            for (c1, c2) in [(circle, other), (other, circle)] {
                let point = crossing_point(c1.center, c2.center, dist_sq, &self.radius);
                self.insert_unless_covered(c1.id, c2.id, point, candidates);
            }
        }
        overlapped
    }

    fn insert_unless_covered(&mut self, a: CircleId, b: CircleId, point: Point, candidates: &[Circle]) {
        let r_sq = self.radius.r_sq();
        let cover = candidates
            .iter()
            .find(|k| k.id != a && k.id != b && d_sq(k.center, point) < r_sq);
        match cover {
            Some(k) => {
                tracing::trace!(?a, ?b, by = ?k.id, "reject crossing");
                self.observer.crossing_rejected(point, k);
            }
            None => {
                tracing::trace!(?a, ?b, x = point.x, y = point.y, "insert crossing");
                self.crossings.insert(a, b, point);
            }
        }
    }

    fn insert_circle(&mut self, circle: Circle, isolated: bool) {
        let isolated = isolated && self.policy == Policy::ReportStandalone;
        tracing::trace!(id = ?circle.id, x = circle.center.x, y = circle.center.y, isolated, "insert circle");
        self.observer.circle_inserted(&circle, &self.radius);
        self.circles.insert(circle, isolated);
    }

    /// Checks the sweep's invariants, panicking if any is violated.
    ///
    /// This is quadratic in the size of the window.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub(crate) fn check_invariants(&self) {
        self.circles.check_consistency();
        self.crossings.check_consistency();

        let Some(frontier) = self.frontier else {
            return;
        };
        let r = self.radius.get();
        let left = frontier - r;
        if let Some(min_x) = self.circles.min_x() {
            assert!(min_x >= left - r, "disk at x = {min_x} outlived the window");
        }
        for crossing in self.crossings.live() {
            assert!(crossing.point.x >= left);
            for circle in self.circles.iter() {
                if circle.id != crossing.a && circle.id != crossing.b {
                    assert!(
                        d_sq(circle.center, crossing.point) >= self.radius.r_sq(),
                        "{crossing:?} is live but covered by {circle:?}"
                    );
                }
            }
        }
        for circle in self.circles.iter() {
            if self.circles.is_isolated(circle.id) {
                for other in self.circles.iter() {
                    if other.id != circle.id {
                        assert!(d_sq(circle.center, other.center) >= self.radius.two_r_sq());
                    }
                }
            }
        }
    }
}

/// Runs a whole sweep over `points`, which must be sorted by `x`.
///
/// This is `begin`, one `push` per point, and `end`. The first error stops
/// the sweep; events emitted before it have already been passed to `sink`.
pub fn sweep(
    points: impl IntoIterator<Item = (f64, f64)>,
    radius: Radius,
    mut sink: impl FnMut(BoundaryEvent),
) -> Result<(), Error> {
    let mut sweeper = Sweeper::new(radius);
    sweeper.begin();
    for (x, y) in points {
        sweeper.push(x, y, &mut sink)?;
    }
    sweeper.end(&mut sink)
}
