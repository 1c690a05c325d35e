//! Crossing points that are computed but not yet finalized.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap},
};

use kurbo::Point;

use crate::{
    geom::{d_sq, CircleId, Radius},
    num::CheapOrderedFloat,
};

/// A handle to a crossing in the arena.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub(crate) struct CrossingIdx(usize);

impl_typed_idx!(CrossingArena, CrossingIdx, "x");

/// Whether a crossing can still end up on the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CrossingState {
    /// No disk seen so far covers the crossing.
    Live,
    /// Some disk covers the crossing, so it is interior to the union.
    ///
    /// This is final: an occluded crossing never becomes live again.
    Occluded,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Crossing {
    pub a: CircleId,
    pub b: CircleId,
    pub point: Point,
    pub state: CrossingState,
    /// Insertion order, used to break ties between crossings with equal `x`.
    seq: u64,
}

/// The crossings in the active window.
///
/// The records live in an arena. Live crossings are additionally indexed by
/// `y` for band queries, and every crossing (live or not) sits in a min-heap
/// by `x` until the frontier has moved far enough past it to finalize it.
/// The ordering keys are copied out of the record on insertion and never
/// change, so occluding a crossing only touches its state tag.
#[derive(Clone, Debug, Default)]
pub(crate) struct ActiveCrossings {
    arena: CrossingArena<Crossing>,
    by_y: BTreeSet<(CheapOrderedFloat, CrossingIdx)>,
    emission: BinaryHeap<Reverse<(CheapOrderedFloat, u64, CrossingIdx)>>,
    next_seq: u64,
}

impl ActiveCrossings {
    pub fn clear(&mut self) {
        self.arena.clear();
        self.by_y.clear();
        self.emission.clear();
        self.next_seq = 0;
    }

    /// The number of crossings waiting to be finalized, including occluded ones.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// The number of live crossings.
    pub fn live_len(&self) -> usize {
        self.by_y.len()
    }

    /// Iterates over the live crossings, in increasing `y` order.
    pub fn live(&self) -> impl Iterator<Item = &Crossing> + '_ {
        self.by_y.iter().map(|(_, idx)| &self.arena[*idx])
    }

    /// Adds a new live crossing of the boundaries of `a` and `b`.
    pub fn insert(&mut self, a: CircleId, b: CircleId, point: Point) -> CrossingIdx {
        let seq = self.next_seq;
        self.next_seq += 1;
        let idx = self.arena.insert(Crossing {
            a,
            b,
            point,
            state: CrossingState::Live,
            seq,
        });
        self.by_y.insert((point.y.into(), idx));
        self.emission.push(Reverse((point.x.into(), seq, idx)));
        idx
    }

    /// Occludes every live crossing strictly inside the disk of the given
    /// radius around `center`.
    ///
    /// Occluded crossings leave the `y` index immediately, since nothing needs
    /// to find them any more, but they keep their place in the emission queue.
    /// `on_occluded` sees each newly occluded crossing.
    pub fn occlude_near(
        &mut self,
        center: Point,
        radius: &Radius,
        mut on_occluded: impl FnMut(&Crossing),
    ) {
        let r = radius.get();
        let r_sq = radius.r_sq();
        let start = (CheapOrderedFloat::from(center.y - r), CrossingIdx(0));
        let end = (CheapOrderedFloat::from(center.y + r), CrossingIdx(0));
        let covered: Vec<CrossingIdx> = self
            .by_y
            .range(start..end)
            .map(|&(_, idx)| idx)
            .filter(|&idx| d_sq(center, self.arena[idx].point) < r_sq)
            .collect();

        for idx in covered {
            let crossing = &mut self.arena[idx];
            debug_assert_eq!(crossing.state, CrossingState::Live);
            crossing.state = CrossingState::Occluded;
            let crossing = *crossing;
            let removed = self.by_y.remove(&(crossing.point.y.into(), idx));
            debug_assert!(removed);
            on_occluded(&crossing);
        }
    }

    /// Removes the crossing with the smallest `x`, if that `x` is less than
    /// `left`.
    ///
    /// The crossing is returned whatever its state; callers only report live ones.
    pub fn pop_before(&mut self, left: f64) -> Option<Crossing> {
        let Reverse((x, _, idx)) = *self.emission.peek()?;
        if x.into_inner() >= left {
            return None;
        }
        self.emission.pop();
        let crossing = self.arena.remove(idx)?;
        if crossing.state == CrossingState::Live {
            let removed = self.by_y.remove(&(crossing.point.y.into(), idx));
            debug_assert!(removed);
        }
        Some(crossing)
    }

    /// Checks that the arena and both indices agree with one another.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn check_consistency(&self) {
        assert_eq!(self.emission.len(), self.arena.len());
        for Reverse((x, seq, idx)) in &self.emission {
            let crossing = &self.arena[*idx];
            assert_eq!(crossing.point.x, x.into_inner());
            assert_eq!(crossing.seq, *seq);
        }
        let live = self
            .arena
            .iter()
            .filter(|(_, c)| c.state == CrossingState::Live)
            .count();
        assert_eq!(live, self.by_y.len());
        for (y, idx) in &self.by_y {
            let crossing = &self.arena[*idx];
            assert_eq!(crossing.state, CrossingState::Live);
            assert_eq!(crossing.point.y, y.into_inner());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(a: usize, b: usize) -> (CircleId, CircleId) {
        (CircleId(a), CircleId(b))
    }

    #[test]
    fn emission_in_x_order() {
        let mut crossings = ActiveCrossings::default();
        let (a, b) = ids(0, 1);
        crossings.insert(a, b, Point::new(2.0, 0.0));
        crossings.insert(b, a, Point::new(1.0, 5.0));
        crossings.insert(a, b, Point::new(1.0, -5.0));
        crossings.check_consistency();

        assert_eq!(crossings.pop_before(1.0), None);
        let first = crossings.pop_before(1.5).unwrap();
        assert_eq!(first.point, Point::new(1.0, 5.0));
        // Ties in `x` come out in insertion order.
        let second = crossings.pop_before(1.5).unwrap();
        assert_eq!(second.point, Point::new(1.0, -5.0));
        assert_eq!(crossings.pop_before(1.5), None);
        assert_eq!(crossings.len(), 1);
        crossings.check_consistency();
    }

    #[test]
    fn occlusion_is_strict_and_final() {
        let mut crossings = ActiveCrossings::default();
        let (a, b) = ids(0, 1);
        crossings.insert(a, b, Point::new(0.0, 0.4));
        crossings.insert(a, b, Point::new(0.0, -0.5));

        let mut seen = Vec::new();
        crossings.occlude_near(Point::new(0.0, 0.0), &Radius::default(), |c| seen.push(c.point));
        // The point at distance exactly 0.5 stays live.
        assert_eq!(seen, vec![Point::new(0.0, 0.4)]);
        assert_eq!(crossings.live_len(), 1);
        crossings.check_consistency();

        // A second occluder doesn't see the already-occluded crossing.
        seen.clear();
        crossings.occlude_near(Point::new(0.0, 0.3), &Radius::default(), |c| seen.push(c.point));
        assert_eq!(seen, vec![]);

        let c = crossings.pop_before(f64::INFINITY).unwrap();
        assert_eq!(c.state, CrossingState::Occluded);
        let c = crossings.pop_before(f64::INFINITY).unwrap();
        assert_eq!(c.state, CrossingState::Live);
        assert!(crossings.pop_before(f64::INFINITY).is_none());
        crossings.check_consistency();
    }

    #[test]
    fn slots_are_reused() {
        let mut crossings = ActiveCrossings::default();
        let (a, b) = ids(0, 1);
        let first = crossings.insert(a, b, Point::new(0.0, 0.0));
        crossings.pop_before(1.0).unwrap();
        let second = crossings.insert(a, b, Point::new(3.0, 0.0));
        assert_eq!(first, second);
        crossings.check_consistency();
    }
}
