//! The disks in the active window.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap, HashMap, HashSet},
};

use crate::{
    geom::{Circle, CircleId},
    num::CheapOrderedFloat,
};

/// The disks close enough to the sweep frontier to still interact with
/// future disks.
///
/// The same disks are indexed twice: by `y` for band queries, and by `x` in
/// a min-heap so that we know which disk leaves the window next. The subset
/// of disks that have not (yet) overlapped anything is tracked separately.
#[derive(Clone, Debug, Default)]
pub(crate) struct ActiveCircles {
    circles: HashMap<CircleId, Circle>,
    by_y: BTreeSet<(CheapOrderedFloat, CircleId)>,
    retirement: BinaryHeap<Reverse<(CheapOrderedFloat, CircleId)>>,
    isolated: HashSet<CircleId>,
}

impl ActiveCircles {
    pub fn clear(&mut self) {
        self.circles.clear();
        self.by_y.clear();
        self.retirement.clear();
        self.isolated.clear();
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn isolated_len(&self) -> usize {
        self.isolated.len()
    }

    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn is_isolated(&self, id: CircleId) -> bool {
        self.isolated.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Circle> + '_ {
        self.circles.values()
    }

    pub fn insert(&mut self, circle: Circle, isolated: bool) {
        let Circle { id, center } = circle;
        self.circles.insert(id, circle);
        self.by_y.insert((center.y.into(), id));
        self.retirement.push(Reverse((center.x.into(), id)));
        if isolated {
            self.isolated.insert(id);
        }
    }

    /// All active disks whose center has `y` in `[y0, y1)`, in increasing `y` order.
    pub fn in_band(&self, y0: f64, y1: f64) -> impl Iterator<Item = &Circle> + '_ {
        // The smallest id sorts first among equal `y`s, so these bounds
        // include every center at `y0` and none at `y1`.
        let start = (CheapOrderedFloat::from(y0), CircleId(0));
        let end = (CheapOrderedFloat::from(y1), CircleId(0));
        self.by_y
            .range(start..end)
            .map(|(_, id)| &self.circles[id])
    }

    /// Records that `id` overlaps some other disk.
    pub fn mark_overlapped(&mut self, id: CircleId) {
        self.isolated.remove(&id);
    }

    /// The smallest center `x` in the window.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn min_x(&self) -> Option<f64> {
        self.retirement
            .peek()
            .map(|Reverse((x, _))| x.into_inner())
    }

    /// Removes the disk with the smallest center `x`, if that `x` is less
    /// than `threshold`.
    ///
    /// Returns the disk, and whether it was still isolated.
    pub fn pop_before(&mut self, threshold: f64) -> Option<(Circle, bool)> {
        let Reverse((x, id)) = *self.retirement.peek()?;
        if x.into_inner() >= threshold {
            return None;
        }
        self.retirement.pop();
        let circle = self.circles.remove(&id)?;
        let removed = self.by_y.remove(&(circle.center.y.into(), id));
        debug_assert!(removed);
        let isolated = self.isolated.remove(&id);
        Some((circle, isolated))
    }

    /// Checks that the three views agree with one another.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn check_consistency(&self) {
        assert_eq!(self.by_y.len(), self.circles.len());
        assert_eq!(self.retirement.len(), self.circles.len());
        for (y, id) in &self.by_y {
            assert_eq!(self.circles[id].center.y, y.into_inner());
        }
        for Reverse((x, id)) in &self.retirement {
            assert_eq!(self.circles[id].center.x, x.into_inner());
        }
        for id in &self.isolated {
            assert!(self.circles.contains_key(id));
        }
    }
}
