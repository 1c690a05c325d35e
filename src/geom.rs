//! Geometric primitives: the shared disk radius, disks, and the crossing
//! points of two disk boundaries.

use kurbo::{Point, Vec2};

use crate::Error;

/// Identifies a disk.
///
/// Ids are handed out by the sweep in arrival order, starting from zero.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CircleId(pub usize);

impl_typed_idx!(CircleId, "c");

impl std::fmt::Display for CircleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The radius shared by every disk, together with the thresholds derived from it.
///
/// All the distance tests in the sweep compare squared distances, so we
/// precompute `R²` and `(2R)²` once.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Radius {
    r: f64,
    two_r: f64,
    r_sq: f64,
    two_r_sq: f64,
    degenerate_sq: f64,
}

impl Default for Radius {
    /// The reference radius, `0.5`, for which overlapping disks are exactly
    /// the ones with centers less than one unit apart.
    fn default() -> Self {
        Radius::from_finite(0.5)
    }
}

impl Radius {
    /// Two centers closer than this (relative to the radius) are treated as
    /// the same center.
    pub const DEGENERATE_SEPARATION: f64 = 1e-9;

    /// Validates a radius.
    ///
    /// The radius must be finite and strictly positive. It must also be
    /// small enough that its derived thresholds are finite, and large enough
    /// that none of them underflows.
    pub fn new(r: f64) -> Result<Self, Error> {
        if r.is_nan() {
            return Err(Error::NaN);
        }
        if r.is_infinite() {
            return Err(Error::Infinity);
        }
        if r <= 0.0 {
            return Err(Error::NonPositiveRadius);
        }
        let ret = Radius::from_finite(r);
        if !ret.two_r_sq.is_finite() {
            return Err(Error::Infinity);
        }
        if !ret.r_sq.is_normal() || !ret.degenerate_sq.is_normal() {
            return Err(Error::TinyRadius);
        }
        Ok(ret)
    }

    fn from_finite(r: f64) -> Self {
        let min_sep = r * Self::DEGENERATE_SEPARATION;
        Radius {
            r,
            two_r: 2.0 * r,
            r_sq: r * r,
            two_r_sq: 4.0 * r * r,
            degenerate_sq: min_sep * min_sep,
        }
    }

    /// The radius, `R`.
    pub fn get(&self) -> f64 {
        self.r
    }

    /// The diameter, `2R`: the width of the active window.
    pub fn two_r(&self) -> f64 {
        self.two_r
    }

    /// `R²`, the squared distance below which a point is inside a disk.
    pub fn r_sq(&self) -> f64 {
        self.r_sq
    }

    /// `4R²`, the squared center distance below which two disks overlap.
    pub fn two_r_sq(&self) -> f64 {
        self.two_r_sq
    }

    pub(crate) fn degenerate_sq(&self) -> f64 {
        self.degenerate_sq
    }
}

/// A disk, identified by its id and located by its center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Circle {
    /// The disk's identity, assigned in arrival order.
    pub id: CircleId,
    /// The disk's center.
    pub center: Point,
}

/// The squared Euclidean distance between two points.
#[inline]
pub fn d_sq(p: Point, q: Point) -> f64 {
    (p - q).hypot2()
}

/// Computes one of the two points where the boundaries of `c1` and `c2` cross.
///
/// `dist_sq` is the already-computed squared distance between the two
/// centers, which must satisfy `0 < dist_sq < 4R²`.
///
/// The returned point lies to the left of the vector from `c1` to `c2`, so
/// calling this with the arguments swapped gives the other crossing point.
pub fn crossing_point(c1: Point, c2: Point, dist_sq: f64, radius: &Radius) -> Point {
    debug_assert!(dist_sq > 0.0 && dist_sq < radius.two_r_sq());

    // With M the midpoint of c1 and c2, the triangle c1, M, P is right-angled
    // at M, with hypotenuse R and one leg |c1 M| = d / 2. The other leg is
    // the half-chord, and it points along the left normal of c1 -> c2.
    let v = c2 - c1;
    let mid = c1 + v / 2.0;
    let h = (radius.r_sq() - dist_sq / 4.0).sqrt();
    let normal = Vec2::new(-v.y, v.x) / dist_sq.sqrt();
    mid + normal * h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_validation() {
        assert_eq!(Radius::new(0.0), Err(Error::NonPositiveRadius));
        assert_eq!(Radius::new(-1.0), Err(Error::NonPositiveRadius));
        assert_eq!(Radius::new(f64::NAN), Err(Error::NaN));
        assert_eq!(Radius::new(f64::INFINITY), Err(Error::Infinity));
        assert_eq!(Radius::new(1e200), Err(Error::Infinity));
        assert_eq!(Radius::new(1e-200), Err(Error::TinyRadius));
        assert_eq!(Radius::new(f64::MIN_POSITIVE), Err(Error::TinyRadius));
        // `R²` is fine here, but the coincidence threshold isn't.
        assert_eq!(Radius::new(1e-150), Err(Error::TinyRadius));
        assert!(Radius::new(1e-100).is_ok());

        let r = Radius::new(2.0).unwrap();
        assert_eq!(r.get(), 2.0);
        assert_eq!(r.two_r(), 4.0);
        assert_eq!(r.r_sq(), 4.0);
        assert_eq!(r.two_r_sq(), 16.0);
    }

    #[test]
    fn default_radius() {
        let r = Radius::default();
        assert_eq!(r.get(), 0.5);
        assert_eq!(r.two_r_sq(), 1.0);
    }

    #[test]
    fn pythagorean_crossings() {
        // 3-4-5 triangles: the crossings are exactly representable.
        let r = Radius::new(5.0).unwrap();
        let c1 = Point::new(0.0, 0.0);
        let c2 = Point::new(6.0, 0.0);
        let dist_sq = d_sq(c1, c2);
        assert_eq!(dist_sq, 36.0);

        assert_eq!(crossing_point(c1, c2, dist_sq, &r), Point::new(3.0, 4.0));
        assert_eq!(crossing_point(c2, c1, dist_sq, &r), Point::new(3.0, -4.0));
    }

    #[test]
    fn crossings_lie_on_both_circles() {
        let r = Radius::default();
        let c1 = Point::new(0.1, -0.3);
        let c2 = Point::new(0.7, 0.2);
        let dist_sq = d_sq(c1, c2);
        for p in [
            crossing_point(c1, c2, dist_sq, &r),
            crossing_point(c2, c1, dist_sq, &r),
        ] {
            assert!((d_sq(p, c1) - r.r_sq()).abs() < 1e-12);
            assert!((d_sq(p, c2) - r.r_sq()).abs() < 1e-12);
        }
    }

    #[test]
    fn swapped_arguments_give_the_other_point() {
        let r = Radius::default();
        let c1 = Point::new(0.0, 0.0);
        let c2 = Point::new(0.0, 0.6);
        let dist_sq = d_sq(c1, c2);
        let p = crossing_point(c1, c2, dist_sq, &r);
        let q = crossing_point(c2, c1, dist_sq, &r);

        // Going up from c1, the left side is the negative x side.
        assert!(p.x < 0.0);
        assert!(q.x > 0.0);
        assert!((p.y - 0.3).abs() < 1e-12);
        assert!((q.y - 0.3).abs() < 1e-12);
        assert!((p.x + q.x).abs() < 1e-12);
    }
}
