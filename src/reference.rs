//! A quadratic-time reference for the sweep, for testing.
//!
//! It applies the boundary rules to all pairs and triples of disks at once,
//! with exactly the same arithmetic as the sweep, so the two must agree
//! bit for bit (up to the order of the output).

use kurbo::Point;

use crate::{
    geom::{crossing_point, d_sq, CircleId, Radius},
    BoundaryEvent,
};

/// All pairs `(i, j)` with `i < j` of overlapping disks.
pub fn overlapping_pairs(centers: &[(f64, f64)], radius: &Radius) -> Vec<(usize, usize)> {
    let mut ret = Vec::new();
    for (j, &q) in centers.iter().enumerate() {
        for (i, &p) in centers[..j].iter().enumerate() {
            if d_sq(p.into(), q.into()) < radius.two_r_sq() {
                ret.push((i, j));
            }
        }
    }
    ret
}

/// The boundary events of the union of the disks, in no particular order.
pub fn boundary(centers: &[(f64, f64)], radius: &Radius) -> Vec<BoundaryEvent> {
    let points: Vec<Point> = centers.iter().map(|&p| p.into()).collect();
    let pairs = overlapping_pairs(centers, radius);
    let mut ret = Vec::new();

    for &(i, j) in &pairs {
        let dist_sq = d_sq(points[j], points[i]);
        // The later disk comes first, the way the sweep computes them.
        for (a, b) in [(j, i), (i, j)] {
            let point = crossing_point(points[a], points[b], dist_sq, radius);
            let covered = points
                .iter()
                .enumerate()
                .any(|(k, &c)| k != a && k != b && d_sq(c, point) < radius.r_sq());
            if !covered {
                ret.push(BoundaryEvent::Crossing {
                    a: CircleId(a),
                    b: CircleId(b),
                    point,
                });
            }
        }
    }

    for (i, &center) in points.iter().enumerate() {
        if pairs.iter().all(|&(a, b)| a != i && b != i) {
            ret.push(BoundaryEvent::Standalone {
                id: CircleId(i),
                center,
            });
        }
    }
    ret
}

/// Sorts events into an order that doesn't depend on how they were produced.
pub fn canonicalize(events: &mut [BoundaryEvent]) {
    events.sort_by(|e, f| {
        let key = |ev: &BoundaryEvent| {
            let p = ev.point();
            (ev.owners(), p.x.to_bits(), p.y.to_bits())
        };
        key(e).cmp(&key(f))
    });
}

/// Drops every center that is within `min_sep` of an earlier one.
pub fn well_separated(centers: Vec<(f64, f64)>, min_sep: f64) -> Vec<(f64, f64)> {
    let mut ret: Vec<(f64, f64)> = Vec::with_capacity(centers.len());
    for p in centers {
        if ret
            .iter()
            .all(|&q| d_sq(p.into(), q.into()) >= min_sep * min_sep)
        {
            ret.push(p);
        }
    }
    ret
}
