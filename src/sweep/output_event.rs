use kurbo::Point;

use crate::geom::CircleId;

/// A finalized piece of the union's boundary.
///
/// Events are only produced once no disk arriving later in the sweep can
/// affect them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum BoundaryEvent {
    /// The boundaries of disks `a` and `b` cross at `point`, and no other disk
    /// covers it.
    ///
    /// Each overlapping pair has two crossing points. The one reported as
    /// `(a, b)` lies to the left of the vector from `a`'s center to `b`'s
    /// center; the other one is reported as `(b, a)`.
    Crossing {
        /// The disk whose center the left-hand convention is measured from.
        a: CircleId,
        /// The other disk.
        b: CircleId,
        /// Where the two boundaries cross.
        point: Point,
    },
    /// Disk `id` overlaps no other disk, so its whole circumference is boundary.
    Standalone {
        /// The isolated disk.
        id: CircleId,
        /// Its center.
        center: Point,
    },
}

impl BoundaryEvent {
    /// The two disk ids of this record; a standalone disk is paired with itself.
    pub fn owners(&self) -> (CircleId, CircleId) {
        match *self {
            BoundaryEvent::Crossing { a, b, .. } => (a, b),
            BoundaryEvent::Standalone { id, .. } => (id, id),
        }
    }

    /// The crossing point, or the center of a standalone disk.
    pub fn point(&self) -> Point {
        match *self {
            BoundaryEvent::Crossing { point, .. } => point,
            BoundaryEvent::Standalone { center, .. } => center,
        }
    }

    /// Is this a standalone disk?
    pub fn is_standalone(&self) -> bool {
        matches!(self, BoundaryEvent::Standalone { .. })
    }
}

/// Writes the record as `a b x y`.
///
/// Coordinates use the shortest representation that parses back to the same
/// `f64`.
impl std::fmt::Display for BoundaryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.owners();
        let p = self.point();
        write!(f, "{a} {b} {} {}", p.x, p.y)
    }
}
