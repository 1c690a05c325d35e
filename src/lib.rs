#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
#[cfg(feature = "debug-svg")]
pub mod debug_svg;
mod geom;
mod num;
pub mod sweep;
pub mod text;

#[cfg(feature = "generators")]
pub mod generators;

// pub so that the fuzz target can use it, but it's really for testing
#[cfg(any(test, feature = "arbitrary"))]
#[doc(hidden)]
pub mod reference;

pub use geom::{crossing_point, d_sq, Circle, CircleId, Radius};
pub use sweep::{sweep, BoundaryEvent, LifecycleViolation, Observer, Policy, Sweeper, Tally};

/// The input was faulty, or the sweep was driven incorrectly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
    /// The radius was zero or negative.
    NonPositiveRadius,
    /// The radius was so small that its squared thresholds underflow.
    TinyRadius,
    /// A center arrived with a smaller `x` than the one before it.
    Unsorted {
        /// The `x` of the previous center.
        previous: f64,
        /// The offending `x`.
        x: f64,
    },
    /// A center (almost) coincided with the center of an active disk.
    ///
    /// Two disks with the same center have no well-defined crossing points.
    DegenerateInput {
        /// The disk that was already there.
        existing: CircleId,
        /// The `x` of the rejected center.
        x: f64,
        /// The `y` of the rejected center.
        y: f64,
    },
    /// The sweep's methods were called out of order.
    Lifecycle(LifecycleViolation),
    /// A token in the text input wasn't a number.
    Parse {
        /// The (1-based) line containing the token.
        line: usize,
    },
    /// The text input had an `x` coordinate without a matching `y`.
    OddCoordinateCount {
        /// The (1-based) line containing the unmatched coordinate.
        line: usize,
    },
}

impl From<LifecycleViolation> for Error {
    fn from(lv: LifecycleViolation) -> Self {
        Error::Lifecycle(lv)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the inputs was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
            Error::NonPositiveRadius => write!(f, "the radius must be positive"),
            Error::TinyRadius => write!(f, "the radius is too small to square"),
            Error::Unsorted { previous, x } => {
                write!(f, "centers must be sorted by x, but {x} came after {previous}")
            }
            Error::DegenerateInput { existing, x, y } => {
                write!(f, "center ({x}, {y}) coincides with the center of disk {existing}")
            }
            Error::Lifecycle(lv) => write!(f, "{lv}"),
            Error::Parse { line } => write!(f, "line {line}: expected a number"),
            Error::OddCoordinateCount { line } => {
                write!(f, "line {line}: an x coordinate without a y coordinate")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Computes the boundary events of the union of disks centered at `points`.
///
/// The points must be sorted by `x`. Point `i` becomes disk `CircleId(i)`,
/// and the events are returned in the order the sweep finalized them.
pub fn boundary(
    points: impl IntoIterator<Item = (f64, f64)>,
    radius: Radius,
) -> Result<Vec<BoundaryEvent>, Error> {
    let mut ret = Vec::new();
    sweep(points, radius, |ev| ret.push(ev))?;
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    #[test]
    fn two_pythagorean_disks() {
        let output = boundary([(0.0, 0.0), (6.0, 0.0)], Radius::new(5.0).unwrap()).unwrap();
        let text: Vec<String> = output.iter().map(ToString::to_string).collect();
        insta::assert_snapshot!(text.join("\n"), @r"
        1 0 3 -4
        0 1 3 4
        ");
    }

    #[test]
    fn errors_stop_the_sweep() {
        let err = boundary([(1.0, 0.0), (0.0, 0.0)], Radius::default()).unwrap_err();
        assert_eq!(
            err,
            Error::Unsorted {
                previous: 1.0,
                x: 0.0
            }
        );
        assert_eq!(
            err.to_string(),
            "centers must be sorted by x, but 0 came after 1"
        );
    }

    #[test]
    fn ring_around_a_disk() {
        // Six disks around a central one. The central disk's boundary is
        // entirely covered, so only crossings between neighbors on the ring
        // survive, one per neighboring pair.
        let mut points: Vec<(f64, f64)> = (0..6)
            .map(|k| {
                let theta = k as f64 * std::f64::consts::PI / 3.0;
                (0.8 * theta.cos(), 0.8 * theta.sin())
            })
            .collect();
        points.push((0.0, 0.0));
        points.sort_by(|p, q| p.0.total_cmp(&q.0));

        let output = boundary(points.iter().copied(), Radius::default()).unwrap();
        assert_eq!(output.len(), 6);
        for ev in &output {
            // Outer crossings are far from the middle.
            assert!(ev.point().distance(Point::ZERO) > 0.8);
            let (a, b) = ev.owners();
            assert!(points[a.0] != (0.0, 0.0) && points[b.0] != (0.0, 0.0));
        }
    }
}
