//! The plain-text formats: whitespace-separated centers in, `a b x y`
//! records out.

use std::io::Write;

use crate::{BoundaryEvent, Error};

/// Parses whitespace-separated numbers, taken two at a time as `(x, y)`.
///
/// Line breaks carry no meaning: `"0 0\n1 1"` and `"0 0 1\n1"` describe the
/// same two centers. Errors report the 1-based line of the offending token.
pub fn parse_centers(input: &str) -> Result<Vec<(f64, f64)>, Error> {
    let mut ret = Vec::new();
    let mut pending_x: Option<(f64, usize)> = None;

    for (line_idx, line) in input.lines().enumerate() {
        let line_no = line_idx + 1;
        for token in line.split_whitespace() {
            let val: f64 = token.parse().map_err(|_| Error::Parse { line: line_no })?;
            match pending_x.take() {
                Some((x, _)) => ret.push((x, val)),
                None => pending_x = Some((val, line_no)),
            }
        }
    }

    if let Some((_, line)) = pending_x {
        return Err(Error::OddCoordinateCount { line });
    }
    Ok(ret)
}

/// Writes one `a b x y` record per line.
pub fn write_events<'a, W: Write>(
    mut out: W,
    events: impl IntoIterator<Item = &'a BoundaryEvent>,
) -> std::io::Result<()> {
    for ev in events {
        writeln!(out, "{ev}")?;
    }
    Ok(())
}

/// Sorts centers by `x`, the order that the sweep requires.
///
/// The sort is stable, so centers with equal `x` keep their relative order.
/// Disk ids are assigned after sorting, so they refer to positions in the
/// sorted list.
pub fn sort_centers(centers: &mut [(f64, f64)]) {
    centers.sort_by(|p, q| p.0.total_cmp(&q.0));
}
