//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{reference, sweep::Tally, Policy, Radius, Sweeper};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

/// Generate up to `max_len` centers in `[0, width] x [0, height]`, sorted by `x`.
///
/// Sometimes a center copies the `x` or `y` of the previous one, since
/// equal coordinates are where the sweep's tie-breaking matters. Centers
/// that nearly coincide with an earlier one are dropped.
pub fn sorted_centers(
    max_len: usize,
    width: f64,
    height: f64,
    u: &mut Unstructured<'_>,
) -> Result<Vec<(f64, f64)>, arbitrary::Error> {
    let len = u.int_in_range(0..=max_len)?;
    let mut ret: Vec<(f64, f64)> = Vec::with_capacity(len);
    for _ in 0..len {
        let mut x = float_in_range(0.0, width, u)?;
        let mut y = float_in_range(0.0, height, u)?;
        if let Some(&(px, py)) = ret.last() {
            match u.int_in_range(0u8..=3)? {
                0 => x = px,
                1 => y = py,
                _ => {}
            }
        }
        ret.push((x, y));
    }
    ret.sort_by(|p, q| p.0.total_cmp(&q.0));
    Ok(reference::well_separated(ret, 1e-6))
}

/// Runs the sweep on arbitrary centers and compares it to the brute-force
/// reference, panicking on any disagreement.
pub fn sweep_matches_reference(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
    let r = float_in_range(0.05, 2.0, u)?;
    let radius = Radius::new(r).expect("positive radius");
    let centers = sorted_centers(64, 8.0, 4.0, u)?;

    let mut tally = Tally::default();
    let mut sweeper = Sweeper::with_observer(radius, &mut tally).with_policy(Policy::ReportStandalone);
    let mut swept = Vec::new();
    let mut sink = |ev| swept.push(ev);
    sweeper.begin();
    for &(x, y) in &centers {
        sweeper.push(x, y, &mut sink).expect("valid input");
    }
    sweeper.end(&mut sink).expect("valid lifecycle");

    let pairs = reference::overlapping_pairs(&centers, &radius);
    assert_eq!(tally.crossings + tally.occluded + tally.rejected, 2 * pairs.len());

    let mut expected = reference::boundary(&centers, &radius);
    reference::canonicalize(&mut swept);
    reference::canonicalize(&mut expected);
    assert_eq!(swept, expected);
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn sweep_matches_reference() {
        arbtest::arbtest(super::sweep_matches_reference);
    }

    #[test]
    fn centers_are_sorted_and_separated() {
        arbtest::arbtest(|u| {
            let centers = super::sorted_centers(32, 4.0, 4.0, u)?;
            assert!(centers.windows(2).all(|w| w[0].0 <= w[1].0));
            for (i, p) in centers.iter().enumerate() {
                for q in &centers[..i] {
                    assert!((p.0 - q.0).hypot(p.1 - q.1) >= 1e-6);
                }
            }
            Ok(())
        });
    }
}
