//! Utilities for generating examples, benchmarks, and test cases.
//!
//! Every generator returns centers sorted by `x`, ready for the sweep.

type Centers = Vec<(f64, f64)>;

/// `n` centers in a horizontal line, `spacing` apart, starting at the origin.
pub fn chain(n: usize, spacing: f64) -> Centers {
    (0..n).map(|i| (i as f64 * spacing, 0.0)).collect()
}

/// A `cols` by `rows` square grid with the given spacing.
///
/// With the default radius of `0.5`, a spacing below `1.0` makes every
/// disk overlap its four neighbors; below `1 / sqrt(2)` it also overlaps
/// the diagonal ones, and the grid's interior is entirely covered.
pub fn grid(cols: usize, rows: usize, spacing: f64) -> Centers {
    let mut ret = Vec::with_capacity(cols * rows);
    for i in 0..cols {
        for j in 0..rows {
            ret.push((i as f64 * spacing, j as f64 * spacing));
        }
    }
    ret
}

/// A hexagonal packing: `rows` horizontal rows of `cols` disks, with every
/// other row shifted by half a spacing.
///
/// Neighboring centers are all `spacing` apart.
pub fn hex_packing(cols: usize, rows: usize, spacing: f64) -> Centers {
    let row_height = spacing * 3.0f64.sqrt() / 2.0;
    let mut ret = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        let shift = if j % 2 == 1 { spacing / 2.0 } else { 0.0 };
        for i in 0..cols {
            ret.push((i as f64 * spacing + shift, j as f64 * row_height));
        }
    }
    ret.sort_by(|p, q| p.0.total_cmp(&q.0));
    ret
}

/// `n` centers spread over a strip of the given height, with deterministic
/// pseudo-random `y` coordinates and about ten centers per unit of `x`.
///
/// The same `seed` always gives the same centers.
pub fn jittered_strip(n: usize, height: f64, seed: u64) -> Centers {
    // xorshift64*: we need a repeatable sequence, not a good one.
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut next = move || {
        state ^= state >> 12;
        state ^= state << 25;
        state ^= state >> 27;
        let bits = state.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11;
        bits as f64 / (1u64 << 53) as f64
    };

    (0..n)
        .map(|i| {
            let x = i as f64 * 0.1 + next() * 0.05;
            (x, next() * height)
        })
        .collect()
}
