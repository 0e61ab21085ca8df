use std::f64::consts::PI;

use scatter_core::NeighborPair;

/// Folds pair distances into the running histogram. Distances below
/// `r_min` or at/after the last bin edge are dropped (half-open bins).
pub(super) fn accumulate(counts: &mut [u64], r_min: f64, inv_dr: f64, pairs: &[NeighborPair]) {
    let bins = counts.len();
    for pair in pairs {
        let offset = pair.dist - r_min;
        if offset < 0.0 {
            continue;
        }
        let bin = (offset * inv_dr) as usize;
        if bin < bins {
            counts[bin] += 1;
        }
    }
}

/// Volume of the spherical shell spanned by bin `bin`.
pub(super) fn shell_volume(r_min: f64, dr: f64, bin: usize) -> f64 {
    let lo = r_min + bin as f64 * dr;
    let hi = lo + dr;
    4.0 / 3.0 * PI * (hi * hi * hi - lo * lo * lo)
}
