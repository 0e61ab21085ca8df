use std::f64::consts::PI;

use scatter_core::{ScatterError, ScatterResult};

/// Number of q samples produced by `rdf_to_structure_factor`.
pub const Q_GRID_POINTS: usize = 1000;

/// Fourier-Bessel transform of a radial distribution function into the
/// static structure factor, on the standard 1000-point q grid:
///
///   S(q) = 1 + 4*pi*rho * (1/q) * integral r (g(r) - 1) sin(q r) dr
///
/// `density` is the number density rho of the scattering species.
pub fn rdf_to_structure_factor(
    r: &[f64],
    g_r: &[f64],
    q_min: f64,
    q_max: f64,
    density: f64,
) -> ScatterResult<(Vec<f64>, Vec<f64>)> {
    structure_factor_on_grid(r, g_r, q_min, q_max, Q_GRID_POINTS, density)
}

/// Same transform on a caller-chosen number of q samples, evenly spaced
/// over `[q_min, q_max]` inclusive. The radial grid is taken as uniform
/// with step `r[1] - r[0]`; the integral is a plain trapezoidal sum
/// accumulated left to right.
pub fn structure_factor_on_grid(
    r: &[f64],
    g_r: &[f64],
    q_min: f64,
    q_max: f64,
    n_q: usize,
    density: f64,
) -> ScatterResult<(Vec<f64>, Vec<f64>)> {
    if r.len() != g_r.len() {
        return Err(ScatterError::Invalid(format!(
            "radius and rdf lengths differ: {} vs {}",
            r.len(),
            g_r.len()
        )));
    }
    if r.len() < 2 {
        return Err(ScatterError::Invalid(format!(
            "need at least 2 radius samples, got {}",
            r.len()
        )));
    }
    if n_q < 2 {
        return Err(ScatterError::Invalid(format!(
            "need at least 2 q samples, got {n_q}"
        )));
    }
    if !(q_min > 0.0) {
        return Err(ScatterError::Invalid(format!(
            "q_min must be positive (the transform divides by q), got {q_min}"
        )));
    }
    if !(q_max > q_min) {
        return Err(ScatterError::Invalid(format!(
            "q_max {q_max} must exceed q_min {q_min}"
        )));
    }
    if !(density > 0.0) {
        return Err(ScatterError::Invalid(format!(
            "density must be positive, got {density}"
        )));
    }

    let dr = r[1] - r[0];
    let dq = (q_max - q_min) / (n_q - 1) as f64;
    let weight: Vec<f64> = r
        .iter()
        .zip(g_r)
        .map(|(&ri, &gi)| ri * (gi - 1.0))
        .collect();

    let mut q_grid = Vec::with_capacity(n_q);
    let mut s_q = Vec::with_capacity(n_q);
    for j in 0..n_q {
        // Endpoints hit q_min and q_max exactly.
        let q = if j == n_q - 1 {
            q_max
        } else {
            q_min + j as f64 * dq
        };
        let mut integral = 0.0;
        let mut prev = weight[0] * (q * r[0]).sin();
        for i in 1..r.len() {
            let cur = weight[i] * (q * r[i]).sin();
            integral += 0.5 * (prev + cur);
            prev = cur;
        }
        integral *= dr;
        q_grid.push(q);
        s_q.push(1.0 + 4.0 * PI * density * integral / q);
    }
    Ok((q_grid, s_q))
}
