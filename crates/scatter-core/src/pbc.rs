use crate::error::{ScatterError, ScatterResult};
use crate::frame::Box3;

pub fn box_lengths(box_: Box3) -> ScatterResult<(f64, f64, f64)> {
    match box_ {
        Box3::Orthorhombic { lx, ly, lz } => Ok((lx as f64, ly as f64, lz as f64)),
        _ => Err(ScatterError::Mismatch(
            "orthorhombic box required for PBC".into(),
        )),
    }
}

pub fn apply_pbc(dx: &mut f64, dy: &mut f64, dz: &mut f64, lx: f64, ly: f64, lz: f64) {
    if lx > 0.0 {
        *dx -= (*dx / lx).round() * lx;
    }
    if ly > 0.0 {
        *dy -= (*dy / ly).round() * ly;
    }
    if lz > 0.0 {
        *dz -= (*dz / lz).round() * lz;
    }
}

pub fn apply_pbc_triclinic(
    dx: &mut f64,
    dy: &mut f64,
    dz: &mut f64,
    cell: &[[f64; 3]; 3],
    inv: &[[f64; 3]; 3],
) {
    let fx = inv[0][0] * *dx + inv[1][0] * *dy + inv[2][0] * *dz;
    let fy = inv[0][1] * *dx + inv[1][1] * *dy + inv[2][1] * *dz;
    let fz = inv[0][2] * *dx + inv[1][2] * *dy + inv[2][2] * *dz;
    let fx = fx - fx.round();
    let fy = fy - fy.round();
    let fz = fz - fz.round();
    *dx = fx * cell[0][0] + fy * cell[1][0] + fz * cell[2][0];
    *dy = fx * cell[0][1] + fy * cell[1][1] + fz * cell[2][1];
    *dz = fx * cell[0][2] + fy * cell[1][2] + fz * cell[2][2];
}

/// Cell matrix (rows are lattice vectors) and its inverse for minimum-image
/// wrapping under a triclinic or orthorhombic box.
pub fn cell_and_inv_from_box(box_: Box3) -> ScatterResult<([[f64; 3]; 3], [[f64; 3]; 3])> {
    let cell = match box_ {
        Box3::Orthorhombic { lx, ly, lz } => [
            [lx as f64, 0.0, 0.0],
            [0.0, ly as f64, 0.0],
            [0.0, 0.0, lz as f64],
        ],
        Box3::Triclinic {
            lx,
            ly,
            lz,
            xy,
            xz,
            yz,
        } => [
            [lx as f64, 0.0, 0.0],
            [xy as f64 * ly as f64, ly as f64, 0.0],
            [xz as f64 * lz as f64, yz as f64 * lz as f64, lz as f64],
        ],
        Box3::None => {
            return Err(ScatterError::Mismatch("box vectors required".into()));
        }
    };
    let m = &cell;
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
    if det == 0.0 {
        return Err(ScatterError::Mismatch("box matrix not invertible".into()));
    }
    let inv = [
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) / det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) / det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) / det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
        ],
    ];
    Ok((cell, inv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_across_boundary() {
        let mut dx = 9.0;
        let mut dy = -9.0;
        let mut dz = 0.5;
        apply_pbc(&mut dx, &mut dy, &mut dz, 10.0, 10.0, 10.0);
        assert!((dx + 1.0).abs() < 1e-12);
        assert!((dy - 1.0).abs() < 1e-12);
        assert!((dz - 0.5).abs() < 1e-12);
    }

    #[test]
    fn triclinic_matches_orthorhombic_without_tilt() {
        let box_ = Box3::Triclinic {
            lx: 10.0,
            ly: 10.0,
            lz: 10.0,
            xy: 0.0,
            xz: 0.0,
            yz: 0.0,
        };
        let (cell, inv) = cell_and_inv_from_box(box_).unwrap();
        let mut dx = 9.0;
        let mut dy = -9.0;
        let mut dz = 0.5;
        apply_pbc_triclinic(&mut dx, &mut dy, &mut dz, &cell, &inv);
        assert!((dx + 1.0).abs() < 1e-9);
        assert!((dy - 1.0).abs() < 1e-9);
        assert!((dz - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tilted_box_wraps_through_sheared_image() {
        // xy = 0.5 shears a2 to (5, 10, 0); the shortest image of
        // (4.5, 9.5, 0) goes through that vector.
        let box_ = Box3::Triclinic {
            lx: 10.0,
            ly: 10.0,
            lz: 10.0,
            xy: 0.5,
            xz: 0.0,
            yz: 0.0,
        };
        let (cell, inv) = cell_and_inv_from_box(box_).unwrap();
        let mut dx = 4.5;
        let mut dy = 9.5;
        let mut dz = 0.0;
        apply_pbc_triclinic(&mut dx, &mut dy, &mut dz, &cell, &inv);
        assert!((dx + 0.5).abs() < 1e-9);
        assert!((dy + 0.5).abs() < 1e-9);
        assert!(dz.abs() < 1e-9);
    }

    #[test]
    fn missing_box_is_rejected() {
        assert!(cell_and_inv_from_box(Box3::None).is_err());
        assert!(box_lengths(Box3::None).is_err());
    }
}
