use crate::error::{ScatterError, ScatterResult};
use crate::frame::Box3;
use crate::pbc::{apply_pbc, apply_pbc_triclinic, box_lengths, cell_and_inv_from_box};

/// One query/point pair within the cutoff. Indices are positions within
/// the query and point arrays handed to `pairs_within`, not global
/// particle indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborPair {
    pub query: u32,
    pub point: u32,
    pub dist: f64,
}

enum Wrap {
    NoBox,
    Ortho(f64, f64, f64),
    Triclinic {
        cell: [[f64; 3]; 3],
        inv: [[f64; 3]; 3],
    },
}

impl Wrap {
    fn from_box(box_: Box3) -> ScatterResult<Self> {
        match box_ {
            Box3::None => Ok(Wrap::NoBox),
            Box3::Orthorhombic { .. } => {
                let (lx, ly, lz) = box_lengths(box_)?;
                Ok(Wrap::Ortho(lx, ly, lz))
            }
            Box3::Triclinic { .. } => {
                let (cell, inv) = cell_and_inv_from_box(box_)?;
                Ok(Wrap::Triclinic { cell, inv })
            }
        }
    }

    fn apply(&self, dx: &mut f64, dy: &mut f64, dz: &mut f64) {
        match self {
            Wrap::NoBox => {}
            Wrap::Ortho(lx, ly, lz) => apply_pbc(dx, dy, dz, *lx, *ly, *lz),
            Wrap::Triclinic { cell, inv } => apply_pbc_triclinic(dx, dy, dz, cell, inv),
        }
    }
}

/// All (query, point) pairs with minimum-image separation at most `r_max`
/// under the frame's box. `exclude_self` drops the `query == point` index
/// pairs; set it when `queries` and `points` are the same array so
/// particles do not pair with themselves. Brute-force double loop.
pub fn pairs_within(
    points: &[[f32; 4]],
    queries: &[[f32; 4]],
    box_: Box3,
    r_max: f64,
    exclude_self: bool,
) -> ScatterResult<Vec<NeighborPair>> {
    if !(r_max > 0.0) {
        return Err(ScatterError::Invalid(format!(
            "search radius must be positive, got {r_max}"
        )));
    }
    let wrap = Wrap::from_box(box_)?;
    let r_max_sq = r_max * r_max;
    let mut pairs = Vec::new();
    for (qi, q) in queries.iter().enumerate() {
        for (pi, p) in points.iter().enumerate() {
            if exclude_self && qi == pi {
                continue;
            }
            let mut dx = q[0] as f64 - p[0] as f64;
            let mut dy = q[1] as f64 - p[1] as f64;
            let mut dz = q[2] as f64 - p[2] as f64;
            wrap.apply(&mut dx, &mut dy, &mut dz);
            let dist_sq = dx * dx + dy * dy + dz * dz;
            if dist_sq <= r_max_sq {
                pairs.push(NeighborPair {
                    query: qi as u32,
                    point: pi as u32,
                    dist: dist_sq.sqrt(),
                });
            }
        }
    }
    Ok(pairs)
}
