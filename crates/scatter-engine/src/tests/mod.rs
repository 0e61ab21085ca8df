use scatter_core::{Box3, ScatterError, System};

use crate::executor::{Executor, PlanOutput};
use crate::plans::{
    intermolecular_rdf, IntermolecularRdfParams, IntermolecularRdfPlan, StructureFactorPlan,
};
use crate::reader::InMemoryFrames;
use crate::transform::{rdf_to_structure_factor, structure_factor_on_grid, Q_GRID_POINTS};

const BOX10: Box3 = Box3::Orthorhombic {
    lx: 10.0,
    ly: 10.0,
    lz: 10.0,
};

fn mono_system(n: usize) -> System {
    System::from_types(&["A"], vec![0; n], vec![]).unwrap()
}

fn pair_system() -> System {
    System::from_types(&["A", "B"], vec![0, 1], vec![]).unwrap()
}

/// Four particles on the corners of a unit square, first two bonded into
/// one molecule.
fn square_system() -> System {
    System::from_types(&["A"], vec![0; 4], vec![[0, 1]]).unwrap()
}

fn square_frame() -> Vec<[f32; 4]> {
    vec![
        [0.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0, 0.0],
    ]
}

/// Uniform-grid bin centers like an rdf histogram produces, with g == 1.
fn flat_rdf(bins: usize, dr: f64) -> (Vec<f64>, Vec<f64>) {
    let r = (0..bins).map(|i| (i as f64 + 0.5) * dr).collect();
    (r, vec![1.0; bins])
}

include!("part1.rs");
include!("part2.rs");
