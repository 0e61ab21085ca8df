pub mod rdf;
pub mod structure_factor;

pub use rdf::{intermolecular_rdf, IntermolecularRdfParams, IntermolecularRdfPlan, DEFAULT_BINS};
pub use structure_factor::StructureFactorPlan;
