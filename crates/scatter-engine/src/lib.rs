#![forbid(unsafe_code)]

pub mod executor;
pub mod plans;
pub mod reader;
pub mod transform;

pub use executor::{
    Executor, FrameWindowReader, Plan, PlanOutput, RdfOutput, StructureFactorOutput,
};
pub use plans::{
    intermolecular_rdf, IntermolecularRdfParams, IntermolecularRdfPlan, StructureFactorPlan,
    DEFAULT_BINS,
};
pub use reader::{InMemoryFrames, TrajReader};
pub use transform::{rdf_to_structure_factor, structure_factor_on_grid, Q_GRID_POINTS};

#[cfg(test)]
mod tests;
