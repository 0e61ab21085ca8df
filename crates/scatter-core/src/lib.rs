#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod frame;
pub mod interner;
pub mod pbc;
pub mod search;
pub mod system;

pub use cluster::connected_components;
pub use error::{ScatterError, ScatterResult};
pub use frame::{Box3, FrameChunk, FrameChunkBuilder};
pub use interner::StringInterner;
pub use search::{pairs_within, NeighborPair};
pub use system::{Selection, System};
