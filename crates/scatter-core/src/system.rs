use crate::cluster::connected_components;
use crate::error::{ScatterError, ScatterResult};
use crate::interner::StringInterner;

/// Ordered particle indices for one species mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub indices: Vec<u32>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Static topology of the simulated system, established once (from the
/// first frame of a trajectory) and shared by all analysis passes:
/// per-particle type ids, the interned type-name registry, and the bond
/// table.
#[derive(Debug, Clone)]
pub struct System {
    types: StringInterner,
    type_id: Vec<u32>,
    bonds: Vec<[u32; 2]>,
}

impl System {
    pub fn new(
        types: StringInterner,
        type_id: Vec<u32>,
        bonds: Vec<[u32; 2]>,
    ) -> ScatterResult<Self> {
        let n = type_id.len();
        for &id in &type_id {
            if id as usize >= types.len() {
                return Err(ScatterError::Mismatch(format!(
                    "type id {id} outside registry of {} names",
                    types.len()
                )));
            }
        }
        for bond in &bonds {
            if bond[0] as usize >= n || bond[1] as usize >= n {
                return Err(ScatterError::Mismatch(format!(
                    "bond ({}, {}) out of range for {n} particles",
                    bond[0], bond[1]
                )));
            }
        }
        Ok(Self {
            types,
            type_id,
            bonds,
        })
    }

    /// Convenience constructor interning `names` in order, so `type_id`
    /// values index into `names`.
    pub fn from_types(names: &[&str], type_id: Vec<u32>, bonds: Vec<[u32; 2]>) -> ScatterResult<Self> {
        let mut types = StringInterner::new();
        for name in names {
            types.intern(name);
        }
        Self::new(types, type_id, bonds)
    }

    pub fn n_atoms(&self) -> usize {
        self.type_id.len()
    }

    pub fn type_registry(&self) -> &StringInterner {
        &self.types
    }

    pub fn bonds(&self) -> &[[u32; 2]] {
        &self.bonds
    }

    /// All particles whose type matches `name`, in index order.
    pub fn select_type(&self, name: &str) -> ScatterResult<Selection> {
        let Some(wanted) = self.types.get(name) else {
            return Err(ScatterError::Lookup(format!(
                "unknown particle type '{name}'"
            )));
        };
        let indices = self
            .type_id
            .iter()
            .enumerate()
            .filter(|(_, &id)| id == wanted)
            .map(|(i, _)| i as u32)
            .collect();
        Ok(Selection { indices })
    }

    /// One molecule label per particle: connected components of the bond
    /// graph. Unbonded particles are single-particle molecules.
    pub fn molecule_labels(&self) -> ScatterResult<Vec<u32>> {
        connected_components(self.n_atoms(), &self.bonds)
    }
}
