use scatter_core::{FrameChunk, ScatterError, ScatterResult, System};

use crate::executor::{Plan, PlanOutput, StructureFactorOutput};
use crate::plans::rdf::{IntermolecularRdfPlan, DEFAULT_BINS};
use crate::transform::{structure_factor_on_grid, Q_GRID_POINTS};

/// Single-species static structure factor: accumulates g(r) over the
/// streamed frames (self pairs excluded, bonded exclusion off) and runs
/// the Fourier-Bessel transform in `finalize`. Density defaults to the
/// mean N/V of the processed frames.
#[derive(Debug)]
pub struct StructureFactorPlan {
    species: String,
    bins: usize,
    r_min: f64,
    r_max: Option<f64>,
    q_min: f64,
    q_max: f64,
    q_points: usize,
    density: Option<f64>,
    rdf: Option<IntermolecularRdfPlan>,
    n_species: usize,
    density_acc: f64,
    frames_seen: usize,
}

impl StructureFactorPlan {
    pub fn new(species: &str, q_min: f64, q_max: f64) -> Self {
        Self {
            species: species.to_string(),
            bins: DEFAULT_BINS,
            r_min: 0.0,
            r_max: None,
            q_min,
            q_max,
            q_points: Q_GRID_POINTS,
            density: None,
            rdf: None,
            n_species: 0,
            density_acc: 0.0,
            frames_seen: 0,
        }
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_r_min(mut self, r_min: f64) -> Self {
        self.r_min = r_min;
        self
    }

    pub fn with_r_max(mut self, r_max: f64) -> Self {
        self.r_max = Some(r_max);
        self
    }

    pub fn with_q_points(mut self, q_points: usize) -> Self {
        self.q_points = q_points;
        self
    }

    /// Overrides the mean-N/V number density used by the transform.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }
}

impl Plan for StructureFactorPlan {
    fn name(&self) -> &str {
        "structure_factor"
    }

    fn init(&mut self, system: &System) -> ScatterResult<()> {
        if !(self.q_min > 0.0) {
            return Err(ScatterError::Invalid(format!(
                "q_min must be positive, got {}",
                self.q_min
            )));
        }
        if !(self.q_max > self.q_min) {
            return Err(ScatterError::Invalid(format!(
                "q_max {} must exceed q_min {}",
                self.q_max, self.q_min
            )));
        }
        if self.q_points < 2 {
            return Err(ScatterError::Invalid(format!(
                "need at least 2 q samples, got {}",
                self.q_points
            )));
        }
        if let Some(density) = self.density {
            if !(density > 0.0) {
                return Err(ScatterError::Invalid(format!(
                    "density must be positive, got {density}"
                )));
            }
        }
        let mut rdf = IntermolecularRdfPlan::new(&self.species, &self.species)
            .with_bins(self.bins)
            .with_r_min(self.r_min)
            .with_exclude_bonded(false);
        if let Some(r_max) = self.r_max {
            rdf = rdf.with_r_max(r_max);
        }
        rdf.init(system)?;
        self.n_species = system.select_type(&self.species)?.len();
        self.rdf = Some(rdf);
        self.density_acc = 0.0;
        self.frames_seen = 0;
        Ok(())
    }

    fn process_chunk(&mut self, chunk: &FrameChunk, system: &System) -> ScatterResult<()> {
        let rdf = self
            .rdf
            .as_mut()
            .ok_or_else(|| ScatterError::Mismatch("plan not initialized".into()))?;
        for frame in 0..chunk.n_frames {
            let box_ = *chunk.box_.get(frame).ok_or_else(|| {
                ScatterError::Mismatch("structure factor plan needs per-frame boxes".into())
            })?;
            self.density_acc += self.n_species as f64 / box_.volume()?;
            self.frames_seen += 1;
        }
        rdf.process_chunk(chunk, system)
    }

    fn finalize(&mut self) -> ScatterResult<PlanOutput> {
        let rdf = self
            .rdf
            .as_mut()
            .ok_or_else(|| ScatterError::Mismatch("plan not initialized".into()))?;
        let rdf_out = match rdf.finalize()? {
            PlanOutput::Rdf(out) => out,
            _ => {
                return Err(ScatterError::Mismatch(
                    "rdf plan produced unexpected output".into(),
                ))
            }
        };
        let density = match self.density {
            Some(density) => density,
            None => self.density_acc / self.frames_seen as f64,
        };
        let r: Vec<f64> = rdf_out.r.iter().map(|&v| v as f64).collect();
        let g_r: Vec<f64> = rdf_out.g_r.iter().map(|&v| v as f64).collect();
        let (q, s_q) =
            structure_factor_on_grid(&r, &g_r, self.q_min, self.q_max, self.q_points, density)?;
        Ok(PlanOutput::StructureFactor(StructureFactorOutput {
            r: rdf_out.r,
            g_r: rdf_out.g_r,
            q: q.into_iter().map(|v| v as f32).collect(),
            s_q: s_q.into_iter().map(|v| v as f32).collect(),
        }))
    }
}
