use scatter_core::{pairs_within, FrameChunk, ScatterError, ScatterResult, System};

use super::accumulate::{accumulate, shell_volume};
use super::IntermolecularRdfPlan;
use crate::executor::{Plan, PlanOutput, RdfOutput};

impl Plan for IntermolecularRdfPlan {
    fn name(&self) -> &str {
        "intermolecular_rdf"
    }

    fn init(&mut self, system: &System) -> ScatterResult<()> {
        if self.bins < 1 {
            return Err(ScatterError::Invalid(
                "rdf needs at least one histogram bin".into(),
            ));
        }
        if self.r_min < 0.0 {
            return Err(ScatterError::Invalid(format!(
                "r_min must be non-negative, got {}",
                self.r_min
            )));
        }
        if let Some(r_max) = self.r_max {
            if !(r_max > self.r_min) {
                return Err(ScatterError::Invalid(format!(
                    "r_max {r_max} must exceed r_min {}",
                    self.r_min
                )));
            }
        }
        self.sel_a = system.select_type(&self.species_a)?.indices;
        self.sel_b = system.select_type(&self.species_b)?.indices;
        if self.sel_a.is_empty() || self.sel_b.is_empty() {
            return Err(ScatterError::Invalid(format!(
                "no particles of type '{}' or '{}'",
                self.species_a, self.species_b
            )));
        }
        self.same_species = self.species_a == self.species_b;
        if self.exclude_bonded {
            let labels = system.molecule_labels()?;
            self.mol_a = self.sel_a.iter().map(|&i| labels[i as usize]).collect();
            self.mol_b = self.sel_b.iter().map(|&i| labels[i as usize]).collect();
        } else {
            self.mol_a.clear();
            self.mol_b.clear();
        }
        self.resolved_r_max = self.r_max;
        self.counts = vec![0; self.bins];
        self.norm_acc = 0.0;
        self.frames_seen = 0;
        self.last_pre_filter = 0;
        self.last_post_filter = 0;
        Ok(())
    }

    fn process_chunk(&mut self, chunk: &FrameChunk, _system: &System) -> ScatterResult<()> {
        for frame in 0..chunk.n_frames {
            let box_ = *chunk.box_.get(frame).ok_or_else(|| {
                ScatterError::Mismatch("rdf plan needs per-frame boxes".into())
            })?;
            let r_max = match self.resolved_r_max {
                Some(r_max) => r_max,
                None => {
                    // Stay strictly inside the minimum-image domain.
                    let derived = (box_.min_edge()? * 0.5).next_down();
                    if !(derived > self.r_min) {
                        return Err(ScatterError::Invalid(format!(
                            "derived r_max {derived} does not exceed r_min {}",
                            self.r_min
                        )));
                    }
                    self.resolved_r_max = Some(derived);
                    derived
                }
            };
            let volume = box_.volume()?;
            let coords = chunk.frame_coords(frame);

            let mut pos_a = std::mem::take(&mut self.pos_a);
            pos_a.clear();
            pos_a.extend(self.sel_a.iter().map(|&i| coords[i as usize]));
            let mut pos_b = std::mem::take(&mut self.pos_b);
            pos_b.clear();
            pos_b.extend(self.sel_b.iter().map(|&i| coords[i as usize]));

            let mut pairs = pairs_within(&pos_a, &pos_b, box_, r_max, self.same_species)?;
            let pre_filter = pairs.len();
            if self.exclude_bonded {
                let mol_a = &self.mol_a;
                let mol_b = &self.mol_b;
                pairs.retain(|pair| {
                    mol_a[pair.point as usize] != mol_b[pair.query as usize]
                });
            }
            let post_filter = pairs.len();

            let dr = (r_max - self.r_min) / self.bins as f64;
            accumulate(&mut self.counts, self.r_min, 1.0 / dr, &pairs);
            self.norm_acc += (self.sel_a.len() * self.sel_b.len()) as f64 / volume;
            self.frames_seen += 1;
            self.last_pre_filter = pre_filter;
            self.last_post_filter = post_filter;

            self.pos_a = pos_a;
            self.pos_b = pos_b;
        }
        Ok(())
    }

    fn finalize(&mut self) -> ScatterResult<PlanOutput> {
        if self.frames_seen == 0 {
            return Err(ScatterError::Invalid(
                "no frames processed, rdf is undefined".into(),
            ));
        }
        let r_max = self.resolved_r_max.ok_or_else(|| {
            ScatterError::Invalid("rdf cutoff never resolved".into())
        })?;
        let dr = (r_max - self.r_min) / self.bins as f64;
        let mut r = Vec::with_capacity(self.bins);
        let mut g_r = Vec::with_capacity(self.bins);
        for bin in 0..self.bins {
            r.push((self.r_min + (bin as f64 + 0.5) * dr) as f32);
            let g = self.counts[bin] as f64 / (shell_volume(self.r_min, dr, bin) * self.norm_acc);
            g_r.push(g as f32);
        }
        // Surviving fraction of the LAST frame's pairs, as the companion
        // normalization expects; 1.0 when nothing was filtered.
        let survival_fraction = if !self.exclude_bonded || self.last_pre_filter == 0 {
            1.0
        } else {
            self.last_post_filter as f64 / self.last_pre_filter as f64
        };
        Ok(PlanOutput::Rdf(RdfOutput {
            r,
            g_r,
            counts: self.counts.clone(),
            survival_fraction,
        }))
    }
}
