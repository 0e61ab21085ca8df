use super::{IntermolecularRdfPlan, DEFAULT_BINS};

impl IntermolecularRdfPlan {
    pub fn new(species_a: &str, species_b: &str) -> Self {
        Self {
            species_a: species_a.to_string(),
            species_b: species_b.to_string(),
            bins: DEFAULT_BINS,
            r_min: 0.0,
            r_max: None,
            exclude_bonded: true,
            sel_a: Vec::new(),
            sel_b: Vec::new(),
            mol_a: Vec::new(),
            mol_b: Vec::new(),
            same_species: false,
            resolved_r_max: None,
            counts: Vec::new(),
            norm_acc: 0.0,
            frames_seen: 0,
            last_pre_filter: 0,
            last_post_filter: 0,
            pos_a: Vec::new(),
            pos_b: Vec::new(),
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

    /// Histogram cutoff. When unset it is derived from the first frame's
    /// box as the next value below half the smallest edge.
    pub fn with_r_max(mut self, r_max: f64) -> Self {
        self.r_max = Some(r_max);
        self
    }

    pub fn with_exclude_bonded(mut self, exclude_bonded: bool) -> Self {
        self.exclude_bonded = exclude_bonded;
        self
    }
}
