use crate::error::{ScatterError, ScatterResult};

/// Per-frame periodic box. Triclinic boxes carry three edge lengths and
/// three tilt factors (HOOMD convention): the lattice vectors are
/// `a1 = (lx, 0, 0)`, `a2 = (xy*ly, ly, 0)`, `a3 = (xz*lz, yz*lz, lz)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Box3 {
    None,
    Orthorhombic {
        lx: f32,
        ly: f32,
        lz: f32,
    },
    Triclinic {
        lx: f32,
        ly: f32,
        lz: f32,
        xy: f32,
        xz: f32,
        yz: f32,
    },
}

impl Box3 {
    /// Box volume. Tilt factors shear the cell without changing it.
    pub fn volume(self) -> ScatterResult<f64> {
        match self {
            Box3::Orthorhombic { lx, ly, lz } | Box3::Triclinic { lx, ly, lz, .. } => {
                let v = lx as f64 * ly as f64 * lz as f64;
                if v <= 0.0 {
                    return Err(ScatterError::Mismatch(
                        "volume requires positive box lengths".into(),
                    ));
                }
                Ok(v)
            }
            Box3::None => Err(ScatterError::Mismatch(
                "volume requires a periodic box".into(),
            )),
        }
    }

    /// Smallest edge length of the box.
    pub fn min_edge(self) -> ScatterResult<f64> {
        match self {
            Box3::Orthorhombic { lx, ly, lz } | Box3::Triclinic { lx, ly, lz, .. } => {
                let e = lx.min(ly).min(lz) as f64;
                if e <= 0.0 {
                    return Err(ScatterError::Mismatch(
                        "min edge requires positive box lengths".into(),
                    ));
                }
                Ok(e)
            }
            Box3::None => Err(ScatterError::Mismatch(
                "min edge requires a periodic box".into(),
            )),
        }
    }
}

/// A contiguous run of frames read off a trajectory. Coordinates are flat,
/// frame-major: atom `a` of frame `f` lives at `coords[f * n_atoms + a]`.
#[derive(Debug, Clone)]
pub struct FrameChunk {
    pub n_atoms: usize,
    pub n_frames: usize,
    pub coords: Vec<[f32; 4]>,
    pub box_: Vec<Box3>,
}

impl FrameChunk {
    pub fn frame_coords(&self, frame: usize) -> &[[f32; 4]] {
        let start = frame * self.n_atoms;
        &self.coords[start..start + self.n_atoms]
    }
}

#[derive(Debug)]
pub struct FrameChunkBuilder {
    n_atoms: usize,
    n_frames: usize,
    coords_buf: Vec<[f32; 4]>,
    box_buf: Vec<Box3>,
    store_box: bool,
}

impl FrameChunkBuilder {
    pub fn new(n_atoms: usize, max_frames: usize) -> Self {
        Self {
            n_atoms,
            n_frames: 0,
            coords_buf: Vec::with_capacity(n_atoms * max_frames),
            box_buf: Vec::with_capacity(max_frames),
            store_box: true,
        }
    }

    pub fn set_needs_box(&mut self, needs_box: bool) {
        self.store_box = needs_box;
    }

    pub fn needs_box(&self) -> bool {
        self.store_box
    }

    pub fn reset(&mut self, n_atoms: usize, max_frames: usize) {
        self.n_atoms = n_atoms;
        self.n_frames = 0;
        self.coords_buf.clear();
        self.box_buf.clear();
        self.coords_buf.reserve(n_atoms * max_frames);
        if self.store_box {
            self.box_buf.reserve(max_frames);
        }
    }

    pub fn start_frame(&mut self, box_: Box3) -> &mut [[f32; 4]] {
        let frame_index = self.n_frames;
        self.n_frames += 1;
        if self.store_box {
            self.box_buf.push(box_);
        }
        let start = frame_index * self.n_atoms;
        let end = start + self.n_atoms;
        if self.coords_buf.len() < end {
            self.coords_buf.resize(end, [0.0; 4]);
        }
        &mut self.coords_buf[start..end]
    }

    pub fn finish_take(&mut self) -> ScatterResult<FrameChunk> {
        let n_frames = self.n_frames;
        if self.coords_buf.len() != n_frames * self.n_atoms {
            return Err(ScatterError::Mismatch(
                "frame chunk buffer size mismatch".into(),
            ));
        }
        if self.store_box && self.box_buf.len() != n_frames {
            return Err(ScatterError::Mismatch(
                "frame chunk box buffer size mismatch".into(),
            ));
        }
        let coords = std::mem::take(&mut self.coords_buf);
        let box_ = if self.store_box {
            std::mem::take(&mut self.box_buf)
        } else {
            Vec::new()
        };
        self.n_frames = 0;
        Ok(FrameChunk {
            n_atoms: self.n_atoms,
            n_frames,
            coords,
            box_,
        })
    }

    /// Takes the chunk's buffers back so the next `read_chunk` reuses them.
    pub fn reclaim(&mut self, chunk: FrameChunk) {
        self.n_atoms = chunk.n_atoms;
        self.coords_buf = chunk.coords;
        if !chunk.box_.is_empty() {
            self.box_buf = chunk.box_;
        }
        self.n_frames = 0;
        self.coords_buf.clear();
        self.box_buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_roundtrip_and_reclaim() {
        let mut b = FrameChunkBuilder::new(2, 4);
        let box_ = Box3::Orthorhombic {
            lx: 5.0,
            ly: 5.0,
            lz: 5.0,
        };
        for f in 0..3 {
            let coords = b.start_frame(box_);
            coords[0] = [f as f32, 0.0, 0.0, 0.0];
            coords[1] = [0.0, f as f32, 0.0, 0.0];
        }
        let chunk = b.finish_take().unwrap();
        assert_eq!(chunk.n_frames, 3);
        assert_eq!(chunk.coords.len(), 6);
        assert_eq!(chunk.box_.len(), 3);
        assert_eq!(chunk.frame_coords(2)[0][0], 2.0);
        b.reclaim(chunk);
        let empty = b.finish_take().unwrap();
        assert_eq!(empty.n_frames, 0);
    }

    #[test]
    fn box_storage_skippable() {
        let mut b = FrameChunkBuilder::new(1, 2);
        b.set_needs_box(false);
        b.start_frame(Box3::None)[0] = [1.0, 2.0, 3.0, 0.0];
        let chunk = b.finish_take().unwrap();
        assert!(chunk.box_.is_empty());
    }

    #[test]
    fn volume_and_min_edge() {
        let ortho = Box3::Orthorhombic {
            lx: 2.0,
            ly: 3.0,
            lz: 4.0,
        };
        assert!((ortho.volume().unwrap() - 24.0).abs() < 1e-12);
        assert!((ortho.min_edge().unwrap() - 2.0).abs() < 1e-12);
        let tric = Box3::Triclinic {
            lx: 2.0,
            ly: 3.0,
            lz: 4.0,
            xy: 0.5,
            xz: 0.0,
            yz: 0.1,
        };
        assert!((tric.volume().unwrap() - 24.0).abs() < 1e-12);
        assert!(Box3::None.volume().is_err());
    }
}
