use scatter_core::{Box3, FrameChunkBuilder, ScatterError, ScatterResult};

/// Streaming source of trajectory frames. File-format crates implement
/// this; the engine only ever pulls chunks through it.
pub trait TrajReader {
    fn n_atoms(&self) -> usize;

    /// Total frame count when the source knows it up front.
    fn n_frames_hint(&self) -> Option<usize>;

    /// Reads up to `max_frames` frames into `out`. Returns the number of
    /// frames read; 0 signals end of trajectory.
    fn read_chunk(
        &mut self,
        max_frames: usize,
        out: &mut FrameChunkBuilder,
    ) -> ScatterResult<usize>;
}

/// A trajectory held in memory, one coordinate `Vec` per frame. Used by
/// callers that already have frames materialized, and by tests.
#[derive(Debug, Clone)]
pub struct InMemoryFrames {
    n_atoms: usize,
    boxes: Vec<Box3>,
    frames: Vec<Vec<[f32; 4]>>,
    cursor: usize,
}

impl InMemoryFrames {
    /// All frames share one box.
    pub fn new(n_atoms: usize, box_: Box3, frames: Vec<Vec<[f32; 4]>>) -> ScatterResult<Self> {
        let boxes = vec![box_; frames.len()];
        Self::with_boxes(n_atoms, boxes, frames)
    }

    pub fn with_boxes(
        n_atoms: usize,
        boxes: Vec<Box3>,
        frames: Vec<Vec<[f32; 4]>>,
    ) -> ScatterResult<Self> {
        if boxes.len() != frames.len() {
            return Err(ScatterError::Mismatch(format!(
                "{} boxes for {} frames",
                boxes.len(),
                frames.len()
            )));
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.len() != n_atoms {
                return Err(ScatterError::Mismatch(format!(
                    "frame {i} has {} atoms, expected {n_atoms}",
                    frame.len()
                )));
            }
        }
        Ok(Self {
            n_atoms,
            boxes,
            frames,
            cursor: 0,
        })
    }
}

impl TrajReader for InMemoryFrames {
    fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    fn n_frames_hint(&self) -> Option<usize> {
        Some(self.frames.len() - self.cursor)
    }

    fn read_chunk(
        &mut self,
        max_frames: usize,
        out: &mut FrameChunkBuilder,
    ) -> ScatterResult<usize> {
        out.reset(self.n_atoms, max_frames);
        let mut read = 0;
        while read < max_frames && self.cursor < self.frames.len() {
            let coords = out.start_frame(self.boxes[self.cursor]);
            coords.copy_from_slice(&self.frames[self.cursor]);
            self.cursor += 1;
            read += 1;
        }
        Ok(read)
    }
}
