use scatter_core::{FrameChunk, FrameChunkBuilder, ScatterError, ScatterResult, System};

use crate::reader::TrajReader;

const DEFAULT_CHUNK_FRAMES: usize = 64;

#[derive(Debug, Clone)]
pub struct RdfOutput {
    pub r: Vec<f32>,
    pub g_r: Vec<f32>,
    pub counts: Vec<u64>,
    pub survival_fraction: f64,
}

#[derive(Debug, Clone)]
pub struct StructureFactorOutput {
    pub r: Vec<f32>,
    pub g_r: Vec<f32>,
    pub q: Vec<f32>,
    pub s_q: Vec<f32>,
}

#[derive(Debug, Clone)]
pub enum PlanOutput {
    Rdf(RdfOutput),
    StructureFactor(StructureFactorOutput),
}

/// One streaming analysis pass: configured up front, fed chunks in frame
/// order, asked for its result once the trajectory is exhausted.
pub trait Plan {
    fn name(&self) -> &str;

    fn set_frames_hint(&mut self, _hint: Option<usize>) {}

    /// Whether the executor should keep per-frame boxes in the chunks.
    fn needs_box(&self) -> bool {
        true
    }

    fn init(&mut self, system: &System) -> ScatterResult<()>;

    fn process_chunk(&mut self, chunk: &FrameChunk, system: &System) -> ScatterResult<()>;

    fn finalize(&mut self) -> ScatterResult<PlanOutput>;
}

/// Drives a `Plan` over a `TrajReader`, chunk by chunk, reusing one
/// coordinate buffer for the whole run.
pub struct Executor {
    system: System,
    chunk_frames: usize,
}

impl Executor {
    pub fn new(system: System) -> Self {
        Self {
            system,
            chunk_frames: DEFAULT_CHUNK_FRAMES,
        }
    }

    pub fn with_chunk_frames(mut self, chunk_frames: usize) -> Self {
        self.chunk_frames = chunk_frames.max(1);
        self
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn run_plan(
        &self,
        plan: &mut dyn Plan,
        traj: &mut dyn TrajReader,
    ) -> ScatterResult<PlanOutput> {
        if traj.n_atoms() != self.system.n_atoms() {
            return Err(ScatterError::Mismatch(format!(
                "trajectory has {} atoms, system has {}",
                traj.n_atoms(),
                self.system.n_atoms()
            )));
        }
        plan.set_frames_hint(traj.n_frames_hint());
        plan.init(&self.system)?;
        let mut builder = FrameChunkBuilder::new(self.system.n_atoms(), self.chunk_frames);
        builder.set_needs_box(plan.needs_box());
        loop {
            let frames = traj.read_chunk(self.chunk_frames, &mut builder)?;
            if frames == 0 {
                break;
            }
            let chunk = builder.finish_take()?;
            plan.process_chunk(&chunk, &self.system)?;
            builder.reclaim(chunk);
        }
        plan.finalize()
    }

    /// Runs the plan over the half-open frame window `[start, stop)`;
    /// `stop = None` means all remaining frames.
    pub fn run_plan_on_range(
        &self,
        plan: &mut dyn Plan,
        traj: &mut dyn TrajReader,
        start: usize,
        stop: Option<usize>,
    ) -> ScatterResult<PlanOutput> {
        let mut window = FrameWindowReader::new(traj, start, stop)?;
        self.run_plan(plan, &mut window)
    }
}

/// Restricts an inner reader to the frame window `[start, stop)`. Skipped
/// frames are still pulled off the inner reader, just never handed on.
pub struct FrameWindowReader<'a> {
    inner: &'a mut dyn TrajReader,
    skip: usize,
    remaining: Option<usize>,
    scratch: FrameChunkBuilder,
}

impl<'a> FrameWindowReader<'a> {
    pub fn new(
        inner: &'a mut dyn TrajReader,
        start: usize,
        stop: Option<usize>,
    ) -> ScatterResult<Self> {
        if let Some(stop) = stop {
            if stop < start {
                return Err(ScatterError::Invalid(format!(
                    "frame window stop {stop} precedes start {start}"
                )));
            }
        }
        let n_atoms = inner.n_atoms();
        let mut scratch = FrameChunkBuilder::new(n_atoms, 1);
        scratch.set_needs_box(false);
        Ok(Self {
            inner,
            skip: start,
            remaining: stop.map(|stop| stop - start),
            scratch,
        })
    }
}

impl TrajReader for FrameWindowReader<'_> {
    fn n_atoms(&self) -> usize {
        self.inner.n_atoms()
    }

    fn n_frames_hint(&self) -> Option<usize> {
        let avail = self.inner.n_frames_hint()?.saturating_sub(self.skip);
        Some(match self.remaining {
            Some(remaining) => avail.min(remaining),
            None => avail,
        })
    }

    fn read_chunk(
        &mut self,
        max_frames: usize,
        out: &mut FrameChunkBuilder,
    ) -> ScatterResult<usize> {
        while self.skip > 0 {
            let want = self.skip.min(DEFAULT_CHUNK_FRAMES);
            self.scratch.reset(self.inner.n_atoms(), want);
            let read = self.inner.read_chunk(want, &mut self.scratch)?;
            if read == 0 {
                return Ok(0);
            }
            self.skip -= read;
        }
        let capped = match self.remaining {
            Some(0) => return Ok(0),
            Some(remaining) => max_frames.min(remaining),
            None => max_frames,
        };
        let read = self.inner.read_chunk(capped, out)?;
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(read);
        }
        Ok(read)
    }
}
