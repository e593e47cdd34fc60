use crate::{
    compile::plan::{BandDraw, ChunkDraw, DrawOp, PaintPlan},
    foundation::error::CollageResult,
};

/// Paint target for a compiled [`PaintPlan`].
pub trait PaintBackend {
    /// Start a frame: clear to the plan background.
    fn begin(&mut self, plan: &PaintPlan) -> CollageResult<()>;

    /// Paint one chunk.
    fn draw_chunk(&mut self, op: &ChunkDraw) -> CollageResult<()>;

    /// Paint one band at its resting offset.
    fn draw_band(&mut self, op: &BandDraw) -> CollageResult<()>;

    /// Close the frame.
    fn finish(&mut self) -> CollageResult<()>;
}

/// Drive `backend` through every op of `plan`, bottom to top.
pub fn execute_plan<B: PaintBackend + ?Sized>(
    backend: &mut B,
    plan: &PaintPlan,
) -> CollageResult<()> {
    backend.begin(plan)?;
    for op in &plan.ops {
        match op {
            DrawOp::Chunk(c) => backend.draw_chunk(c)?,
            DrawOp::Band(b) => backend.draw_band(b)?,
        }
    }
    backend.finish()
}
