use crate::{fractal::Snapshot, result::MandelbrotResult};

/// Consumer of the per-step membership frames of a run.
///
/// Any error is fatal for the run: the engine stops without completing the
/// remaining iterations and nothing retries.
pub trait FrameSink: Send {
    fn name(&self) -> &str;

    fn consume(&mut self, snapshot: &Snapshot) -> MandelbrotResult<()>;

    /// Flushes and releases the output once the last frame was consumed.
    fn finish(&mut self) -> MandelbrotResult<()> {
        Ok(())
    }
}
