pub mod animation;
pub mod frames;
pub mod still;

use log::{debug, error};
use shared::{
    fractal::Snapshot, models::config::RenderConfig, result::MandelbrotResult, sink::FrameSink,
};
use tokio::sync::mpsc::Receiver;

use self::{animation::AnimationSink, frames::FrameDirectorySink};

/// Opens every snapshot target the configuration asks for. Nothing is opened
/// when snapshots are disabled.
pub fn open_sinks(config: &RenderConfig) -> MandelbrotResult<Vec<Box<dyn FrameSink>>> {
    let mut sinks: Vec<Box<dyn FrameSink>> = Vec::new();
    if let Some(path) = config.animation_path() {
        sinks.push(Box::new(AnimationSink::create(&path)?));
    }
    if let Some(dir) = config.frames_dir() {
        sinks.push(Box::new(FrameDirectorySink::create(dir)?));
    }
    Ok(sinks)
}

/// Feeds every received snapshot to all sinks until the sender hangs up.
///
/// Blocking: meant for a `spawn_blocking` thread. Returning early on an error
/// drops the receiver, which the sending side sees as a closed channel.
pub fn drive_sinks(
    mut sinks: Vec<Box<dyn FrameSink>>,
    mut rx: Receiver<Snapshot>,
) -> MandelbrotResult<()> {
    while let Some(snapshot) = rx.blocking_recv() {
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.consume(&snapshot) {
                error!("Sink {} failed at step {}: {}", sink.name(), snapshot.step, e);
                return Err(e);
            }
        }
        debug!("snapshot {} delivered to {} sinks", snapshot.step, sinks.len());
    }

    for sink in sinks.iter_mut() {
        sink.finish()?;
    }
    Ok(())
}
