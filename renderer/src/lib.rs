pub mod sinks;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{error, info, warn};
use shared::{
    error::MandelbrotError,
    fractal::{build_grid, run_iterations, Progress, Snapshot},
    models::{config::RenderConfig, grid::MembershipGrid},
    result::MandelbrotResult,
    sink::FrameSink,
};
use tokio::{sync::mpsc, task};

use self::sinks::{drive_sinks, open_sinks, still::write_still};

/// Snapshots allowed in flight between the engine and the sinks.
const SNAPSHOT_BUFFER: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub membership: MembershipGrid,
    /// Set only when an interrupt actually skipped iterations.
    pub interrupted: bool,
}

pub async fn run_render(config: RenderConfig) -> MandelbrotResult<RenderSummary> {
    config.echo();
    config.validate()?;

    let sinks = open_sinks(&config)?;
    render(config, sinks).await
}

/// Runs one render with caller-provided frame sinks, then writes the still
/// image to `config.output`.
///
/// Snapshots are produced only when `sinks` is non-empty. A failing sink
/// aborts the run and no still image is written.
pub async fn render(
    config: RenderConfig,
    sinks: Vec<Box<dyn FrameSink>>,
) -> MandelbrotResult<RenderSummary> {
    render_with_interrupt(config, sinks, Arc::new(AtomicBool::new(false))).await
}

/// [`render`] with a caller-owned interrupt flag. Ctrl-C sets it too; it is
/// checked after every snapshot, so it has no effect without sinks.
pub async fn render_with_interrupt(
    config: RenderConfig,
    sinks: Vec<Box<dyn FrameSink>>,
    interrupted: Arc<AtomicBool>,
) -> MandelbrotResult<RenderSummary> {
    config.validate()?;
    let coords = build_grid(config.image_size, &config.bounds)?;
    let iteration_count = config.iteration_count;

    let (membership, stopped) = if sinks.is_empty() {
        let membership =
            join(task::spawn_blocking(move || run_iterations(iteration_count, &coords, None)))
                .await?;
        (membership, false)
    } else {
        let (tx, rx) = mpsc::channel::<Snapshot>(SNAPSHOT_BUFFER);
        let sink_handle = task::spawn_blocking(move || drive_sinks(sinks, rx));
        let interrupt_handle = listen_for_interrupt(Arc::clone(&interrupted));

        let stop_flag = Arc::clone(&interrupted);
        let engine_handle = task::spawn_blocking(move || -> MandelbrotResult<(MembershipGrid, bool)> {
            let mut stopped = false;
            let mut on_snapshot = |snapshot: Snapshot| -> MandelbrotResult<Progress> {
                let step = snapshot.step;
                if tx.blocking_send(snapshot).is_err() {
                    return Err(MandelbrotError::SinkFailure(format!(
                        "frame sinks stopped before step {}",
                        step
                    )));
                }
                if step < iteration_count && stop_flag.load(Ordering::SeqCst) {
                    warn!("Interrupted after iteration {}, skipping the rest", step);
                    stopped = true;
                    return Ok(Progress::Stop);
                }
                Ok(Progress::Continue)
            };
            let membership = run_iterations(iteration_count, &coords, Some(&mut on_snapshot))?;
            Ok((membership, stopped))
        });

        let engine_result = join(engine_handle).await;
        interrupt_handle.abort();
        // the sink's own error explains a closed channel better than the engine's
        join(sink_handle).await?;
        engine_result?
    };

    write_still(&config.output, &membership)?;

    Ok(RenderSummary {
        membership,
        interrupted: stopped,
    })
}

fn listen_for_interrupt(interrupted: Arc<AtomicBool>) -> task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, finishing the current iteration");
                interrupted.store(true, Ordering::SeqCst);
            }
            Err(e) => error!("Failed to listen for ctrl+c signal: {}", e),
        }
    })
}

async fn join<T>(handle: task::JoinHandle<T>) -> T {
    match handle.await {
        Ok(value) => value,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}
