use std::time::{Duration, Instant};

use complex_rs::complex::Complex;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    error::MandelbrotError,
    models::{
        grid::{Grid, MembershipGrid},
        resolution::Resolution,
    },
    result::MandelbrotResult,
};

use super::{coordinates::CoordinateGrid, escape::classify};

/// The current iterate z at every pixel, split into real and imaginary grids.
#[derive(Debug, Clone, PartialEq)]
pub struct IterateState {
    re: Grid<f64>,
    im: Grid<f64>,
}

impl IterateState {
    /// z₀ = 0 everywhere.
    pub fn zeroed(resolution: Resolution) -> Self {
        Self {
            re: Grid::filled(resolution, 0.0),
            im: Grid::filled(resolution, 0.0),
        }
    }

    pub fn from_parts(re: Grid<f64>, im: Grid<f64>) -> MandelbrotResult<Self> {
        if re.resolution() != im.resolution() {
            return Err(MandelbrotError::InvalidConfiguration(format!(
                "real grid is {:?} but imaginary grid is {:?}",
                re.resolution(),
                im.resolution()
            )));
        }
        Ok(Self { re, im })
    }

    pub fn re(&self) -> &Grid<f64> {
        &self.re
    }

    pub fn im(&self) -> &Grid<f64> {
        &self.im
    }

    pub fn resolution(&self) -> Resolution {
        self.re.resolution()
    }

    /// One z -> z² + c update over every pixel, rows in parallel. Each pixel
    /// reads its old (re, im) pair into a `Complex` before writing either part.
    fn step(&mut self, coords: &CoordinateGrid) {
        let width = self.re.width();
        if width == 0 {
            return;
        }

        let values = self
            .re
            .cells_mut()
            .par_chunks_mut(width)
            .zip(self.im.cells_mut().par_chunks_mut(width));
        let constants = coords
            .re()
            .cells()
            .par_chunks(width)
            .zip(coords.im().cells().par_chunks(width));

        values
            .zip(constants)
            .for_each(|((re_row, im_row), (c_re_row, c_im_row))| {
                let pixels = re_row
                    .iter_mut()
                    .zip(im_row.iter_mut())
                    .zip(c_re_row.iter().zip(c_im_row));
                for ((re, im), (&c_re, &c_im)) in pixels {
                    let z = Complex::new(*re, *im).square() + Complex::new(c_re, c_im);
                    *re = z.re;
                    *im = z.im;
                }
            });
    }
}

/// A membership frame taken right after step `step` (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub membership: MembershipGrid,
    pub step: u32,
    pub elapsed: Duration,
}

/// What a snapshot consumer wants the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    /// Skip the remaining iterations, e.g. after a user interrupt.
    Stop,
}

/// Owns the iterate state of one run over a fixed coordinate grid.
pub struct IterationEngine<'a> {
    coords: &'a CoordinateGrid,
    state: IterateState,
    steps_taken: u32,
}

impl<'a> IterationEngine<'a> {
    pub fn new(coords: &'a CoordinateGrid) -> Self {
        Self {
            coords,
            state: IterateState::zeroed(coords.resolution()),
            steps_taken: 0,
        }
    }

    pub fn advance(&mut self) {
        self.state.step(self.coords);
        self.steps_taken += 1;
    }

    pub fn classify(&self) -> MembershipGrid {
        classify(&self.state)
    }

    pub fn state(&self) -> &IterateState {
        &self.state
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }
}

const PROGRESS_REPORTS: u32 = 10;

/// Steps logged at `info`: roughly every tenth of the run, plus the last one.
fn reports_progress(step: u32, iteration_count: u32) -> bool {
    let interval = (iteration_count / PROGRESS_REPORTS).max(1);
    step % interval == 0 || step == iteration_count
}

/// Runs exactly `iteration_count` steps (no early exit) and returns the final
/// membership grid.
///
/// With `on_snapshot`, the callback receives a freshly classified grid after
/// every step. `Progress::Stop` ends the loop early and the state reached so
/// far is classified; an `Err` aborts the run and is returned as is.
pub fn run_iterations(
    iteration_count: u32,
    coords: &CoordinateGrid,
    mut on_snapshot: Option<&mut dyn FnMut(Snapshot) -> MandelbrotResult<Progress>>,
) -> MandelbrotResult<MembershipGrid> {
    if iteration_count == 0 {
        return Err(MandelbrotError::InvalidConfiguration(
            "iteration count must be positive".to_string(),
        ));
    }

    let mut engine = IterationEngine::new(coords);
    let start_time = Instant::now();

    while engine.steps_taken() < iteration_count {
        engine.advance();
        let step = engine.steps_taken();
        if reports_progress(step, iteration_count) {
            info!("computing iteration {}/{}", step, iteration_count);
        } else {
            debug!("computed iteration {}/{}", step, iteration_count);
        }

        if let Some(callback) = on_snapshot.as_mut() {
            let snapshot = Snapshot {
                membership: engine.classify(),
                step: engine.steps_taken(),
                elapsed: start_time.elapsed(),
            };
            if callback(snapshot)? == Progress::Stop {
                debug!("iteration stopped after step {}", engine.steps_taken());
                break;
            }
        }
    }

    Ok(engine.classify())
}
