//! Depth-limited Mandelbrot membership over a rectangular region of the
//! complex plane.
//!
//! [`coordinates::build_grid`] samples the plane once, the
//! [`iteration::IterationEngine`] advances z -> z² + c over every pixel in
//! lockstep, and [`escape::classify`] turns the current iterate into a
//! membership grid. `iteration_count` is a precision knob: deeper runs shrink
//! the rendered set toward the true set from outside.

pub mod coordinates;
pub mod escape;
pub mod iteration;

pub use coordinates::{build_grid, CoordinateGrid};
pub use escape::{classify, ESCAPE_RADIUS_SQUARED};
pub use iteration::{run_iterations, IterateState, IterationEngine, Progress, Snapshot};
