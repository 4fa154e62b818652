use complex_rs::complex::Complex;
use rayon::prelude::*;

use crate::models::grid::{Grid, MembershipGrid};

use super::iteration::IterateState;

/// Radius-2 escape bound, squared. Fixed for the Mandelbrot set.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// NaN fails the `<=` comparison, so fully diverged iterates count as escaped.
pub fn is_bounded(z: Complex) -> bool {
    z.norm_sqr() <= ESCAPE_RADIUS_SQUARED
}

/// Membership of every pixel for the current iterate. Pure: the state is
/// only read.
pub fn classify(state: &IterateState) -> MembershipGrid {
    let cells = state
        .re()
        .cells()
        .par_iter()
        .zip(state.im().cells().par_iter())
        .map(|(&re, &im)| is_bounded(Complex::new(re, im)))
        .collect();
    Grid::with_cells(state.resolution(), cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resolution::Resolution;

    fn state(re: Vec<f64>, im: Vec<f64>) -> IterateState {
        let resolution = Resolution::new(re.len() as u32, 1);
        IterateState::from_parts(
            Grid::from_vec(resolution, re).unwrap(),
            Grid::from_vec(resolution, im).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        let membership = classify(&state(vec![2.0, 0.0, 2.0], vec![0.0, -2.0, 0.001]));
        assert_eq!(membership.cells(), &[true, true, false]);
    }

    #[test]
    fn nan_and_infinity_are_excluded() {
        let membership = classify(&state(
            vec![f64::NAN, f64::INFINITY, 0.0, f64::NEG_INFINITY],
            vec![0.0, 0.0, f64::NAN, f64::INFINITY],
        ));
        assert_eq!(membership.cells(), &[false, false, false, false]);
    }

    #[test]
    fn classification_is_idempotent() {
        let state = state(vec![0.5, 3.0, -1.9, 1.0], vec![0.5, 0.0, 0.1, 1.8]);
        let first = classify(&state);
        let second = classify(&state);
        assert_eq!(first, second);
        assert_eq!(first.cells(), &[true, false, true, false]);
    }

    #[test]
    fn zeroed_state_is_all_members() {
        let membership = classify(&IterateState::zeroed(Resolution::square(8)));
        assert_eq!(membership.member_count(), 64);
    }
}
