use super::point::Point;

use serde::{Deserialize, Serialize};

/// Plane bounds: `min` holds the real-lower/imaginary-lower corner and `max`
/// the real-upper/imaginary-upper one.
///
/// Nothing enforces `min < max`; reversed or collapsed bounds simply produce
/// a reversed or collapsed coordinate grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_bounds(real_lower: f64, real_upper: f64, imag_lower: f64, imag_upper: f64) -> Self {
        Self::new(
            Point::new(real_lower, imag_lower),
            Point::new(real_upper, imag_upper),
        )
    }

    pub fn real_span(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn imaginary_span(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::from_bounds(-2.0, 2.0, -2.0, 2.0)
    }
}
