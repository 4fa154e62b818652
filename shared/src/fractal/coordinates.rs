use complex_rs::complex::Complex;

use crate::{
    error::MandelbrotError,
    models::{grid::Grid, range::Range, resolution::Resolution},
    result::MandelbrotResult,
};

pub const IMAGE_SIZE_MULTIPLE: u32 = 4;

pub fn validate_image_size(image_size: u32) -> MandelbrotResult<()> {
    if image_size == 0 || image_size % IMAGE_SIZE_MULTIPLE != 0 {
        return Err(MandelbrotError::InvalidConfiguration(format!(
            "image size {} must be a positive multiple of {}",
            image_size, IMAGE_SIZE_MULTIPLE
        )));
    }
    Ok(())
}

/// The plane position sampled at every pixel, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    re: Grid<f64>,
    im: Grid<f64>,
}

impl CoordinateGrid {
    pub fn re(&self) -> &Grid<f64> {
        &self.re
    }

    pub fn im(&self) -> &Grid<f64> {
        &self.im
    }

    pub fn resolution(&self) -> Resolution {
        self.re.resolution()
    }

    pub fn at(&self, x: usize, y: usize) -> Option<Complex> {
        Some(Complex::new(*self.re.get(x, y)?, *self.im.get(x, y)?))
    }
}

/// Maps the pixels of an `image_size × image_size` image onto `bounds`.
///
/// Columns walk from the real-lower bound upward. Rows are flipped: row 0 is
/// the top of the image and sits one step below the imaginary-upper bound,
/// the last row sits on the imaginary-lower bound.
pub fn build_grid(image_size: u32, bounds: &Range) -> MandelbrotResult<CoordinateGrid> {
    validate_image_size(image_size)?;

    let size = image_size as f64;
    let last_row = image_size as usize - 1;
    let resolution = Resolution::square(image_size);

    let re = Grid::from_fn(resolution, |x, _| {
        bounds.min.x + x as f64 * bounds.real_span() / size
    });
    let im = Grid::from_fn(resolution, |_, y| {
        bounds.min.y + (last_row - y) as f64 * bounds.imaginary_span() / size
    });

    Ok(CoordinateGrid { re, im })
}
