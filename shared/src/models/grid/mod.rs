use std::ops::Index;

use super::resolution::Resolution;

/// A 2D raster stored as a flat row-major buffer: cell `(x, y)` lives at
/// `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    resolution: Resolution,
    cells: Vec<T>,
}

/// Per-pixel "in set / escaped" classification.
pub type MembershipGrid = Grid<bool>;

impl<T: Clone> Grid<T> {
    pub fn filled(resolution: Resolution, value: T) -> Self {
        Self {
            resolution,
            cells: vec![value; resolution.pixel_count()],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn<F>(resolution: Resolution, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let width = resolution.nx as usize;
        let cells = (0..resolution.pixel_count())
            .map(|i| f(i % width, i / width))
            .collect();
        Self { resolution, cells }
    }

    /// Wraps an existing row-major buffer, `None` if its length does not match.
    pub fn from_vec(resolution: Resolution, cells: Vec<T>) -> Option<Self> {
        if cells.len() != resolution.pixel_count() {
            return None;
        }
        Some(Self { resolution, cells })
    }

    pub(crate) fn with_cells(resolution: Resolution, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), resolution.pixel_count());
        Self { resolution, cells }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> usize {
        self.resolution.nx as usize
    }

    pub fn height(&self) -> usize {
        self.resolution.ny as usize
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.cells.get(y * self.width() + x)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn row(&self, y: usize) -> &[T] {
        let width = self.width();
        &self.cells[y * width..(y + 1) * width]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width() && y < self.height(), "cell ({x}, {y}) out of bounds");
        &self.cells[y * self.width() + x]
    }
}

impl MembershipGrid {
    pub fn member_count(&self) -> usize {
        self.cells.iter().filter(|&&member| member).count()
    }

    /// 8-bit grayscale raster, members at 255 and escaped points at 0.
    pub fn to_luma_bytes(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|&member| if member { 255 } else { 0 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_fills_row_major() {
        let grid = Grid::from_fn(Resolution::new(3, 2), |x, y| (x, y));
        assert_eq!(grid.cells()[4], (1, 1));
        assert_eq!(grid[(2, 0)], (2, 0));
        assert_eq!(grid.row(1), &[(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn get_outside_the_grid_is_none() {
        let grid = Grid::filled(Resolution::square(4), 0u8);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.get(3, 3), Some(&0));
    }

    #[test]
    fn from_vec_rejects_mismatched_length() {
        assert!(Grid::from_vec(Resolution::square(2), vec![1, 2, 3]).is_none());
        assert!(Grid::from_vec(Resolution::square(2), vec![1, 2, 3, 4]).is_some());
    }

    #[test]
    fn luma_bytes_map_members_to_white() {
        let grid = Grid::from_vec(Resolution::new(2, 1), vec![true, false]).unwrap();
        assert_eq!(grid.to_luma_bytes(), vec![255, 0]);
        assert_eq!(grid.member_count(), 1);
    }
}
