use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub nx: u32,
    pub ny: u32,
}

impl Resolution {
    pub fn new(nx: u32, ny: u32) -> Self {
        Self { nx, ny }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn pixel_count(&self) -> usize {
        self.nx as usize * self.ny as usize
    }
}
