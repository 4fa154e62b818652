pub mod config;
pub mod grid;
pub mod point;
pub mod range;
pub mod resolution;
