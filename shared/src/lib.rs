pub mod env;
pub mod error;
pub mod fractal;
pub mod logger;
pub mod models;
pub mod result;
pub mod sink;
