use clap::Subcommand;

use self::render::RenderCommand;

pub mod render;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 🌀 Render
    ///
    /// Compute the Mandelbrot set over the given bounds and write the still
    /// image, plus the per-iteration animation when requested.
    Render(RenderCommand),

    /// 🧾 Show Configuration
    ///
    /// Resolve flags, environment and config file, validate the result and
    /// print it as JSON without rendering anything.
    Config(RenderCommand),
}
