use std::path::PathBuf;

use clap::Parser;
use shared::{models::config::RenderConfig, result::MandelbrotResult};

/// 🌀 Render Command
///
/// Flags override values read from `--config`, which override the defaults.
#[derive(Parser, Debug, Clone)]
#[command(name = "render", about = "🌀 Render the Mandelbrot set.", long_about = None)]
pub struct RenderCommand {
    /// 📏 Image size
    ///
    /// Width and height of the square output in pixels. Must be divisible by 4.
    #[arg(value_name = "IMAGE_SIZE", env = "MANDELBROT_IMAGE_SIZE")]
    pub image_size: Option<u32>,

    /// 🔁 Iterations
    ///
    /// Fixed number of iterations used for the convergence approximation.
    #[arg(short = 'n', long = "iterations", env = "MANDELBROT_ITERATIONS")]
    pub iteration_count: Option<u32>,

    /// Upper bound of the real part
    #[arg(long, allow_negative_numbers = true)]
    pub upper_real: Option<f64>,

    /// Lower bound of the real part
    #[arg(long, allow_negative_numbers = true)]
    pub lower_real: Option<f64>,

    /// Upper bound of the imaginary part
    #[arg(long, allow_negative_numbers = true)]
    pub upper_imag: Option<f64>,

    /// Lower bound of the imaginary part
    #[arg(long, allow_negative_numbers = true)]
    pub lower_imag: Option<f64>,

    /// 🖼️ Output image
    #[arg(short, long, value_name = "PATH", env = "MANDELBROT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// 🎞️ Animation
    ///
    /// Emit a frame after every iteration, written to `output.gif` unless
    /// `--animation` or `--frames-dir` says otherwise.
    #[arg(short = 'V', long)]
    pub video: bool,

    /// Animated GIF path, implies `--video`
    #[arg(long, value_name = "PATH")]
    pub animation: Option<PathBuf>,

    /// Directory receiving one PNG per iteration, implies `--video`
    #[arg(long, value_name = "DIR")]
    pub frames_dir: Option<PathBuf>,

    /// 🧾 JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RenderCommand {
    pub fn to_config(&self) -> MandelbrotResult<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };

        if let Some(image_size) = self.image_size {
            config.image_size = image_size;
        }
        if let Some(iteration_count) = self.iteration_count {
            config.iteration_count = iteration_count;
        }
        if let Some(upper_real) = self.upper_real {
            config.bounds.max.x = upper_real;
        }
        if let Some(lower_real) = self.lower_real {
            config.bounds.min.x = lower_real;
        }
        if let Some(upper_imag) = self.upper_imag {
            config.bounds.max.y = upper_imag;
        }
        if let Some(lower_imag) = self.lower_imag {
            config.bounds.min.y = lower_imag;
        }
        if let Some(output) = &self.output {
            config.output = output.to_owned();
        }
        if let Some(animation) = &self.animation {
            config.animation = Some(animation.to_owned());
        }
        if let Some(frames_dir) = &self.frames_dir {
            config.frames_dir = Some(frames_dir.to_owned());
        }
        if self.video || self.animation.is_some() || self.frames_dir.is_some() {
            config.emit_snapshots = true;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use shared::models::range::Range;

    use super::*;

    fn parse(args: &[&str]) -> RenderConfig {
        let mut argv = vec!["render"];
        argv.extend_from_slice(args);
        RenderCommand::try_parse_from(argv)
            .unwrap()
            .to_config()
            .unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "400",
            "-n",
            "25",
            "--lower-real",
            "-0.5",
            "--upper-real",
            "0",
            "--lower-imag",
            "-1",
            "--upper-imag",
            "-0.5",
            "-o",
            "zoom.png",
        ]);

        assert_eq!(config.image_size, 400);
        assert_eq!(config.iteration_count, 25);
        assert_eq!(config.bounds, Range::from_bounds(-0.5, 0.0, -1.0, -0.5));
        assert_eq!(config.output, PathBuf::from("zoom.png"));
        assert!(!config.emit_snapshots);
    }

    #[test]
    fn frames_dir_implies_snapshots() {
        let config = parse(&["8", "--frames-dir", "frames"]);
        assert!(config.emit_snapshots);
        assert_eq!(config.animation_path(), None);
    }

    #[test]
    fn video_flag_enables_the_default_animation() {
        let config = parse(&["8", "-V"]);
        assert!(config.emit_snapshots);
        assert_eq!(config.animation_path(), Some(PathBuf::from("output.gif")));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let command =
            RenderCommand::try_parse_from(["render", "8", "--config", "/nonexistent.json"])
                .unwrap();
        assert!(command.to_config().is_err());
    }
}
