use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::MandelbrotError, fractal::coordinates::validate_image_size,
    models::range::Range, result::MandelbrotResult,
};

pub const DEFAULT_ANIMATION_PATH: &str = "output.gif";

/// Everything a render run consumes, however it was parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_size: u32,
    /// Fixed iteration depth. Higher values trade time for a tighter
    /// approximation of the set; they never change what a pixel means.
    pub iteration_count: u32,
    pub bounds: Range,
    pub emit_snapshots: bool,
    pub output: PathBuf,
    pub animation: Option<PathBuf>,
    pub frames_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: 800,
            iteration_count: 100,
            bounds: Range::default(),
            emit_snapshots: false,
            output: PathBuf::from("output.png"),
            animation: None,
            frames_dir: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> MandelbrotResult<()> {
        validate_image_size(self.image_size)?;
        if self.iteration_count == 0 {
            return Err(MandelbrotError::InvalidConfiguration(
                "iteration count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the animation goes, if any. Snapshots with no other target fall
    /// back to `output.gif`.
    pub fn animation_path(&self) -> Option<PathBuf> {
        if !self.emit_snapshots {
            return None;
        }
        match (&self.animation, &self.frames_dir) {
            (Some(path), _) => Some(path.clone()),
            (None, None) => Some(PathBuf::from(DEFAULT_ANIMATION_PATH)),
            (None, Some(_)) => None,
        }
    }

    pub fn frames_dir(&self) -> Option<&Path> {
        if !self.emit_snapshots {
            return None;
        }
        self.frames_dir.as_deref()
    }

    pub fn from_json(config: &str) -> MandelbrotResult<Self> {
        Ok(serde_json::from_str(config)?)
    }

    pub fn to_json(&self) -> MandelbrotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> MandelbrotResult<Self> {
        let config = std::fs::read_to_string(path).map_err(|e| {
            MandelbrotError::InvalidConfiguration(format!(
                "cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&config)
    }

    /// The configuration echo, one line per setting. Built for any config,
    /// valid or not, so a rejected run still shows what it was given.
    pub fn echo_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Generating Mandelbrot set with the following configuration:".to_string(),
            format!("Output path: {}", self.output.display()),
            format!("Image size: {} x {}", self.image_size, self.image_size),
            format!("Iteration: {}", self.iteration_count),
            format!("Upper limit of real part: {}", self.bounds.max.x),
            format!("Lower limit of real part: {}", self.bounds.min.x),
            format!("Upper limit of imaginary part: {}", self.bounds.max.y),
            format!("Lower limit of imaginary part: {}", self.bounds.min.y),
        ];
        if let Some(animation) = self.animation_path() {
            lines.push(format!("Animation path: {}", animation.display()));
        }
        if let Some(frames_dir) = self.frames_dir() {
            lines.push(format!("Frames directory: {}", frames_dir.display()));
        }
        lines
    }

    pub fn echo(&self) {
        for line in self.echo_lines() {
            info!("{}", line);
        }
    }
}
