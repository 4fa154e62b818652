use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{
    error::MandelbrotError, fractal::Snapshot, result::MandelbrotResult, sink::FrameSink,
};

use super::still::write_frame;

pub const TIMELINE_FILE: &str = "timeline.json";

/// One entry of `timeline.json`: which file holds which step, and how long
/// the run had been going when it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub step: u32,
    pub elapsed_secs: f64,
    pub file: String,
}

/// Writes each snapshot as its own grayscale PNG, `frame_00001.png` onwards,
/// and their timings to `timeline.json` on finish.
pub struct FrameDirectorySink {
    dir: PathBuf,
    timeline: Vec<FrameRecord>,
}

impl FrameDirectorySink {
    pub fn create(dir: &Path) -> MandelbrotResult<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            MandelbrotError::SinkFailure(format!(
                "failed to create frames directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            timeline: Vec::new(),
        })
    }

    pub fn frame_path(&self, step: u32) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", step))
    }
}

impl FrameSink for FrameDirectorySink {
    fn name(&self) -> &str {
        "frames"
    }

    fn consume(&mut self, snapshot: &Snapshot) -> MandelbrotResult<()> {
        let path = self.frame_path(snapshot.step);
        write_frame(&path, &snapshot.membership)?;
        self.timeline.push(FrameRecord {
            step: snapshot.step,
            elapsed_secs: snapshot.elapsed.as_secs_f64(),
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        });
        debug!(
            "frame {} written after {:.3} s",
            path.display(),
            snapshot.elapsed.as_secs_f64()
        );
        Ok(())
    }

    fn finish(&mut self) -> MandelbrotResult<()> {
        let timeline_path = self.dir.join(TIMELINE_FILE);
        std::fs::write(&timeline_path, serde_json::to_string_pretty(&self.timeline)?).map_err(
            |e| {
                MandelbrotError::SinkFailure(format!(
                    "failed to write {}: {}",
                    timeline_path.display(),
                    e
                ))
            },
        )?;
        info!(
            "{} frames written to {}",
            self.timeline.len(),
            self.dir.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shared::models::{grid::Grid, resolution::Resolution};

    use super::*;

    #[test]
    fn one_numbered_png_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let frames_dir = dir.path().join("frames");
        let mut sink = FrameDirectorySink::create(&frames_dir).unwrap();

        for step in 1..=3 {
            let snapshot = Snapshot {
                membership: Grid::filled(Resolution::square(8), step % 2 == 0),
                step,
                elapsed: Duration::from_millis(250 * step as u64),
            };
            sink.consume(&snapshot).unwrap();
        }
        sink.finish().unwrap();

        let mut names: Vec<String> = std::fs::read_dir(&frames_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "frame_00001.png",
                "frame_00002.png",
                "frame_00003.png",
                "timeline.json"
            ]
        );

        let second = image::open(frames_dir.join("frame_00002.png")).unwrap().into_luma8();
        assert!(second.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn timeline_records_elapsed_seconds_per_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FrameDirectorySink::create(dir.path()).unwrap();

        for step in [1, 2] {
            let snapshot = Snapshot {
                membership: Grid::filled(Resolution::square(4), true),
                step,
                elapsed: Duration::from_millis(500 * step as u64),
            };
            sink.consume(&snapshot).unwrap();
        }
        sink.finish().unwrap();

        let timeline = std::fs::read_to_string(dir.path().join(TIMELINE_FILE)).unwrap();
        let records: Vec<FrameRecord> = serde_json::from_str(&timeline).unwrap();
        assert_eq!(
            records,
            vec![
                FrameRecord {
                    step: 1,
                    elapsed_secs: 0.5,
                    file: "frame_00001.png".to_string(),
                },
                FrameRecord {
                    step: 2,
                    elapsed_secs: 1.0,
                    file: "frame_00002.png".to_string(),
                },
            ]
        );
    }
}
