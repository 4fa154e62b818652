use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, DynamicImage, Frame,
};
use log::{debug, info};
use shared::{
    error::MandelbrotError, fractal::Snapshot, result::MandelbrotResult, sink::FrameSink,
};

use super::still::to_gray_image;

/// 20 frames per second.
pub const FRAME_DELAY_MS: u32 = 50;

/// Encodes every snapshot into one looping animated GIF.
pub struct AnimationSink {
    path: PathBuf,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    frames: u32,
}

impl AnimationSink {
    /// Opens the output right away so a bad path fails before any iteration.
    pub fn create(path: &Path) -> MandelbrotResult<Self> {
        let file = File::create(path).map_err(|e| {
            MandelbrotError::SinkFailure(format!(
                "failed to open output animation {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| encoding_failure(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            encoder: Some(encoder),
            frames: 0,
        })
    }
}

fn encoding_failure(path: &Path, error: image::ImageError) -> MandelbrotError {
    MandelbrotError::SinkFailure(format!("failed to encode {}: {}", path.display(), error))
}

impl FrameSink for AnimationSink {
    fn name(&self) -> &str {
        "animation"
    }

    fn consume(&mut self, snapshot: &Snapshot) -> MandelbrotResult<()> {
        let encoder = self.encoder.as_mut().ok_or_else(|| {
            MandelbrotError::SinkFailure(format!("{} is already closed", self.path.display()))
        })?;

        let rgba = DynamicImage::ImageLuma8(to_gray_image(&snapshot.membership)?).into_rgba8();
        let frame = Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1));
        encoder
            .encode_frame(frame)
            .map_err(|e| encoding_failure(&self.path, e))?;

        self.frames += 1;
        debug!("animation frame {} (step {})", self.frames, snapshot.step);
        Ok(())
    }

    fn finish(&mut self) -> MandelbrotResult<()> {
        // the GIF trailer is written when the encoder is dropped
        if self.encoder.take().is_some() {
            info!(
                "Animation written to {} ({} frames)",
                self.path.display(),
                self.frames
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use image::{codecs::gif::GifDecoder, AnimationDecoder};
    use shared::models::{grid::Grid, resolution::Resolution};

    use super::*;

    fn snapshot(step: u32, member: bool) -> Snapshot {
        Snapshot {
            membership: Grid::filled(Resolution::square(4), member),
            step,
            elapsed: Duration::from_millis(step as u64),
        }
    }

    #[test]
    fn encodes_one_frame_per_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.gif");

        let mut sink = AnimationSink::create(&path).unwrap();
        sink.consume(&snapshot(1, true)).unwrap();
        sink.consume(&snapshot(2, false)).unwrap();
        sink.consume(&snapshot(3, true)).unwrap();
        sink.finish().unwrap();

        let decoder = GifDecoder::new(File::open(&path).unwrap()).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].buffer().dimensions(), (4, 4));
        assert!(frames[1].buffer().get_pixel(0, 0).0[0] < 128);
        assert!(frames[2].buffer().get_pixel(0, 0).0[0] > 128);
    }

    #[test]
    fn unopenable_output_fails_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.gif");
        assert!(matches!(
            AnimationSink::create(&path),
            Err(MandelbrotError::SinkFailure(_))
        ));
    }

    #[test]
    fn consume_after_finish_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = AnimationSink::create(&dir.path().join("run.gif")).unwrap();
        sink.finish().unwrap();
        assert!(sink.consume(&snapshot(1, true)).is_err());
    }
}
