use std::path::Path;

use image::GrayImage;
use log::info;
use shared::{error::MandelbrotError, models::grid::MembershipGrid, result::MandelbrotResult};

pub fn to_gray_image(membership: &MembershipGrid) -> MandelbrotResult<GrayImage> {
    GrayImage::from_raw(
        membership.width() as u32,
        membership.height() as u32,
        membership.to_luma_bytes(),
    )
    .ok_or_else(|| {
        MandelbrotError::SinkFailure(format!(
            "membership grid {:?} does not fit an 8-bit image",
            membership.resolution()
        ))
    })
}

pub(crate) fn write_frame(path: &Path, membership: &MembershipGrid) -> MandelbrotResult<()> {
    to_gray_image(membership)?.save(path).map_err(|e| {
        MandelbrotError::SinkFailure(format!("failed to write {}: {}", path.display(), e))
    })
}

/// Writes the final membership grid as an 8-bit grayscale image, members
/// white. The format follows the file extension.
pub fn write_still(path: &Path, membership: &MembershipGrid) -> MandelbrotResult<()> {
    write_frame(path, membership)?;
    info!(
        "Still image written to {} ({} members)",
        path.display(),
        membership.member_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{grid::Grid, resolution::Resolution};

    #[test]
    fn still_is_white_on_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        let membership =
            Grid::from_vec(Resolution::new(2, 2), vec![true, false, false, true]).unwrap();

        write_still(&path, &membership).unwrap();

        let image = image::open(&path).unwrap().into_luma8();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.into_raw(), vec![255, 0, 0, 255]);
    }

    #[test]
    fn unwritable_path_is_a_sink_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("still.png");
        let membership = Grid::filled(Resolution::square(4), true);

        assert!(matches!(
            write_still(&path, &membership),
            Err(MandelbrotError::SinkFailure(_))
        ));
    }
}
