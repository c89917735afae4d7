//! Evidence screenshot compression: downscale and re-encode as PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use tracing::debug;

use crate::CaptureError;

/// Linear scale applied to both dimensions.
pub const SCALE: f64 = 0.7;

/// Compress the screenshot at `src` into `<stem>_compressed.png` next to it,
/// then delete `src`. Returns the compressed file's path.
///
/// Blocking; call from `spawn_blocking` inside async code.
pub fn compress_png(src: &Path) -> Result<PathBuf, CaptureError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| CaptureError::Io { path, source }
    };

    let stem = src
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CaptureError::Io {
            path: src.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"),
        })?;
    let dest = src.with_file_name(format!("{stem}_compressed.png"));

    let original = image::open(src)?;
    let (width, height) = (scaled(original.width()), scaled(original.height()));
    let resized = original.resize_exact(width, height, FilterType::Lanczos3);

    let file = File::create(&dest).map_err(io_err(&dest))?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Best,
        PngFilter::Adaptive,
    );
    resized.write_with_encoder(encoder)?;

    std::fs::remove_file(src).map_err(io_err(src))?;
    debug!(src = %src.display(), dest = %dest.display(), width, height, "screenshot compressed");
    Ok(dest)
}

fn scaled(dim: u32) -> u32 {
    ((dim as f64 * SCALE).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn scales_to_seventy_percent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = write_png(tmp.path(), "Henri#EUW.png", 100, 50);

        let dest = compress_png(&src).unwrap();

        assert_eq!(dest, tmp.path().join("Henri#EUW_compressed.png"));
        let out = image::open(&dest).unwrap();
        assert_eq!((out.width(), out.height()), (70, 35));
    }

    #[test]
    fn original_is_deleted() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = write_png(tmp.path(), "x#1.png", 20, 20);
        compress_png(&src).unwrap();
        assert!(!src.exists());
    }

    #[test]
    fn dimensions_round_and_never_hit_zero() {
        assert_eq!(scaled(3), 2);
        assert_eq!(scaled(5), 4);
        assert_eq!(scaled(1), 1);
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(compress_png(&tmp.path().join("missing.png")).is_err());
    }

    #[test]
    fn garbage_source_is_an_image_error_and_kept() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("bad.png");
        std::fs::write(&src, b"not a png").unwrap();
        assert!(matches!(compress_png(&src), Err(CaptureError::Image(_))));
        assert!(src.exists());
    }
}
