use image::{DynamicImage, ImageFormat, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// A decodable JPEG with enough detail that lossy re-encoding has work to
/// do.
pub fn create_real_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    gradient_image(256, 256)
        .save_with_format(&path, ImageFormat::Jpeg)
        .unwrap();
    path
}

/// A decodable opaque PNG (converts to JPEG when compressed).
pub fn create_real_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    gradient_image(64, 64)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

/// A file with an image extension but garbage contents.
pub fn create_fake_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"fake image data")
        .unwrap();
    path
}

pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    }))
}
