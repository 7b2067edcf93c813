/// Helper functions shared by the image, PDF and video front-ends.

use crate::constants::{
    PROGRESS_SPINNER_TEMPLATE, SUPPORTED_IMAGE_EXTENSIONS, SUPPORTED_VIDEO_EXTENSIONS,
};
use crate::error::{CompressionError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Check if a file path has a supported image extension
pub fn is_image_file(path: &Path) -> bool {
    has_extension_in(path, SUPPORTED_IMAGE_EXTENSIONS)
}

/// Check if a file path has a supported video extension
pub fn is_video_file(path: &Path) -> bool {
    has_extension_in(path, SUPPORTED_VIDEO_EXTENSIONS)
}

/// Check if a file path has a `.pdf` extension
pub fn is_pdf_file(path: &Path) -> bool {
    has_extension_in(path, &["pdf"])
}

fn has_extension_in(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            extensions.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Validate that a file exists and return a descriptive error if not
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Default output path: `<stem>_compressed.<ext>` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let mut name = format!("{}_compressed", stem);
    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    match input.parent() {
        Some(parent) if parent != Path::new("") => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Create a progress spinner with consistent styling
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(PROGRESS_SPINNER_TEMPLATE)
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Format file size in human-readable format
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size reduction as a fraction of the original, `(original - compressed) / original`.
/// Negative when the output grew.
pub fn reduction_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size as f64 - compressed_size as f64) / original_size as f64
}

/// Print the before/after size report shared by all three tools
pub fn print_size_report(original_size: u64, compressed_size: u64) {
    let ratio = reduction_ratio(original_size, compressed_size) * 100.0;

    crate::info!(
        "📊 Original size: {} ({} bytes)",
        format_file_size(original_size),
        original_size
    );
    crate::info!(
        "📈 Compressed size: {} ({} bytes)",
        format_file_size(compressed_size),
        compressed_size
    );
    crate::info!("🎯 Reduction: {:.1}%", ratio);

    if ratio > 0.0 {
        crate::info!("✅ Successfully reduced file size by {:.1}%", ratio);
    } else {
        crate::warn!(
            "The compressed file is larger than the original ({:.1}%). \
             This can happen with already optimized files.",
            ratio.abs()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("test.jpg")));
        assert!(is_image_file(Path::new("test.JPEG")));
        assert!(is_image_file(Path::new("test.png")));
        assert!(is_image_file(Path::new("test.webp")));
        assert!(is_image_file(Path::new("test.bmp")));
        assert!(is_image_file(Path::new("test.tiff")));
        assert!(is_image_file(Path::new("test.gif")));

        assert!(!is_image_file(Path::new("test.txt")));
        assert!(!is_image_file(Path::new("test")));
        assert!(!is_image_file(Path::new("test.pdf")));
    }

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("clip.mp4")));
        assert!(is_video_file(Path::new("clip.MKV")));
        assert!(is_video_file(Path::new("clip.mov")));

        assert!(!is_video_file(Path::new("clip.jpg")));
        assert!(!is_video_file(Path::new("clip")));
    }

    #[test]
    fn test_is_pdf_file() {
        assert!(is_pdf_file(Path::new("doc.pdf")));
        assert!(is_pdf_file(Path::new("doc.PDF")));
        assert!(!is_pdf_file(Path::new("doc.docx")));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("photo.jpg")),
            PathBuf::from("photo_compressed.jpg")
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/doc.pdf")),
            PathBuf::from("/tmp/doc_compressed.pdf")
        );
        assert_eq!(
            default_output_path(Path::new("noext")),
            PathBuf::from("noext_compressed")
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_reduction_ratio() {
        assert_eq!(reduction_ratio(1000, 800), 0.2);
        assert_eq!(reduction_ratio(1000, 1200), -0.2);
        assert_eq!(reduction_ratio(1000, 1000), 0.0);
        assert_eq!(reduction_ratio(0, 500), 0.0);
    }

    #[test]
    fn test_validate_file_exists() {
        let result = validate_file_exists(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }
}
