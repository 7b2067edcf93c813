/// Image compression front-end.
///
/// Loads the source in-process with the `image` crate, picks an output
/// format from the source format and transparency, then either drives the
/// quality search with an in-memory JPEG encoder or runs a single
/// lossless/keep-format pass.

use crate::constants::{
    BASELINE_QUALITY, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MAX_FILE_SIZE,
    MAX_IMAGE_DIMENSION, ZOPFLI_ITERATIONS,
};
use crate::error::{CompressionError, Result};
use crate::search::{search_quality, single_trial, QualityRange, SearchOutcome};
use crate::utils::{create_progress_spinner, print_size_report, validate_file_exists};
use crate::{info, verbose};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs;
use std::io::Cursor;
use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

/// Quality used for the single PNG optimization pass.
const PNG_PASS_QUALITY: u8 = 85;

/// Output container decision, made before any encoding starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy JPEG with a searchable quality axis.
    Jpeg,
    /// PNG kept for transparent sources, optimized with oxipng.
    Png,
    /// Any other decodable format, re-encoded as-is.
    Keep(ImageFormat),
}

/// Result of one image compression, including where the file actually
/// landed (the extension changes when a PNG converts to JPEG).
#[derive(Debug)]
pub struct ImageReport {
    pub original_size: u64,
    pub outcome: SearchOutcome,
    pub format: OutputFormat,
    pub output_path: PathBuf,
}

/// Pick the output container from the source format and transparency.
///
/// JPEG stays JPEG. PNG keeps its alpha channel by staying PNG; an opaque
/// PNG converts to JPEG for the better lossy ratio. Everything else is
/// re-encoded in its original format.
pub fn select_output_format(source: ImageFormat, has_transparency: bool) -> OutputFormat {
    match source {
        ImageFormat::Jpeg => OutputFormat::Jpeg,
        ImageFormat::Png if has_transparency => OutputFormat::Png,
        ImageFormat::Png => OutputFormat::Jpeg,
        other => OutputFormat::Keep(other),
    }
}

/// Rewrite the output extension when the container changed underneath it.
pub fn effective_output_path(
    output: &Path,
    source: ImageFormat,
    format: OutputFormat,
) -> PathBuf {
    if format == OutputFormat::Jpeg && source == ImageFormat::Png {
        return output.with_extension("jpg");
    }
    output.to_path_buf()
}

/// Load an image along with its detected format and file size.
///
/// Enforces the file-size cap before decoding and the dimension cap after,
/// so a hostile input cannot exhaust memory.
pub fn load_image_with_metadata(
    input_path: &Path,
) -> Result<(DynamicImage, Option<ImageFormat>, u64)> {
    validate_file_exists(input_path)?;

    let canonical_path = input_path
        .canonicalize()
        .map_err(|_| CompressionError::FileNotFound(input_path.to_path_buf()))?;

    let file_size = fs::metadata(&canonical_path)?.len();
    if file_size == 0 {
        return Err(CompressionError::EmptySource);
    }
    if file_size > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(file_size, MAX_FILE_SIZE));
    }

    let reader = ImageReader::open(&canonical_path)?.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode()?;

    let (width, height) = img.dimensions();
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }

    Ok((img, format, file_size))
}

fn encode_jpeg_to_memory(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)?;
    Ok(buf.into_inner())
}

fn png_deflater(quality: u8) -> Deflaters {
    if quality >= 90 {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).expect("nonzero iterations"),
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    }
}

/// Write the image as PNG and run it through oxipng into `output`.
fn optimize_png(img: &DynamicImage, output: &Path, quality: u8) -> Result<u64> {
    let temp_path = output.with_extension("temp.png");
    img.save_with_format(&temp_path, ImageFormat::Png)?;

    struct TempFileGuard(PathBuf);
    impl Drop for TempFileGuard {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }
    let _guard = TempFileGuard(temp_path.clone());

    let mut options = Options::from_preset(4);
    options.force = true;
    options.deflate = png_deflater(quality);

    let in_file = InFile::Path(temp_path.clone());
    let out_file = OutFile::Path {
        path: Some(output.to_path_buf()),
        preserve_attrs: false,
    };
    oxipng::optimize(&in_file, &out_file, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))?;

    Ok(fs::metadata(output)?.len())
}

/// Compress one image toward the target size reduction.
pub fn compress_image(
    input: &Path,
    output: &Path,
    target_reduction: f64,
) -> Result<ImageReport> {
    info!("🗜️  Compressing image: {:?}", input);

    let pb = create_progress_spinner("Loading image...");
    let (img, source_format, original_size) = load_image_with_metadata(input)?;
    pb.finish_with_message("✅ Image loaded");

    let source_format = source_format.ok_or_else(|| {
        CompressionError::UnsupportedFormat(format!("{:?}", input.extension()))
    })?;
    let format = select_output_format(source_format, img.color().has_alpha());
    let output_path = effective_output_path(output, source_format, format);
    if output_path != output {
        info!(
            "🔁 Converting PNG to JPEG. New output file: {:?}",
            output_path
        );
    }
    info!("📁 Output: {:?}", output_path);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }

    let pb = create_progress_spinner("Searching for target quality...");
    let outcome = match format {
        OutputFormat::Jpeg => {
            // JPEG cannot carry alpha; flatten before the search so every
            // trial encodes the same pixels.
            let rgb = if img.color().has_alpha() {
                DynamicImage::ImageRgb8(img.to_rgb8())
            } else {
                img
            };

            let outcome = search_quality(
                original_size,
                target_reduction,
                QualityRange::default(),
                |quality| {
                    verbose!("Trying quality {}", quality);
                    let bytes = encode_jpeg_to_memory(&rgb, quality)?;
                    Ok(bytes.len() as u64)
                },
            )?;

            let bytes = encode_jpeg_to_memory(&rgb, outcome.quality)?;
            fs::write(&output_path, bytes)?;
            outcome
        }
        OutputFormat::Png => single_trial(
            original_size,
            target_reduction,
            PNG_PASS_QUALITY,
            |quality| optimize_png(&img, &output_path, quality),
        )?,
        OutputFormat::Keep(fmt) => single_trial(
            original_size,
            target_reduction,
            BASELINE_QUALITY,
            |_quality| {
                img.save_with_format(&output_path, fmt)?;
                Ok(fs::metadata(&output_path)?.len())
            },
        )?,
    };
    pb.finish_with_message(format!(
        "✅ Done in {} encoder trial{}",
        outcome.trials,
        if outcome.trials == 1 { "" } else { "s" }
    ));

    print_size_report(original_size, outcome.encoded_size);
    info!("🎚️  Final quality: {}", outcome.quality);
    if !outcome.target_met {
        crate::warn!(
            "Target reduction of {:.0}% was not reachable; best achieved {:.1}%",
            target_reduction * 100.0,
            outcome.reduction * 100.0
        );
    }

    Ok(ImageReport {
        original_size,
        outcome,
        format,
        output_path,
    })
}
