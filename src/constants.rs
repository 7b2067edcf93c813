/// Quality search defaults. The search range matches what typical lossy
/// encoders accept without producing unusable output.
pub const MIN_QUALITY: u8 = 5;
pub const MAX_QUALITY: u8 = 95;
pub const BASELINE_QUALITY: u8 = 95;

/// Bisection stops once the remaining quality window is this narrow.
pub const CONVERGENCE_TOLERANCE: u8 = 2;

/// Default target size reduction (80% smaller than the original).
pub const DEFAULT_TARGET_REDUCTION: f64 = 0.8;

pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

/// Bitrate floor for video targets. Below this, x264 output degrades
/// faster than the size savings justify.
pub const MIN_VIDEO_BITRATE: u64 = 500_000;
pub const FALLBACK_VIDEO_BITRATE: u64 = 2_000_000;
pub const AUDIO_BITRATE: &str = "128k";

pub const DEFAULT_PDF_LEVEL: u8 = 3;

pub const GS_BINARY: &str = "gs";
pub const FFMPEG_BINARY: &str = "ffmpeg";
pub const FFPROBE_BINARY: &str = "ffprobe";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif", "webp",
];
pub const SUPPORTED_VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "mov", "avi", "webm", "m4v", "flv", "wmv",
];

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
