/// `ffprobe` wrapper.
///
/// Runs `ffprobe -print_format json -show_format -show_streams` and pulls
/// out the bits the video front-end needs. Numeric fields arrive as JSON
/// strings, so everything is parsed defensively.

use crate::constants::{FALLBACK_VIDEO_BITRATE, FFPROBE_BINARY};
use crate::error::{CompressionError, Result};
use crate::utils::validate_file_exists;
use crate::warn;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
}

/// What the video front-end needs to know about a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub bitrate: u64,
}

pub fn is_ffprobe_available() -> bool {
    which::which(FFPROBE_BINARY).is_ok()
}

/// Probe a video file for its bitrate.
///
/// Preference order: the first video stream's `bit_rate`, then
/// `format.size * 8 / format.duration`, then a 2 Mbps fallback.
pub fn probe_video(path: &Path) -> Result<VideoInfo> {
    if !is_ffprobe_available() {
        return Err(CompressionError::ToolNotFound {
            tool: FFPROBE_BINARY.to_string(),
            hint: "Install FFmpeg (it ships ffprobe) and ensure it is in PATH".to_string(),
        });
    }
    validate_file_exists(path)?;

    let output = Command::new(FFPROBE_BINARY)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "--",
        ])
        .arg(path)
        .output()?;

    if !output.status.success() {
        return Err(CompressionError::ToolFailed {
            tool: FFPROBE_BINARY.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let parsed: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    Ok(VideoInfo {
        bitrate: extract_bitrate(&parsed),
    })
}

fn extract_bitrate(parsed: &FfprobeOutput) -> u64 {
    let stream_bitrate = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .and_then(|s| s.bit_rate.as_deref())
        .and_then(|b| b.parse::<u64>().ok());

    if let Some(bitrate) = stream_bitrate {
        return bitrate;
    }

    let derived = parsed.format.as_ref().and_then(|f| {
        let size = f.size.as_deref()?.parse::<u64>().ok()?;
        let duration = f.duration.as_deref()?.parse::<f64>().ok()?;
        if duration > 0.0 {
            Some((size as f64 * 8.0 / duration) as u64)
        } else {
            None
        }
    });

    derived.unwrap_or_else(|| {
        warn!("Could not determine video bitrate. Using default value.");
        FALLBACK_VIDEO_BITRATE
    })
}
