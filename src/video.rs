/// Video compression front-end.
///
/// Probes the source bitrate with ffprobe, derives a target bitrate from
/// the requested size reduction, then runs a two-pass libx264 encode. The
/// two-pass analysis log lives in a temporary directory handed to FFmpeg
/// via `-passlogfile`, so nothing leaks into the working directory.

use crate::constants::{AUDIO_BITRATE, FFMPEG_BINARY, MIN_VIDEO_BITRATE};
use crate::error::{CompressionError, Result};
use crate::probe::probe_video;
use crate::utils::{create_progress_spinner, print_size_report, validate_file_exists};
use crate::{info, warn};
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
pub struct VideoReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub original_bitrate: u64,
    pub target_bitrate: u64,
}

pub fn is_ffmpeg_available() -> bool {
    which::which(FFMPEG_BINARY).is_ok()
}

/// Target bitrate for the requested reduction, floored at the minimum the
/// encoder can use without falling apart. The boolean reports whether the
/// floor engaged.
pub fn compute_target_bitrate(original_bitrate: u64, target_reduction: f64) -> Result<(u64, bool)> {
    if !(target_reduction > 0.0 && target_reduction < 1.0) {
        return Err(CompressionError::InvalidTargetReduction(target_reduction));
    }

    let target = (original_bitrate as f64 * (1.0 - target_reduction)) as u64;
    if target < MIN_VIDEO_BITRATE {
        Ok((MIN_VIDEO_BITRATE, true))
    } else {
        Ok((target, false))
    }
}

fn null_sink() -> &'static str {
    if cfg!(windows) {
        "NUL"
    } else {
        "/dev/null"
    }
}

fn first_pass_args(input: &Path, target_bitrate: u64, passlog: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    args.push("-y".into());
    args.push("-i".into());
    args.push(input.into());
    args.push("-c:v".into());
    args.push("libx264".into());
    args.push("-b:v".into());
    args.push(target_bitrate.to_string().into());
    args.push("-pass".into());
    args.push("1".into());
    args.push("-passlogfile".into());
    args.push(passlog.into());
    args.push("-an".into());
    args.push("-f".into());
    args.push("null".into());
    args.push(null_sink().into());
    args
}

fn second_pass_args(
    input: &Path,
    output: &Path,
    target_bitrate: u64,
    passlog: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    args.push("-y".into());
    args.push("-i".into());
    args.push(input.into());
    args.push("-c:v".into());
    args.push("libx264".into());
    args.push("-b:v".into());
    args.push(target_bitrate.to_string().into());
    args.push("-pass".into());
    args.push("2".into());
    args.push("-passlogfile".into());
    args.push(passlog.into());
    args.push("-preset".into());
    args.push("slow".into());
    args.push("-c:a".into());
    args.push("aac".into());
    args.push("-b:a".into());
    args.push(AUDIO_BITRATE.into());
    args.push(output.into());
    args
}

fn run_ffmpeg(args: &[OsString]) -> Result<()> {
    let output = Command::new(FFMPEG_BINARY).args(args).output()?;
    if !output.status.success() {
        return Err(CompressionError::ToolFailed {
            tool: FFMPEG_BINARY.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Compress one video toward the target size reduction.
pub fn compress_video(input: &Path, output: &Path, target_reduction: f64) -> Result<VideoReport> {
    if !is_ffmpeg_available() {
        return Err(CompressionError::ToolNotFound {
            tool: FFMPEG_BINARY.to_string(),
            hint: "Install FFmpeg and ensure it is in PATH".to_string(),
        });
    }
    validate_file_exists(input)?;

    let original_size = fs::metadata(input)?.len();
    if original_size == 0 {
        return Err(CompressionError::EmptySource);
    }

    let video_info = probe_video(input)?;
    let (target_bitrate, floored) = compute_target_bitrate(video_info.bitrate, target_reduction)?;
    if floored {
        warn!(
            "Calculated target bitrate is very low. Setting to minimum {} kbps.",
            MIN_VIDEO_BITRATE / 1000
        );
    }

    info!("🎬 Compressing video: {:?}", input);
    info!("📊 Original bitrate: {} kbps", video_info.bitrate / 1000);
    info!("🎯 Target bitrate: {} kbps", target_bitrate / 1000);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }

    // Pass logs live here and vanish with the TempDir.
    let pass_dir = tempfile::tempdir()?;
    let passlog = pass_dir.path().join("ffmpeg2pass");

    let pb = create_progress_spinner("First pass (analysis)...");
    run_ffmpeg(&first_pass_args(input, target_bitrate, &passlog))?;
    pb.finish_with_message("✅ First pass complete");

    let pb = create_progress_spinner("Second pass (encoding)...");
    run_ffmpeg(&second_pass_args(input, output, target_bitrate, &passlog))?;
    pb.finish_with_message("✅ Second pass complete");

    let compressed_size = fs::metadata(output)?.len();
    print_size_report(original_size, compressed_size);

    Ok(VideoReport {
        original_size,
        compressed_size,
        original_bitrate: video_info.bitrate,
        target_bitrate,
    })
}
