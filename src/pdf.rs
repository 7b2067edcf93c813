/// PDF compression front-end.
///
/// Thin collaborator around Ghostscript's `pdfwrite` device: a 0-4
/// compression level maps onto the `-dPDFSETTINGS` presets.

use crate::constants::GS_BINARY;
use crate::error::{CompressionError, Result};
use crate::utils::{create_progress_spinner, print_size_report, validate_file_exists};
use crate::info;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Ghostscript `-dPDFSETTINGS` presets, ordered from least to most
/// aggressive compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfPreset {
    Default,
    Prepress,
    Printer,
    Ebook,
    Screen,
}

impl PdfPreset {
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            0 => Ok(PdfPreset::Default),
            1 => Ok(PdfPreset::Prepress),
            2 => Ok(PdfPreset::Printer),
            3 => Ok(PdfPreset::Ebook),
            4 => Ok(PdfPreset::Screen),
            _ => Err(CompressionError::UnsupportedFormat(format!(
                "PDF compression level {} (expected 0-4)",
                level
            ))),
        }
    }

    pub fn setting(&self) -> &'static str {
        match self {
            PdfPreset::Default => "/default",
            PdfPreset::Prepress => "/prepress",
            PdfPreset::Printer => "/printer",
            PdfPreset::Ebook => "/ebook",
            PdfPreset::Screen => "/screen",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            PdfPreset::Default => "Default (lowest compression, highest quality)",
            PdfPreset::Prepress => "Prepress (high quality, less compression)",
            PdfPreset::Printer => "Printer (medium quality, medium compression)",
            PdfPreset::Ebook => "Ebook (medium-low quality, better compression)",
            PdfPreset::Screen => "Screen (lowest quality, highest compression)",
        }
    }
}

#[derive(Debug)]
pub struct PdfReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub preset: PdfPreset,
}

pub fn is_ghostscript_available() -> bool {
    which::which(GS_BINARY).is_ok()
}

fn gs_args(input: &Path, output: &Path, preset: PdfPreset) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    args.push("-sDEVICE=pdfwrite".into());
    args.push("-dCompatibilityLevel=1.4".into());
    args.push(format!("-dPDFSETTINGS={}", preset.setting()).into());
    args.push("-dNOPAUSE".into());
    args.push("-dQUIET".into());
    args.push("-dBATCH".into());
    let mut out_flag = OsString::from("-sOutputFile=");
    out_flag.push(output.as_os_str());
    args.push(out_flag);
    args.push(input.into());
    args
}

/// Compress one PDF with the given preset.
pub fn compress_pdf(input: &Path, output: &Path, preset: PdfPreset) -> Result<PdfReport> {
    if !is_ghostscript_available() {
        return Err(CompressionError::ToolNotFound {
            tool: GS_BINARY.to_string(),
            hint: "Install Ghostscript and ensure `gs` is in PATH".to_string(),
        });
    }
    validate_file_exists(input)?;

    let original_size = fs::metadata(input)?.len();
    if original_size == 0 {
        return Err(CompressionError::EmptySource);
    }

    info!("📄 Compressing PDF: {:?}", input);
    info!("🎚️  Preset: {}", preset.describe());

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }

    let pb = create_progress_spinner("Running Ghostscript...");
    let result = Command::new(GS_BINARY).args(gs_args(input, output, preset)).output()?;
    if !result.status.success() {
        pb.finish_and_clear();
        return Err(CompressionError::ToolFailed {
            tool: GS_BINARY.to_string(),
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    pb.finish_with_message("✅ Ghostscript finished");

    let compressed_size = fs::metadata(output)?.len();
    print_size_report(original_size, compressed_size);

    Ok(PdfReport {
        original_size,
        compressed_size,
        preset,
    })
}
