mod cli;

use clap::Parser;
use cli::{Args, Commands};
use media_squeeze::constants::{DEFAULT_PDF_LEVEL, DEFAULT_TARGET_REDUCTION};
use media_squeeze::error::Result;
use media_squeeze::utils::{default_output_path, validate_file_exists};
use media_squeeze::{info, install, pdf, processing, prompt, utils, video};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args = Args::parse();
    media_squeeze::logger::set_quiet_mode(args.quiet);
    media_squeeze::logger::set_verbose_mode(args.verbose);

    match args.command {
        Commands::Image {
            input,
            output,
            target,
        } => run_image(input, output, target),
        Commands::Pdf {
            input,
            output,
            level,
        } => run_pdf(input, output, level),
        Commands::Video {
            input,
            output,
            target,
        } => run_video(input, output, target),
        Commands::Setup { yes } => install::run_setup(yes),
    }
}

/// Resolve an input path from the argument or, interactively, from a
/// prompt. `Ok(None)` means the user quit.
fn resolve_input(
    arg: Option<PathBuf>,
    prompt_text: &str,
    accepts: fn(&std::path::Path) -> bool,
) -> Result<Option<PathBuf>> {
    match arg {
        Some(path) => {
            validate_file_exists(&path)?;
            Ok(Some(path))
        }
        None => prompt::input_path(prompt_text, accepts),
    }
}

fn run_image(input: Option<PathBuf>, output: Option<PathBuf>, target: Option<u8>) -> Result<()> {
    let interactive = input.is_none();
    let input = match resolve_input(input, "Enter the path to the image file", utils::is_image_file)? {
        Some(path) => path,
        None => {
            info!("Exiting program.");
            return Ok(());
        }
    };

    let output = match output {
        Some(path) => path,
        None if interactive => prompt::output_path(&input)?,
        None => default_output_path(&input),
    };

    let target = match target {
        Some(percent) => percent as f64 / 100.0,
        None if interactive => prompt::target_reduction()?,
        None => DEFAULT_TARGET_REDUCTION,
    };

    processing::compress_image(&input, &output, target)?;
    Ok(())
}

fn run_pdf(input: Option<PathBuf>, output: Option<PathBuf>, level: Option<u8>) -> Result<()> {
    let interactive = input.is_none();
    let input = match resolve_input(input, "Enter the path to the PDF file", utils::is_pdf_file)? {
        Some(path) => path,
        None => {
            info!("Exiting program.");
            return Ok(());
        }
    };

    let output = match output {
        Some(path) => path,
        None if interactive => prompt::output_path(&input)?,
        None => default_output_path(&input),
    };

    let preset = match level {
        Some(level) => pdf::PdfPreset::from_level(level)?,
        None if interactive => prompt::pdf_preset(DEFAULT_PDF_LEVEL)?,
        None => pdf::PdfPreset::from_level(DEFAULT_PDF_LEVEL)?,
    };

    pdf::compress_pdf(&input, &output, preset)?;
    Ok(())
}

fn run_video(input: Option<PathBuf>, output: Option<PathBuf>, target: Option<u8>) -> Result<()> {
    let interactive = input.is_none();
    let input = match resolve_input(input, "Enter the path to the video file", utils::is_video_file)? {
        Some(path) => path,
        None => {
            info!("Exiting program.");
            return Ok(());
        }
    };

    let output = match output {
        Some(path) => path,
        None if interactive => prompt::output_path(&input)?,
        None => default_output_path(&input),
    };

    let target = match target {
        Some(percent) => percent as f64 / 100.0,
        None if interactive => prompt::target_reduction()?,
        None => DEFAULT_TARGET_REDUCTION,
    };

    if interactive {
        info!("\nCompression Settings:");
        info!("  Input file: {:?}", input);
        info!("  Output file: {:?}", output);
        info!("  Target reduction: {:.1}%", target * 100.0);
        if !prompt::confirm("Proceed with compression?", true)? {
            info!("Compression cancelled.");
            return Ok(());
        }
    }

    video::compress_video(&input, &output, target)?;
    Ok(())
}
