/// Validated-input retry loops for the interactive front-ends.
///
/// Every prompt has a CLI-argument escape hatch; these run only when the
/// corresponding argument was omitted. Entering `q` at a path prompt
/// quits the tool.

use crate::error::Result;
use crate::pdf::PdfPreset;
use crate::utils::default_output_path;
use crate::warn;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::{Path, PathBuf};

/// Percentage string -> reduction fraction, accepting 1-99.
pub fn parse_reduction_percent(raw: &str) -> Option<f64> {
    let percent: f64 = raw.trim().parse().ok()?;
    if (1.0..=99.0).contains(&percent) {
        Some(percent / 100.0)
    } else {
        None
    }
}

pub fn confirm(message: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()?)
}

/// Ask for an input file until the answer exists and passes the format
/// check. Returns `None` when the user quits with `q`.
pub fn input_path(prompt_text: &str, accepts: fn(&Path) -> bool) -> Result<Option<PathBuf>> {
    loop {
        let raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt_text)
            .interact_text()?;
        let raw = raw.trim();

        if raw.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let path = PathBuf::from(raw);
        if !path.exists() {
            warn!("File not found. Please try again or enter 'q' to quit.");
            continue;
        }
        if !accepts(&path) {
            warn!("File does not appear to be a supported format.");
            continue;
        }
        return Ok(Some(path));
    }
}

/// Offer `<stem>_compressed.<ext>` as the output path, or take a custom
/// one.
pub fn output_path(input: &Path) -> Result<PathBuf> {
    let default = default_output_path(input);

    let use_default = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Use default output file {:?}?", default))
        .default(true)
        .interact()?;

    if use_default {
        return Ok(default);
    }

    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the output file path")
        .interact_text()?;
    Ok(PathBuf::from(raw.trim()))
}

/// Ask for the target reduction percentage (1-99, default 80).
pub fn target_reduction() -> Result<f64> {
    loop {
        let raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Target reduction percentage (1-99)")
            .default("80".to_string())
            .interact_text()?;

        match parse_reduction_percent(&raw) {
            Some(fraction) => return Ok(fraction),
            None => warn!("Please enter a number between 1 and 99."),
        }
    }
}

/// Pick a Ghostscript preset, default Ebook.
pub fn pdf_preset(default_level: u8) -> Result<PdfPreset> {
    let items: Vec<&str> = (0..=4)
        .map(|level| {
            PdfPreset::from_level(level)
                .expect("levels 0-4 are always valid")
                .describe()
        })
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select compression level")
        .items(&items)
        .default(default_level as usize)
        .interact()?;

    PdfPreset::from_level(selection as u8)
}
