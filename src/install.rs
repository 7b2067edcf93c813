/// Dependency provisioning for the external compression engines.
///
/// Detects the operating system, checks whether Ghostscript and FFmpeg
/// are reachable on PATH, and drives the native package manager to
/// install whatever is missing. Platforms without a scriptable package
/// manager get printed instructions instead of a failed install.

use crate::error::{CompressionError, Result};
use crate::prompt;
use crate::{info, warn};
use std::fs;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    MacOs,
    Debian,
    Fedora,
    Arch,
    LinuxOther,
    Windows,
    Unknown,
}

impl OsKind {
    pub fn label(&self) -> &'static str {
        match self {
            OsKind::MacOs => "macOS",
            OsKind::Debian => "Debian/Ubuntu",
            OsKind::Fedora => "Fedora/RHEL",
            OsKind::Arch => "Arch",
            OsKind::LinuxOther => "Linux (other)",
            OsKind::Windows => "Windows",
            OsKind::Unknown => "unknown",
        }
    }
}

/// One external binary this crate shells out to.
#[derive(Debug, Clone, Copy)]
pub struct ExternalTool {
    pub package: &'static str,
    pub binary: &'static str,
    pub purpose: &'static str,
}

pub const EXTERNAL_TOOLS: &[ExternalTool] = &[
    ExternalTool {
        package: "ghostscript",
        binary: "gs",
        purpose: "PDF compression",
    },
    ExternalTool {
        package: "ffmpeg",
        binary: "ffmpeg",
        purpose: "video compression",
    },
];

pub fn detect_os() -> OsKind {
    if cfg!(target_os = "macos") {
        OsKind::MacOs
    } else if cfg!(target_os = "windows") {
        OsKind::Windows
    } else if cfg!(target_os = "linux") {
        match fs::read_to_string("/etc/os-release") {
            Ok(contents) => classify_os_release(&contents),
            Err(_) => OsKind::LinuxOther,
        }
    } else {
        OsKind::Unknown
    }
}

/// Map `/etc/os-release` contents to a package-manager family.
pub fn classify_os_release(contents: &str) -> OsKind {
    let lower = contents.to_lowercase();
    if lower.contains("ubuntu") || lower.contains("debian") {
        OsKind::Debian
    } else if lower.contains("fedora") || lower.contains("centos") || lower.contains("rhel") {
        OsKind::Fedora
    } else if lower.contains("arch") || lower.contains("manjaro") {
        OsKind::Arch
    } else {
        OsKind::LinuxOther
    }
}

pub fn is_tool_installed(binary: &str) -> bool {
    which::which(binary).is_ok()
}

/// Package-manager command sequence for installing `package`, or `None`
/// when the platform needs manual installation.
pub fn install_commands(os: OsKind, package: &str) -> Option<Vec<Vec<String>>> {
    let cmd = |parts: &[&str]| parts.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    match os {
        OsKind::MacOs => Some(vec![cmd(&["brew", "install", package])]),
        OsKind::Debian => Some(vec![
            cmd(&["sudo", "apt-get", "update"]),
            cmd(&["sudo", "apt-get", "install", "-y", package]),
        ]),
        OsKind::Fedora => Some(vec![cmd(&["sudo", "dnf", "install", "-y", package])]),
        OsKind::Arch => Some(vec![cmd(&["sudo", "pacman", "-Sy", "--noconfirm", package])]),
        OsKind::LinuxOther | OsKind::Windows | OsKind::Unknown => None,
    }
}

/// Instructions for platforms the installer cannot drive itself.
pub fn manual_instructions(os: OsKind, tool: &ExternalTool) -> String {
    match (os, tool.package) {
        (OsKind::Windows, "ghostscript") => "Download Ghostscript from \
            https://www.ghostscript.com/download/gsdnld.html, run the installer, \
            and select 'Add Ghostscript to path' during installation."
            .to_string(),
        (OsKind::Windows, _) => format!(
            "Install {} with Chocolatey (`choco install {}`) or download it from \
             the project website and add its bin directory to PATH.",
            tool.package, tool.package
        ),
        _ => format!(
            "Install {} manually using your system's package manager.",
            tool.package
        ),
    }
}

fn run_command(parts: &[String]) -> Result<()> {
    info!("Running: {}", parts.join(" "));
    let (program, args) = parts.split_first().expect("install command is never empty");
    let output = Command::new(program).args(args).output()?;
    if !output.status.success() {
        return Err(CompressionError::ToolFailed {
            tool: program.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Install one tool for the detected platform. Platforms without a
/// scriptable package manager print instructions and are not treated as
/// failures.
pub fn provision_tool(os: OsKind, tool: &ExternalTool) -> Result<()> {
    if os == OsKind::MacOs && !is_tool_installed("brew") {
        warn!(
            "Homebrew is not installed. Install it from https://brew.sh and re-run setup."
        );
        return Ok(());
    }

    match install_commands(os, tool.package) {
        Some(commands) => {
            info!("📦 Installing {}...", tool.package);
            for command in &commands {
                run_command(command)?;
            }
            Ok(())
        }
        None => {
            info!("ℹ️  {}", manual_instructions(os, tool));
            Ok(())
        }
    }
}

/// Interactive setup flow: check, confirm, install, verify.
pub fn run_setup(assume_yes: bool) -> Result<()> {
    info!("Compression Utilities - Dependency Setup");
    info!("========================================");

    let os = detect_os();
    info!("🖥️  Detected OS: {}", os.label());

    if os == OsKind::Unknown {
        warn!("Unable to determine your operating system. Please install dependencies manually.");
        return Ok(());
    }

    let missing: Vec<&ExternalTool> = EXTERNAL_TOOLS
        .iter()
        .filter(|tool| {
            let installed = is_tool_installed(tool.binary);
            if installed {
                info!("✅ {} is already installed", tool.package);
            } else {
                info!("❌ {} is not installed (needed for {})", tool.package, tool.purpose);
            }
            !installed
        })
        .collect();

    if missing.is_empty() {
        info!("🎉 All external dependencies are already installed.");
        return Ok(());
    }

    if !assume_yes && !prompt::confirm("Proceed with installation?", true)? {
        info!("Installation cancelled.");
        return Ok(());
    }

    for tool in missing {
        provision_tool(os, tool)?;
    }

    info!("\nVerifying installations...");
    let mut all_ok = true;
    for tool in EXTERNAL_TOOLS {
        if is_tool_installed(tool.binary) {
            info!("✅ {}", tool.package);
        } else {
            all_ok = false;
            warn!("{} is still missing. {}", tool.package, manual_instructions(os, tool));
        }
    }

    if all_ok {
        info!("🎉 All dependencies are ready. You can now compress PDFs and videos.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_os_release() {
        assert_eq!(
            classify_os_release("NAME=\"Ubuntu\"\nID=ubuntu"),
            OsKind::Debian
        );
        assert_eq!(
            classify_os_release("NAME=\"Debian GNU/Linux\""),
            OsKind::Debian
        );
        assert_eq!(classify_os_release("NAME=\"Fedora Linux\""), OsKind::Fedora);
        assert_eq!(
            classify_os_release("NAME=\"CentOS Stream\""),
            OsKind::Fedora
        );
        assert_eq!(classify_os_release("ID=arch"), OsKind::Arch);
        assert_eq!(classify_os_release("ID=manjaro"), OsKind::Arch);
        assert_eq!(
            classify_os_release("NAME=\"openSUSE Tumbleweed\""),
            OsKind::LinuxOther
        );
    }

    #[test]
    fn test_install_commands_per_platform() {
        let debian = install_commands(OsKind::Debian, "ghostscript").unwrap();
        assert_eq!(debian.len(), 2);
        assert_eq!(debian[0], vec!["sudo", "apt-get", "update"]);
        assert_eq!(
            debian[1],
            vec!["sudo", "apt-get", "install", "-y", "ghostscript"]
        );

        let arch = install_commands(OsKind::Arch, "ffmpeg").unwrap();
        assert_eq!(arch[0], vec!["sudo", "pacman", "-Sy", "--noconfirm", "ffmpeg"]);

        let mac = install_commands(OsKind::MacOs, "ffmpeg").unwrap();
        assert_eq!(mac[0], vec!["brew", "install", "ffmpeg"]);

        assert!(install_commands(OsKind::Windows, "ffmpeg").is_none());
        assert!(install_commands(OsKind::Unknown, "ffmpeg").is_none());
    }

    #[test]
    fn test_manual_instructions_mention_tool() {
        let gs = &EXTERNAL_TOOLS[0];
        let ffmpeg = &EXTERNAL_TOOLS[1];
        assert!(manual_instructions(OsKind::Windows, gs).contains("Ghostscript"));
        assert!(manual_instructions(OsKind::Windows, ffmpeg).contains("ffmpeg"));
        assert!(manual_instructions(OsKind::LinuxOther, ffmpeg).contains("package manager"));
    }

    #[test]
    fn test_external_tools_cover_pdf_and_video() {
        let binaries: Vec<&str> = EXTERNAL_TOOLS.iter().map(|t| t.binary).collect();
        assert!(binaries.contains(&"gs"));
        assert!(binaries.contains(&"ffmpeg"));
    }
}
