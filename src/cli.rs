use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "media-squeeze",
    about = "Interactive compression tools for images, PDFs and videos",
    long_about = "media-squeeze shrinks image, PDF and video files while trying to keep as much \
                  quality as possible. Images are compressed in-process with a quality search \
                  that homes in on a target size reduction; PDFs go through Ghostscript and \
                  videos through a two-pass FFmpeg encode. Arguments left out on the command \
                  line are asked for interactively.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    media-squeeze image photo.jpg photo_small.jpg -t 80\n  \
    media-squeeze image                      (fully interactive)\n  \
    media-squeeze pdf report.pdf -l 4\n  \
    media-squeeze video clip.mp4 clip_small.mp4 -t 70\n  \
    media-squeeze setup -y"
)]
pub struct Args {
    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Suppress all non-error output"
    )]
    pub quiet: bool,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Show per-trial progress of the quality search"
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress an image toward a target size reduction",
        long_about = "Compress a single image. JPEG sources (and opaque PNGs, which are \
                      converted to JPEG) are encoded repeatedly while a bounded binary search \
                      picks the highest quality that still meets the target reduction. \
                      Transparent PNGs are optimized losslessly with oxipng; other formats are \
                      re-encoded once in place."
    )]
    Image {
        #[arg(help = "Input image file (prompted for when omitted)")]
        input: Option<PathBuf>,

        #[arg(help = "Output image file (defaults to <name>_compressed)")]
        output: Option<PathBuf>,

        #[arg(
            short = 't',
            long,
            value_parser = clap::value_parser!(u8).range(1..=99),
            help = "Target size reduction in percent (1-99, default: 80)",
            long_help = "Target size reduction in percent. 80 means the output should be \
                         roughly 20% of the original size. The search degrades quality only \
                         as far as needed; unreachable targets are reported, not fatal."
        )]
        target: Option<u8>,
    },

    #[command(
        about = "Compress a PDF with Ghostscript",
        long_about = "Compress a PDF file by rewriting it through Ghostscript's pdfwrite \
                      device. The level maps to -dPDFSETTINGS: 0 default, 1 prepress, \
                      2 printer, 3 ebook, 4 screen."
    )]
    Pdf {
        #[arg(help = "Input PDF file (prompted for when omitted)")]
        input: Option<PathBuf>,

        #[arg(help = "Output PDF file (defaults to <name>_compressed.pdf)")]
        output: Option<PathBuf>,

        #[arg(
            short = 'l',
            long,
            value_parser = clap::value_parser!(u8).range(0..=4),
            help = "Compression level 0-4 (default: 3, ebook)"
        )]
        level: Option<u8>,
    },

    #[command(
        about = "Compress a video with a two-pass FFmpeg encode",
        long_about = "Compress a video file. The source bitrate is probed with ffprobe, a \
                      target bitrate is derived from the requested reduction (floored at \
                      500 kbps), and the file is re-encoded with two-pass libx264 plus AAC \
                      audio."
    )]
    Video {
        #[arg(help = "Input video file (prompted for when omitted)")]
        input: Option<PathBuf>,

        #[arg(help = "Output video file (defaults to <name>_compressed)")]
        output: Option<PathBuf>,

        #[arg(
            short = 't',
            long,
            value_parser = clap::value_parser!(u8).range(1..=99),
            help = "Target size reduction in percent (1-99, default: 80)"
        )]
        target: Option<u8>,
    },

    #[command(
        about = "Install the external tools (Ghostscript, FFmpeg)",
        long_about = "Detect the operating system, check whether Ghostscript and FFmpeg are \
                      on PATH, and install whatever is missing through the native package \
                      manager. Platforms without one get manual instructions."
    )]
    Setup {
        #[arg(short = 'y', long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
