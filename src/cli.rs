use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-forge",
    about = "Batch image resizing, re-encoding and animated GIF assembly",
    long_about = "img-forge batch-processes image collections: it resizes while preserving \
                  aspect ratio, re-encodes to a target format with quality settings, and \
                  assembles animated GIFs from a set of still images with background-color \
                  padding to a common canvas size.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-forge compress ./photos -w 800 -q 85\n  \
    img-forge compress ./photos --format webp --no-timestamp\n  \
    img-forge compress -i a.jpg -i b.jpg --overwrite\n  \
    img-forge gif -i frame1.png -i frame2.png --duration 120 --bg 255,255,255\n  \
    img-forge list ./photos"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Suppress informational output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress and resize every image in a folder or file list",
        long_about = "Process each image in the working set: decode, downsize to the base \
                      width when wider, re-encode with the chosen quality and format, and \
                      write the result under a derived name (or in place with --overwrite)."
    )]
    Compress {
        #[arg(help = "Working folder to scan for images (omit when using --input)")]
        folder: Option<PathBuf>,

        #[arg(
            short = 'i',
            long = "input",
            help = "Explicit image file (repeatable); outputs land beside each source"
        )]
        inputs: Vec<PathBuf>,

        #[arg(short = 'q', long, help = "Compression quality (0-100, default: 80)")]
        quality: Option<u8>,

        #[arg(
            short = 'w',
            long = "width",
            default_value_t = 0,
            help = "Base width in pixels; wider images are downsized, 0 disables resizing"
        )]
        base_width: u32,

        #[arg(
            short = 'f',
            long,
            help = "Output format (default, webp, png, jpeg, gif, ico, tiff, bmp)"
        )]
        format: Option<String>,

        #[arg(long, help = "Replace each source file in place")]
        overwrite: bool,

        #[arg(
            short = 'p',
            long,
            help = "Filename suffix inserted before the extension (default: -export)"
        )]
        prefix: Option<String>,

        #[arg(long, help = "Skip the wall-clock suffix on output names")]
        no_timestamp: bool,
    },

    #[command(
        about = "Assemble the selected images into one animated GIF",
        long_about = "Compose the selected images into a single animated GIF. The canvas \
                      follows the largest source image (optionally capped by --width); every \
                      frame is centered on a solid background of the canvas size."
    )]
    Gif {
        #[arg(
            short = 'i',
            long = "input",
            required = true,
            help = "Frame image file, in playback order (repeatable)"
        )]
        inputs: Vec<PathBuf>,

        #[arg(
            short = 'w',
            long = "width",
            default_value_t = 0,
            help = "Canvas base width in pixels; 0 keeps the largest source's width"
        )]
        base_width: u32,

        #[arg(
            short = 'd',
            long,
            default_value_t = 100,
            help = "Per-frame duration in milliseconds"
        )]
        duration: u32,

        #[arg(
            short = 'l',
            long = "loop",
            default_value_t = 0,
            help = "Repeat count; 0 loops forever"
        )]
        loop_count: u16,

        #[arg(
            long,
            default_value = "0,0,0",
            help = "Background color as R,G,B (each 0-255)"
        )]
        bg: String,
    },

    #[command(about = "List the images a folder scan would pick up")]
    List {
        #[arg(help = "Folder to scan")]
        folder: PathBuf,
    },
}
