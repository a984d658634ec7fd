use anyhow::{bail, Context};
use clap::Parser;
use img_forge::cli::{Args, Commands};
use img_forge::{error, info};
use img_forge::{BarSink, BatchCompressor, BatchConfig, GifBuilder, GifOptions, OutputFormat};
use std::path::PathBuf;
use std::str::FromStr;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    img_forge::logger::set_quiet_mode(args.quiet);

    match args.command {
        Commands::Compress {
            folder,
            inputs,
            quality,
            base_width,
            format,
            overwrite,
            prefix,
            no_timestamp,
        } => {
            let format = match format {
                Some(name) => OutputFormat::from_str(&name)?,
                None => OutputFormat::Default,
            };
            let config =
                BatchConfig::new(quality, base_width, format, overwrite, prefix, !no_timestamp)?;
            run_compress(config, folder, inputs)
        }
        Commands::Gif {
            inputs,
            base_width,
            duration,
            loop_count,
            bg,
        } => {
            let config = BatchConfig::new(None, base_width, OutputFormat::Gif, false, None, false)?;
            let options = GifOptions {
                duration_ms: duration,
                loop_count,
                bg_color: parse_bg(&bg)?,
            };
            run_gif(config, inputs, options)
        }
        Commands::List { folder } => {
            for path in img_forge::parse_images(&folder)? {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn run_compress(
    config: BatchConfig,
    folder: Option<PathBuf>,
    inputs: Vec<PathBuf>,
) -> anyhow::Result<()> {
    if folder.is_none() && inputs.is_empty() {
        bail!("supply a working folder or at least one --input file");
    }

    let files = (!inputs.is_empty()).then_some(inputs.as_slice());
    let compressor = BatchCompressor::new(config, folder);

    let mut sink = BarSink::new();
    let outcome = compressor.compress(files, &mut sink)?;
    sink.finish("done");

    info!("✅ Processed {} image(s)", outcome.outputs.len());
    for (source, err) in &outcome.failures {
        error!("Failed to process {:?}: {}", source, err);
    }
    if !outcome.is_clean() {
        bail!("{} image(s) failed", outcome.failures.len());
    }
    Ok(())
}

fn run_gif(config: BatchConfig, inputs: Vec<PathBuf>, options: GifOptions) -> anyhow::Result<()> {
    let builder = GifBuilder::new(config, None);

    let mut sink = BarSink::new();
    let dest = builder.build(Some(&inputs), &options, &mut sink)?;
    sink.finish("done");

    match dest {
        Some(path) => info!("✅ GIF written to {}", path.display()),
        None => info!("⚠️  No frames selected, nothing written"),
    }
    Ok(())
}

/// Parse "R,G,B" into a color triple, clamping each channel to 0-255.
fn parse_bg(value: &str) -> anyhow::Result<[u8; 3]> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 3 {
        bail!("background color must be R,G,B (got {:?})", value);
    }
    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let channel: i64 = part
            .trim()
            .parse()
            .with_context(|| format!("invalid color channel {:?}", part))?;
        *slot = channel.clamp(0, 255) as u8;
    }
    Ok(channels)
}
