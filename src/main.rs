use anyhow::{bail, Context};
use clap::Parser;
use log::LevelFilter;
use mediafile::{format_file_size, Cli, Commands, MediaFile, ResizeOptions};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Info { input } => process_info(&input)?,
        Commands::Resize {
            input,
            output_dir,
            long_side,
            quality,
            algorithm,
        } => {
            let options = ResizeOptions {
                long_side,
                quality,
                algorithm: algorithm.into(),
            };
            process_resize(&input, output_dir, &options)?;
        }
    }

    Ok(())
}

fn open_media(input: &Path) -> anyhow::Result<MediaFile> {
    let media = MediaFile::new(input);
    if media.is_invalid() {
        bail!(
            "Not an existing image or movie file: {}",
            input.display()
        );
    }
    Ok(media)
}

fn process_info(input: &Path) -> anyhow::Result<()> {
    let mut media = open_media(input)?;
    let size = std::fs::metadata(input)
        .with_context(|| format!("Failed to stat {}", input.display()))?
        .len();

    let kind = if media.is_image() { "image" } else { "movie" };
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!("=== Media Information ===");
    println!("Path: {}", input.display());
    println!("Name: {}", show(media.name().map(str::to_string)));
    println!("Extension: {}", show(media.extension().map(str::to_string)));
    println!("Kind: {}", kind);
    println!("Size: {}", format_file_size(size));
    println!("Modified: {}", show(media.modification_date_iso()));
    println!(
        "Dimensions: {}",
        show(media.dimensions().map(|(w, h)| format!("{} x {} pixels", w, h)))
    );
    println!(
        "Captured: {}",
        show(media.capture_date().map(|d| d.to_string()))
    );

    Ok(())
}

fn process_resize(
    input: &Path,
    output_dir: PathBuf,
    options: &ResizeOptions,
) -> anyhow::Result<()> {
    let mut media = open_media(input)?;
    let mut resized = media
        .try_resize(&output_dir, options)
        .with_context(|| format!("Failed to resize {}", input.display()))?;

    let path = resized
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    match resized.dimensions() {
        Some((w, h)) => println!("Resized image saved to: {} ({} x {})", path, w, h),
        None => println!("Resized image saved to: {}", path),
    }

    Ok(())
}
