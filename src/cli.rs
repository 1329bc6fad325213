// mediafile/src/cli.rs
use crate::core::{ResizeAlgorithm, DEFAULT_LONG_SIDE};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mediafile", version, about = "Inspect and resize image and movie files")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show file, dimension and capture date details
    Info {
        /// Image or movie file
        input: PathBuf,
    },

    /// Write a copy whose long side is at most the given size
    Resize {
        /// Image file
        input: PathBuf,

        /// Existing directory to write into
        output_dir: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_LONG_SIDE)]
        long_side: u32,

        /// JPEG quality (1-100)
        #[arg(short, long, default_value_t = 85)]
        quality: u8,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resize_with_defaults() {
        let cli = Cli::try_parse_from(["mediafile", "resize", "in.jpg", "out"]).unwrap();
        match cli.command {
            Commands::Resize {
                long_side,
                quality,
                algorithm,
                ..
            } => {
                assert_eq!(long_side, 1000);
                assert_eq!(quality, 85);
                assert_eq!(ResizeAlgorithm::from(algorithm), ResizeAlgorithm::Lanczos3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["mediafile", "info", "a.jpg", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
