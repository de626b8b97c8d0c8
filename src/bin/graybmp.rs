//! Convert a 24-bit BMP file to an 8-bit grayscale BMP file.
//!
//! ```bash
//! # parrots.bmp -> parrots8bit.bmp
//! graybmp
//!
//! # explicit paths, printing both headers
//! graybmp --info photo.bmp photo-gray.bmp
//! ```
//!
//! Exits with status 1 on any error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use graybmp::{Limits, LoadRequest, Validation};
use log::info;

#[derive(Parser)]
#[command(name = "graybmp")]
#[command(version)]
#[command(about = "Convert a 24-bit BMP image to 8-bit grayscale", long_about = None)]
struct Cli {
    /// Input 24-bit BMP file
    #[arg(value_name = "INPUT_BMP", default_value = "parrots.bmp")]
    input: PathBuf,

    /// Output 8-bit BMP file
    #[arg(value_name = "OUTPUT_BMP", default_value = "parrots8bit.bmp")]
    output: PathBuf,

    /// Print every header field of the input and output images
    #[arg(short, long)]
    info: bool,

    /// How strictly the input headers are checked
    #[arg(long, value_enum, default_value_t = ValidationArg::Standard)]
    validation: ValidationArg,

    /// Refuse inputs with more than this many pixels
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValidationArg {
    Strict,
    Standard,
    Permissive,
}

impl From<ValidationArg> for Validation {
    fn from(arg: ValidationArg) -> Self {
        match arg {
            ValidationArg::Strict => Validation::Strict,
            ValidationArg::Standard => Validation::Standard,
            ValidationArg::Permissive => Validation::Permissive,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    let limits = Limits {
        max_pixels: cli.max_pixels,
        ..Default::default()
    };
    let image = LoadRequest::new()
        .with_validation(cli.validation.into())
        .with_limits(&limits)
        .load(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    if cli.info {
        println!("-------- {}", cli.input.display());
        println!("{}", image.header_dump());
    }

    let gray = image
        .to_grayscale()
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;
    drop(image);

    if cli.info {
        println!("-------- {}", cli.output.display());
        println!("{}", gray.header_dump());
    }

    gray.save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    info!(
        "Converted {} -> {} ({}x{})",
        cli.input.display(),
        cli.output.display(),
        gray.width(),
        gray.height()
    );
    Ok(())
}
