use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use exif_strip::config::Config;
use exif_strip::error::StripError;
use exif_strip::exif::{self, ExifTagTable};
use exif_strip::pipeline;
use exif_strip::strip::{self, ProcessingRequest};

const EXAMPLES: &str = "\
Examples:
  exif-strip image.jpg                  # Clean single image -> image_clean.jpg
  exif-strip -d ./images                # Clean directory -> ./images/cleaned
  exif-strip -d ./images -o ./clean     # Clean directory to a specific output
  exif-strip --show image.jpg           # Show metadata";

#[derive(Parser, Debug)]
#[command(
    name = "exif-strip",
    version,
    about = "Remove metadata (EXIF, GPS, color profiles) from images",
    after_help = EXAMPLES
)]
struct Cli {
    /// Input image file or directory
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Process an entire directory
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Output file (single image) or output directory (directory mode)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// JPEG quality, 1-100 (default: 95, or the config file's value)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Show metadata for an image file and exit
    #[arg(long, value_name = "FILE")]
    show: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --show
    if let Some(ref path) = cli.show {
        exif::show_metadata(path, &ExifTagTable);
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(cli.config.as_deref())?;
    let quality = cli.quality.unwrap_or(config.quality);

    // Directory mode
    if let Some(ref dir) = cli.directory {
        return Ok(run_directory(dir, cli.output.as_deref(), quality, &config));
    }

    // Single file mode (or a directory given positionally)
    if let Some(ref input) = cli.input {
        if input.is_dir() {
            return Ok(run_directory(input, cli.output.as_deref(), quality, &config));
        }

        let mut request = ProcessingRequest::new(input).with_quality(quality);
        if let Some(ref output) = cli.output {
            request = request.with_output(output);
        }
        strip::strip_file(&request, &config);
        return Ok(ExitCode::SUCCESS);
    }

    // No arguments provided
    Cli::command().print_help()?;
    Ok(ExitCode::SUCCESS)
}

/// Only a missing input directory changes the exit status.
fn run_directory(dir: &Path, output: Option<&Path>, quality: u8, config: &Config) -> ExitCode {
    match pipeline::process_directory(dir, output, quality, config) {
        Ok(result) => {
            log::debug!(
                "Done: {} succeeded, {} failed",
                result.processed,
                result.failed
            );
            ExitCode::SUCCESS
        }
        Err(e @ StripError::InputNotFound(_)) => {
            eprintln!("✘ {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("✘ {e}");
            ExitCode::SUCCESS
        }
    }
}
