//! Metadata stripping for a single image.
//!
//! [`transform`] decodes an image, bakes its EXIF orientation into the pixels,
//! copies the pixels into a fresh buffer and encodes that buffer to a new
//! file. Nothing from the source container (EXIF, GPS, XMP, ICC) is carried
//! over.

mod format;
mod pixels;

pub use format::{EncodeProfile, ModeConstraint, OutputFormat};
pub use pixels::{PixelMode, apply_orientation, rebuild};

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_QUALITY};
use crate::error::{Result, StripError};

/// One image to clean.
///
/// # Example
///
/// ```rust,no_run
/// use exif_strip::config::Config;
/// use exif_strip::strip::{transform, ProcessingRequest};
///
/// let request = ProcessingRequest::new("holiday.jpg").with_quality(90);
/// let cleaned = transform(&request, &Config::default()).unwrap();
/// assert!(cleaned.output.ends_with("holiday_clean.jpg"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingRequest {
    pub input: PathBuf,
    /// Destination; `None` writes `<stem><suffix>.<ext>` next to the input.
    pub output: Option<PathBuf>,
    /// Quality for lossy output (1-100). Ignored by lossless formats.
    pub quality: u8,
}

impl ProcessingRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            quality: DEFAULT_QUALITY,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }
}

/// A successfully cleaned image.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Channel layout as written, after the format's mode constraint.
    pub mode: PixelMode,
    pub width: u32,
    pub height: u32,
}

/// Clean one image, writing the result to the requested (or derived) output path.
///
/// Decode, encode and I/O failures come back as [`StripError`]; nothing
/// panics and nothing is retried.
pub fn transform(request: &ProcessingRequest, config: &Config) -> Result<Cleaned> {
    let input = request.input.as_path();
    let (img, source_format) = decode(input)?;

    let output = match &request.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| StripError::io(parent, e))?;
            }
            path.clone()
        }
        None => default_output_path(input, &config.suffix),
    };

    let format = target_format(source_format, &output)?;
    let img = format.profile().mode.conform(rebuild(&img));
    let mode = PixelMode::of(&img);
    let (width, height) = (img.width(), img.height());
    write_image(img, format, &output, request.quality)?;

    Ok(Cleaned {
        input: request.input.clone(),
        output,
        format,
        mode,
        width,
        height,
    })
}

/// Run [`transform`] and print a status line. Returns `true` on success.
pub fn strip_file(request: &ProcessingRequest, config: &Config) -> bool {
    match transform(request, config) {
        Ok(cleaned) => {
            println!(
                "✔ Cleaned: {} -> {}",
                cleaned.input.display(),
                cleaned.output.display()
            );
            true
        }
        Err(e) => {
            eprintln!("✘ Error processing {}: {e}", request.input.display());
            false
        }
    }
}

/// `photos/IMG_1.jpg` + `_clean` → `photos/IMG_1_clean.jpg`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// The decoded source format wins; the output extension is only consulted
/// when the source format is not one we can write.
fn target_format(source: Option<ImageFormat>, output: &Path) -> Result<OutputFormat> {
    let by_extension = OutputFormat::from_path(output);
    let format = source
        .and_then(OutputFormat::from_image_format)
        .or(by_extension)
        .ok_or_else(|| StripError::UnsupportedFormat(output.to_path_buf()))?;

    if by_extension.is_some_and(|ext| ext != format) {
        log::warn!(
            "{} will contain {format:?} data despite its extension",
            output.display()
        );
    }
    Ok(format)
}

/// Decode `path` and return upright pixels plus the detected container format.
fn decode(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>)> {
    let reader = ImageReader::open(path)
        .map_err(|e| StripError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| StripError::io(path, e))?;
    let source_format = reader.format();

    let mut decoder = reader
        .into_decoder()
        .map_err(|e| StripError::decode(path, e))?;
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        log::debug!("Unreadable orientation in {}: {e}", path.display());
        Orientation::NoTransforms
    });
    let img = DynamicImage::from_decoder(decoder).map_err(|e| StripError::decode(path, e))?;
    log::debug!(
        "Decoded {} ({source_format:?}, {:?}, {}x{})",
        path.display(),
        img.color(),
        img.width(),
        img.height()
    );

    Ok((apply_orientation(img, orientation), source_format))
}

fn write_image(img: DynamicImage, format: OutputFormat, output: &Path, quality: u8) -> Result<()> {
    let file = File::create(output).map_err(|e| StripError::io(output, e))?;
    let mut writer = BufWriter::new(file);

    let written = format
        .encode(img, &mut writer, quality)
        .map_err(|e| StripError::encode(output, e))
        .and_then(|()| writer.flush().map_err(|e| StripError::io(output, e)));

    if written.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(output) {
            log::debug!("Could not remove partial output {}: {e}", output.display());
        }
    }
    written
}
