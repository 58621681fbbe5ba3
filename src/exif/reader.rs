use image::{ImageDecoder, ImageFormat, ImageReader};
use nom_exif::{ExifIter, MediaParser, MediaSource};
use std::path::Path;

use super::tags::{TIFF_STRUCTURAL_TAGS, TagNames, display_name};
use crate::error::{Result, StripError};

/// Values longer than this are shortened when printed.
const MAX_VALUE_WIDTH: usize = 64;

/// One EXIF entry as found in an image.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    /// IFD the entry was read from (0 = primary image).
    pub ifd: usize,
    pub tag: u16,
    pub value: String,
}

/// Read the EXIF entries embedded in `path`.
///
/// The file must decode as an image; a file with no EXIF block yields an
/// empty list, while an EXIF block that can't be parsed is an error. For
/// TIFF files the baseline layout tags every TIFF carries (dimensions,
/// strip offsets, ...) are left out.
pub fn read_metadata(path: &Path) -> Result<Vec<MetadataEntry>> {
    let (format, has_exif_block) = probe(path)?;

    if format == Some(ImageFormat::Tiff) {
        // The container itself is an IFD tree, so there's always something to parse.
        let mut entries = parse_entries(path).unwrap_or_else(|e| {
            log::debug!("{e}");
            Vec::new()
        });
        entries.retain(|entry| !TIFF_STRUCTURAL_TAGS.contains(&entry.tag));
        log::debug!("{} EXIF entries in {}", entries.len(), path.display());
        return Ok(entries);
    }

    if !has_exif_block {
        log::debug!("No EXIF block in {}", path.display());
        return Ok(Vec::new());
    }

    let entries = parse_entries(path)?;
    log::debug!("{} EXIF entries in {}", entries.len(), path.display());
    Ok(entries)
}

/// Open `path` as an image and report its container format and whether the
/// decoder found an EXIF block in it.
fn probe(path: &Path) -> Result<(Option<ImageFormat>, bool)> {
    let reader = ImageReader::open(path)
        .map_err(|e| StripError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| StripError::io(path, e))?;
    let format = reader.format();
    let mut decoder = reader
        .into_decoder()
        .map_err(|e| StripError::decode(path, e))?;
    let has_exif_block = decoder
        .exif_metadata()
        .map_err(|e| StripError::decode(path, e))?
        .is_some_and(|blob| !blob.is_empty());
    Ok((format, has_exif_block))
}

fn parse_entries(path: &Path) -> Result<Vec<MetadataEntry>> {
    let ms = MediaSource::file_path(path).map_err(|e| StripError::metadata(path, e))?;
    let mut parser = MediaParser::new();
    let iter: ExifIter = parser
        .parse(ms)
        .map_err(|e| StripError::metadata(path, e))?;

    Ok(iter
        .filter_map(|entry| {
            let value = entry.get_value()?.to_string();
            Some(MetadataEntry {
                ifd: entry.ifd_index(),
                tag: entry.tag_code(),
                value: value.trim().trim_matches('"').to_string(),
            })
        })
        .collect())
}

/// Print every EXIF tag of `path` as `Name: value`.
///
/// Never fails: unreadable files are reported and the call returns normally.
///
/// # Example
///
/// ```rust,no_run
/// use exif_strip::exif::{ExifTagTable, show_metadata};
/// use std::path::Path;
///
/// show_metadata(Path::new("IMG_0042.jpg"), &ExifTagTable);
/// ```
pub fn show_metadata(path: &Path, names: &dyn TagNames) {
    let entries = match read_metadata(path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("✘ Error reading metadata: {e}");
            return;
        }
    };

    if entries.is_empty() {
        println!("✨ No metadata found in: {}", path.display());
        return;
    }

    println!();
    println!("Metadata for: {}", path.display());
    println!("{}", "-".repeat(50));
    for entry in &entries {
        println!(
            "{}: {}",
            display_name(names, entry.tag),
            shorten(&entry.value, MAX_VALUE_WIDTH)
        );
    }
}

fn shorten(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push('…');
    out
}
