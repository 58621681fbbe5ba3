//! # exif-strip
//!
//! Remove EXIF, GPS and other embedded metadata from images by decoding them
//! and writing the bare pixels into a brand-new file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_strip::config::Config;
//! use exif_strip::strip::{transform, ProcessingRequest};
//!
//! let config = Config::default();
//!
//! // photo.jpg -> photo_clean.jpg, EXIF orientation baked into the pixels
//! let request = ProcessingRequest::new("photo.jpg").with_quality(90);
//! match transform(&request, &config) {
//!     Ok(cleaned) => println!("Wrote {}", cleaned.output.display()),
//!     Err(e) => eprintln!("Failed ({:?}): {e}", e.kind()),
//! }
//! ```
//!
//! Whole directories go through [`pipeline::process_directory`], which mirrors
//! the tree under `<dir>/cleaned` and keeps going past broken files:
//!
//! ```rust,no_run
//! use exif_strip::config::Config;
//! use exif_strip::pipeline::process_directory;
//! use std::path::Path;
//!
//! let result = process_directory(Path::new("./photos"), None, 95, &Config::default())?;
//! println!("{} cleaned, {} failed", result.processed, result.failed);
//! # Ok::<(), exif_strip::error::StripError>(())
//! ```
//!
//! ## Supported Formats
//!
//! | Format | Output |
//! |--------|--------|
//! | JPEG (`.jpg`, `.jpeg`) | 8-bit RGB, alpha dropped, `quality` applies, optimized Huffman tables |
//! | PNG (`.png`) | Mode preserved, best compression |
//! | TIFF (`.tif`, `.tiff`) | Mode preserved |
//! | BMP (`.bmp`) | 8-bit |
//! | WebP (`.webp`) | 8-bit, lossless |
//!
//! ## Modules
//!
//! - [`config`] — Defaults and JSON config loading
//! - [`error`] — Error type and classification
//! - [`exif`] — Metadata inspection
//! - [`pipeline`] — Directory walking and batch processing
//! - [`strip`] — Single-image metadata removal

pub mod config;
pub mod error;
pub mod exif;
pub mod pipeline;
pub mod strip;
