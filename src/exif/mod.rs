//! EXIF inspection.
//!
//! - [`read_metadata`] — List the EXIF entries embedded in an image
//! - [`show_metadata`] — Print them as `Name: value`, or say there are none
//!
//! Tag names come from a [`TagNames`] lookup; [`ExifTagTable`] covers the
//! standard TIFF, EXIF and GPS tags and unknown ids print as hex.

mod reader;
mod tags;

pub use reader::{MetadataEntry, read_metadata, show_metadata};
pub use tags::{ExifTagTable, TagNames, display_name};
