use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, StripError};
use crate::strip::{ProcessingRequest, strip_file};

/// Outcome of a directory run. Counts only ever go up; a failed file never
/// undoes earlier successes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub processed: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

/// Collect files with a recognized image extension under `input_dir`.
///
/// The walk is recursive and sorted by file name, so results are stable
/// across runs. Anything under `skip` (typically the output directory) is
/// left out when `skip` lies below `input_dir`, as are entries the walker
/// can't read.
///
/// # Example
///
/// ```rust,no_run
/// use exif_strip::config::Config;
/// use exif_strip::pipeline::collect_images;
/// use std::path::Path;
///
/// let images = collect_images(Path::new("./photos"), None, &Config::default());
/// println!("Found {} images", images.len());
/// ```
pub fn collect_images(input_dir: &Path, skip: Option<&Path>, config: &Config) -> Vec<PathBuf> {
    let skip = skip.and_then(|p| fs::canonicalize(p).ok());

    WalkDir::new(input_dir)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let Some(skip) = &skip else { return true };
            // The root is never skipped, even when it is the output directory.
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && fs::canonicalize(entry.path()).is_ok_and(|p| &p == skip))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_supported_image(entry.path(), config))
        .map(|entry| entry.into_path())
        .collect()
}

/// Check if a file has a recognized image extension.
fn is_supported_image(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.is_recognized_extension(ext))
}

/// Where `file` (somewhere under `input_dir`) lands under `output_dir`.
pub fn mirrored_output(input_dir: &Path, file: &Path, output_dir: &Path) -> Option<PathBuf> {
    file.strip_prefix(input_dir)
        .ok()
        .map(|rel| output_dir.join(rel))
}

/// Clean every recognized image under `input_dir`, mirroring the tree
/// under `output_dir` (default: `<input_dir>/<config.output_dir_name>`).
///
/// Fails only when `input_dir` is missing or the output directory can't be
/// created; individual files that fail are reported, counted and skipped.
///
/// # Example
///
/// ```rust,no_run
/// use exif_strip::config::Config;
/// use exif_strip::pipeline::process_directory;
/// use std::path::Path;
///
/// let result = process_directory(Path::new("./photos"), None, 90, &Config::default()).unwrap();
/// assert_eq!(result.output_dir, Path::new("./photos/cleaned"));
/// ```
pub fn process_directory(
    input_dir: &Path,
    output_dir: Option<&Path>,
    quality: u8,
    config: &Config,
) -> Result<BatchResult> {
    if !input_dir.is_dir() {
        return Err(StripError::InputNotFound(input_dir.to_path_buf()));
    }

    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input_dir.join(&config.output_dir_name),
    };
    // Created up front so the walk can recognize and skip it.
    fs::create_dir_all(&output_dir).map_err(|e| StripError::io(&output_dir, e))?;

    let images = collect_images(input_dir, Some(&output_dir), config);
    log::info!("Found {} image(s) in {}", images.len(), input_dir.display());

    let mut result = BatchResult {
        processed: 0,
        failed: 0,
        output_dir,
    };

    let total = images.len();
    for (i, image_path) in images.iter().enumerate() {
        log::debug!("[{}/{}] {}", i + 1, total, image_path.display());

        let Some(target) = mirrored_output(input_dir, image_path, &result.output_dir) else {
            log::warn!("{} is outside {}", image_path.display(), input_dir.display());
            result.failed += 1;
            continue;
        };

        let request = ProcessingRequest::new(image_path)
            .with_output(target)
            .with_quality(quality);
        if strip_file(&request, config) {
            result.processed += 1;
        } else {
            result.failed += 1;
        }
    }

    println!();
    println!("Successfully processed {} images", result.processed);
    if result.failed > 0 {
        println!("Failed: {}", result.failed);
    }
    println!("Output directory: {}", result.output_dir.display());

    Ok(result)
}
