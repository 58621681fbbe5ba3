use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// Runtime configuration for exif-strip.
///
/// Every field has a default, so a config file only needs the keys it changes.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_strip::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("exif-strip.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.quality = 85;
/// config.suffix = "_nometa".into();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quality for lossy output formats (1-100).
    pub quality: u8,
    /// Inserted before the extension when no output path is given (`photo.jpg` → `photo_clean.jpg`).
    pub suffix: String,
    /// Name of the subdirectory created under the input directory in batch mode.
    pub output_dir_name: String,
    /// Recognized image extensions (lowercase, without the dot).
    pub extensions: Vec<String>,
    /// Follow symlinks while walking directories.
    pub follow_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            suffix: "_clean".to_string(),
            output_dir_name: "cleaned".to_string(),
            extensions: ["jpg", "jpeg", "png", "tiff", "tif", "bmp", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            follow_links: true,
        }
    }
}

impl Config {
    /// Load config from the given path, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(config_path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;
        log::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Reject values the transformer can't honor.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            anyhow::bail!("quality must be between 1 and 100, got {}", self.quality);
        }
        if self.output_dir_name.is_empty() {
            anyhow::bail!("output_dir_name must not be empty");
        }
        Ok(())
    }

    /// Whether `ext` (case-insensitive) is one of the recognized extensions.
    pub fn is_recognized_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
