use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const APP_NAME: &str = "Art Space";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_ENV_VAR: &str = "ART_SPACE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "art_space.toml";

pub const DEFAULT_WINDOW_WIDTH: f32 = 480.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 320.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

const MIN_SWIPE_THRESHOLD: f32 = 0.05;
const MAX_SWIPE_THRESHOLD: f32 = 1.0;
const MIN_IMAGE_SIZE: f32 = 32.0;

/// Runtime settings, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Directory searched for artwork images.
    pub assets_dir: PathBuf,
    /// Edge of the square the artwork is fitted into, in logical points.
    pub image_size: f32,
    pub transition_ms: u32,
    /// Fraction of the page width a drag must cover to turn the page.
    pub swipe_threshold: f32,
    pub cache_size: usize,
    /// Neighbours preloaded on each side of the current page.
    pub preload_range: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            assets_dir: PathBuf::from("assets/artworks"),
            image_size: 300.0,
            transition_ms: 300,
            swipe_threshold: 0.25,
            cache_size: 4,
            preload_range: 1,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        Ok(config.sanitized())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads the file named by `ART_SPACE_CONFIG`, or `art_space.toml` in the
    /// working directory. Falls back to defaults when there is no file or it
    /// cannot be parsed.
    pub fn load_or_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from_or_default(&path)
    }

    fn load_from_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.swipe_threshold = if self.swipe_threshold.is_finite() {
            self.swipe_threshold
                .clamp(MIN_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD)
        } else {
            Self::default().swipe_threshold
        };
        self.image_size = self.image_size.max(MIN_IMAGE_SIZE);
        self.window_width = self.window_width.max(MIN_WINDOW_WIDTH);
        self.window_height = self.window_height.max(MIN_WINDOW_HEIGHT);
        // The whole preload window has to fit, or it evicts itself.
        self.cache_size = self
            .cache_size
            .max(self.preload_range.saturating_mul(2).saturating_add(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            transition_ms = 120
            assets_dir = "/opt/art"
            "#,
        )
        .unwrap();
        assert_eq!(config.transition_ms, 120);
        assert_eq!(config.assets_dir, PathBuf::from("/opt/art"));
        assert_eq!(config.cache_size, 4);
        assert_eq!(config.image_size, 300.0);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let config = AppConfig::from_toml_str(
            r#"
            swipe_threshold = 3.0
            cache_size = 0
            image_size = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.swipe_threshold, 1.0);
        assert_eq!(config.cache_size, 3);
        assert_eq!(config.image_size, MIN_IMAGE_SIZE);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("transition_ms = \"slow\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("art_space.toml");
        assert_eq!(AppConfig::load_from_or_default(&path), AppConfig::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cache_size = [").unwrap();
        assert_eq!(AppConfig::load_from_or_default(file.path()), AppConfig::default());
    }

    #[test]
    fn valid_file_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "preload_range = 2").unwrap();
        let config = AppConfig::load_from_or_default(file.path());
        assert_eq!(config.preload_range, 2);
        assert_eq!(config.cache_size, 5);
    }
}
