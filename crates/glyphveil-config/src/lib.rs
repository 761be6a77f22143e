//! Configuration for the glyphveil landing page.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/glyphveil/` on Linux). `GLYPHVEIL_CONFIG` points at a
//! different file. A missing file yields the defaults; the file is never
//! written.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use glyphveil_core::{AnimationSpeed, Brand, RAIN_GLYPHS, Theme};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "GLYPHVEIL_CONFIG";

/// Largest accepted `cell_size`.
pub const MAX_CELL_SIZE: u32 = 1024;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which product branding to show.
    pub brand: Brand,
    /// Theme at startup.
    pub theme: Theme,
    /// Glyph rain speed.
    pub speed: AnimationSpeed,
    /// Logical units per terminal cell.
    pub cell_size: u32,
    /// Alpha of the per-frame fade overlay.
    pub fade_alpha: f32,
    /// Per-tick probability of a glyph changing.
    pub glyph_change_chance: f64,
    /// Alphabet of the falling glyphs.
    pub glyphs: String,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// Write logs to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brand: Brand::Gie,
            theme: Theme::Dark,
            speed: AnimationSpeed::Medium,
            cell_size: 14,
            fade_alpha: 0.02,
            glyph_change_chance: 0.01,
            glyphs: RAIN_GLYPHS.to_string(),
            frame_interval_ms: 33,
            log_file: None,
        }
    }
}

impl Config {
    /// Default config file location, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glyphveil").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolve the config path from the environment or the platform default.
    pub fn resolve_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path)
    }

    /// Load from the resolved path, falling back to defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::resolve_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: format!("{} is outside [1, {MAX_CELL_SIZE}]", self.cell_size),
            });
        }
        if !(self.fade_alpha > 0.0 && self.fade_alpha <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "fade_alpha",
                reason: format!("{} is outside (0, 1]", self.fade_alpha),
            });
        }
        if !(0.0..=1.0).contains(&self.glyph_change_chance) {
            return Err(ConfigError::Invalid {
                field: "glyph_change_chance",
                reason: format!("{} is outside [0, 1]", self.glyph_change_chance),
            });
        }
        if self.glyphs.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "glyphs",
                reason: "must contain at least one glyph".to_string(),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
