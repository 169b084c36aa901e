//! Configuration management for news-mosaic
//!
//! Handles loading, validation, profiles and environment overrides for the
//! grid, sentiment and sunburst settings.

use crate::color::Palette;
use crate::error::{MosaicError, Result};
use crate::grid::{GridPreset, GridStyle, MosaicGrid};
use crate::hierarchy::{GroupingMode, HierarchyBuilder};
use crate::radial::{RadialOptions, RadialPartition};
use crate::sentiment::SentimentThresholds;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "MOSAIC_";

/// Schema version written by this build
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub grid: GridConfig,
    #[serde(default)]
    pub sentiment: SentimentThresholds,
    pub sunburst: SunburstConfig,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Mosaic grid dimensions, seed and look
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub seed: u32,
    pub style: GridStyle,
}

impl GridConfig {
    pub fn from_preset(preset: GridPreset, seed: u32) -> Self {
        let (cols, rows) = preset.dimensions();
        Self {
            cols,
            rows,
            seed,
            style: preset.style(),
        }
    }
}

/// Sunburst viewport and layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunburstConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub grouping: GroupingMode,
    pub margin: f64,
    pub center_ratio: f64,
    pub pad_angle: f64,
}

impl SunburstConfig {
    pub fn options(&self) -> RadialOptions {
        RadialOptions {
            margin: self.margin,
            center_ratio: self.center_ratio,
            pad_angle: self.pad_angle,
        }
    }
}

/// Profile-specific configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_preset: Option<GridPreset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_cols: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<GroupingMode>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MosaicError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MosaicError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| MosaicError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load configuration with a specific profile applied
    pub fn load_with_profile(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_profile(profile)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Built-in defaults with env overrides and an optional profile applied, validated
    pub fn from_defaults(profile: Option<&str>) -> Result<Self> {
        Self::from_defaults_with_overrides(std::env::vars(), profile)
    }

    /// Same as [`Config::from_defaults`] with explicit `(name, value)` overrides
    pub fn from_defaults_with_overrides<I, K, V>(vars: I, profile: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        config.apply_overrides(vars);
        if let Some(profile) = profile {
            config.apply_profile(profile)?;
        }
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply a profile's overrides to the configuration
    pub fn apply_profile(&mut self, profile: &str) -> Result<()> {
        let overrides = self
            .profiles
            .get(profile)
            .cloned()
            .ok_or_else(|| MosaicError::Config(format!("Unknown profile: {}", profile)))?;

        if let Some(preset) = overrides.grid_preset {
            self.grid = GridConfig::from_preset(preset, self.grid.seed);
        }
        if let Some(cols) = overrides.grid_cols {
            self.grid.cols = cols;
        }
        if let Some(rows) = overrides.grid_rows {
            self.grid.rows = rows;
        }
        if let Some(seed) = overrides.grid_seed {
            self.grid.seed = seed;
        }
        if let Some(grouping) = overrides.grouping {
            self.sunburst.grouping = grouping;
        }

        tracing::debug!("Applied profile {}", profile);
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: MOSAIC_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::vars());
    }

    /// Apply `(name, value)` overrides; names without the prefix are ignored
    pub fn apply_overrides<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let key = key.as_ref();
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                if let Err(e) = self.set_value_from_env(config_key, value.as_ref()) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "GRID__COLS" => self.grid.cols = parse_env(path, value)?,
            "GRID__ROWS" => self.grid.rows = parse_env(path, value)?,
            "GRID__SEED" => self.grid.seed = parse_env(path, value)?,
            "SENTIMENT__POSITIVE" => self.sentiment.positive = parse_env(path, value)?,
            "SENTIMENT__CRITICAL" => self.sentiment.critical = parse_env(path, value)?,
            "SUNBURST__WIDTH" => self.sunburst.width = parse_env(path, value)?,
            "SUNBURST__HEIGHT" => self.sunburst.height = parse_env(path, value)?,
            "SUNBURST__GROUPING" => {
                self.sunburst.grouping =
                    value
                        .parse()
                        .map_err(|message| MosaicError::InvalidConfigValue {
                            path: path.to_string(),
                            message,
                        })?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Grid tiler with the configured style
    pub fn mosaic_grid(&self) -> MosaicGrid {
        MosaicGrid::new(self.grid.style.clone())
    }

    /// Hierarchy builder with the configured grouping and thresholds
    pub fn hierarchy_builder(&self) -> HierarchyBuilder {
        HierarchyBuilder::new(self.sunburst.grouping).with_thresholds(self.sentiment)
    }

    /// Sunburst engine with the configured options and palette
    pub fn radial_partition(&self) -> RadialPartition {
        RadialPartition::new(self.sunburst.options(), self.palette.clone())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MosaicError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("news-mosaic").join("config.toml"))
    }
}

fn parse_env<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MosaicError::InvalidConfigValue {
            path: path.to_string(),
            message: format!("Cannot parse '{}'", value),
        })
}

impl Default for Config {
    fn default() -> Self {
        let options = RadialOptions::default();
        Self {
            meta: MetaConfig {
                schema_version: SCHEMA_VERSION.to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            grid: GridConfig {
                cols: 14,
                rows: 9,
                seed: crate::random::QUERY_SEED_BASE,
                style: GridStyle::default(),
            },
            sentiment: SentimentThresholds::default(),
            sunburst: SunburstConfig {
                width: 520.0,
                height: 520.0,
                grouping: GroupingMode::SentimentFirst,
                margin: options.margin,
                center_ratio: options.center_ratio,
                pad_angle: options.pad_angle,
            },
            palette: Palette::default(),
            profiles: default_profiles(),
        }
    }
}

fn default_profiles() -> HashMap<String, ProfileOverrides> {
    let mut profiles = HashMap::new();
    profiles.insert(
        "landing".to_string(),
        ProfileOverrides {
            grid_preset: Some(GridPreset::Landing),
            ..Default::default()
        },
    );
    profiles.insert(
        "loading".to_string(),
        ProfileOverrides {
            grid_preset: Some(GridPreset::Loading),
            ..Default::default()
        },
    );
    profiles.insert(
        "clusters".to_string(),
        ProfileOverrides {
            grouping: Some(GroupingMode::ClusterFirst),
            ..Default::default()
        },
    );
    profiles
}
