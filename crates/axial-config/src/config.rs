//! Configuration structs with sensible defaults and RON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use axial_orientation::{
    BodyRecord, MigrationOptions, ModelConfig, OrientationEvaluator, Vector3,
};
use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};

const APP_NAME: &str = "axial";
const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Numeric tolerances for round-trip checks.
    pub tolerances: ToleranceConfig,
    /// Default asset orientation.
    pub model: ModelAxisConfig,
    /// Legacy migration policy and inputs.
    pub migration: MigrationConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g., "debug", "info,axial_orientation=trace").
    pub level: String,
}

/// Tolerances, in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Accepted obliquity drift when migrating a legacy record.
    pub round_trip_degrees: f64,
    /// Accepted obliquity drift when re-validating a migrated record.
    pub validation_degrees: f64,
}

/// Default model north axis for assets without their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelAxisConfig {
    /// North-pole direction in the asset's local space.
    pub north_axis: [f64; 3],
}

/// Legacy migration configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MigrationConfig {
    /// Obliquity above which a missing rotation sense is read as retrograde.
    pub retrograde_threshold_degrees: f64,
    /// RON file of body records to migrate.
    pub bodies_file: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            round_trip_degrees: 0.1,
            validation_degrees: 0.1,
        }
    }
}

impl Default for ModelAxisConfig {
    fn default() -> Self {
        Self {
            north_axis: [0.0, 1.0, 0.0],
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            retrograde_threshold_degrees: 90.0,
            bodies_file: None,
        }
    }
}

// --- Bridges into the orientation core ---

impl Config {
    /// Options for `LegacyMigrator`.
    pub fn migration_options(&self) -> MigrationOptions {
        MigrationOptions {
            round_trip_tolerance_degrees: self.tolerances.round_trip_degrees,
            retrograde_threshold_degrees: self.migration.retrograde_threshold_degrees,
        }
    }

    /// Model config built from the configured north axis.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::new(Vector3::from(self.model.north_axis))
    }

    /// Evaluator sharing the migration's retrograde threshold.
    pub fn evaluator(&self) -> OrientationEvaluator {
        OrientationEvaluator {
            retrograde_threshold_degrees: self.migration.retrograde_threshold_degrees,
            ..OrientationEvaluator::default()
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = error::read(&config_path)?;
            let config: Config = error::parse(&config_path, &contents)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(error::write_error(config_dir))?;
        write_ron(&config_dir.join(CONFIG_FILE), self)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = error::read(&config_path)?;
        let new_config: Config = error::parse(&config_path, &contents)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

/// Default config directory: `<os config dir>/axial`, or `./axial` when the
/// OS does not expose one.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Read a RON map of body id to [`BodyRecord`].
pub fn load_body_records(path: &Path) -> Result<BTreeMap<String, BodyRecord>, ConfigError> {
    let contents = error::read(path)?;
    let records: BTreeMap<String, BodyRecord> = error::parse(path, &contents)?;
    log::info!("Loaded {} body records from {}", records.len(), path.display());
    Ok(records)
}

/// Write any serializable value as pretty RON, creating parent directories.
pub fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(error::write_error(parent))?;
    }

    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .separate_tuple_members(true)
        .enumerate_arrays(false);

    let serialized =
        ron::ser::to_string_pretty(value, pretty).map_err(|source| ConfigError::SerializeError {
            path: path.to_path_buf(),
            source,
        })?;

    std::fs::write(path, serialized).map_err(error::write_error(path))?;
    Ok(())
}
