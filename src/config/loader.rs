// src/config/loader.rs
//! Layered configuration loader: defaults, TOML files, then environment

use crate::config::{constants::paths, SimulatorSettings};
use crate::error::{EkgError, EkgResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration loader merging files in order of precedence
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a loader over the default local config files
    pub fn new() -> Self {
        Self::with_paths(vec![
            PathBuf::from(paths::DEFAULT_CONFIG_FILE),
            PathBuf::from(paths::LOCAL_CONFIG_FILE),
        ])
    }

    /// Create loader with custom paths; later paths override earlier ones
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            env_prefix: paths::ENV_PREFIX.to_string(),
        }
    }

    /// Replace the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Paths consulted by `load`
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load, merge and validate the settings
    pub fn load(&self) -> EkgResult<SimulatorSettings> {
        let mut merged = toml::Value::try_from(SimulatorSettings::default())?;

        for path in &self.config_paths {
            if !path.exists() {
                debug!(path = %path.display(), "skipping missing config file");
                continue;
            }
            let overlay = Self::load_config_file(path)?;
            merge_toml_values(&mut merged, overlay);
            info!(path = %path.display(), "loaded simulator config");
        }

        self.apply_environment_overrides(&mut merged);
        finish(merged)
    }

    /// Parse settings from TOML text, applying the same defaults and validation
    pub fn from_toml_str(content: &str) -> EkgResult<SimulatorSettings> {
        let mut merged = toml::Value::try_from(SimulatorSettings::default())?;
        let overlay: toml::Value = toml::from_str(content)?;
        merge_toml_values(&mut merged, overlay);
        finish(merged)
    }

    /// Validate a single file without loading it
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> EkgResult<()> {
        let overlay = Self::load_config_file(path.as_ref())?;
        let mut merged = toml::Value::try_from(SimulatorSettings::default())?;
        merge_toml_values(&mut merged, overlay);
        finish(merged).map(|_| ())
    }

    /// Write settings to a TOML file
    pub fn export_config<P: AsRef<Path>>(settings: &SimulatorSettings, path: P) -> EkgResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(settings)?;
        std::fs::write(path, content).map_err(|source| EkgError::ConfigIo {
            path: path.display().to_string(),
            source,
        })
    }

    fn load_config_file(path: &Path) -> EkgResult<toml::Value> {
        let content = std::fs::read_to_string(path).map_err(|source| EkgError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// `EKG_SYNTHESIS_SAMPLING_RATE_HZ=500` sets `synthesis.sampling_rate_hz`
    fn apply_environment_overrides(&self, config: &mut toml::Value) {
        for (key, value) in std::env::vars() {
            let Some(rest) = key.strip_prefix(&self.env_prefix) else {
                continue;
            };
            let rest = rest.to_lowercase();
            let Some((section, field)) = rest.split_once('_') else {
                warn!(key = %key, "ignoring env override without a section");
                continue;
            };
            if field.is_empty() {
                continue;
            }

            debug!(section, field, "applying env override");
            set_nested_value(config, section, field, parse_env_value(&value));
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(merged: toml::Value) -> EkgResult<SimulatorSettings> {
    let settings = merged
        .try_into::<SimulatorSettings>()
        .map_err(|e| EkgError::ConfigParse(e.to_string()))?;
    settings.validate().map_err(EkgError::Validation)?;
    Ok(settings)
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(int_val) = value.parse::<i64>() {
        toml::Value::Integer(int_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        toml::Value::Float(float_val)
    } else if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn set_nested_value(config: &mut toml::Value, section: &str, field: &str, value: toml::Value) {
    if let toml::Value::Table(root) = config {
        let entry = root
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
        if let toml::Value::Table(table) = entry {
            table.insert(field.to_string(), value);
        }
    }
}
