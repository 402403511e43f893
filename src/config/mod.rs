//! Configuration module for `MallaTracker`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Grading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Passing threshold on the 1.0-7.0 scale
    #[serde(default = "default_passing_threshold")]
    pub passing_threshold: f64,
}

const fn default_passing_threshold() -> f64 {
    crate::core::projection::DEFAULT_PASSING_THRESHOLD
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            passing_threshold: default_passing_threshold(),
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for the grade store
    #[serde(default)]
    pub data_dir: String,
    /// Directory for curriculum catalog files
    #[serde(default)]
    pub catalog_dir: String,
}

/// CLI overrides applied on top of the loaded configuration.
/// `None` means no override for that field.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override for `logging.level`
    pub level: Option<String>,
    /// Override for `logging.file`
    pub file: Option<String>,
    /// Override for `logging.verbose`
    pub verbose: Option<bool>,
    /// Override for `grading.passing_threshold`
    pub passing_threshold: Option<f64>,
    /// Override for `paths.data_dir`
    pub data_dir: Option<String>,
    /// Override for `paths.catalog_dir`
    pub catalog_dir: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Get the `$MALLA_TRACKER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/mallatracker`
    /// - macOS: `~/Library/Application Support/mallatracker`
    /// - Windows: `%APPDATA%\mallatracker`
    #[must_use]
    pub fn get_mallatracker_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mallatracker")
    }

    /// Merge missing fields from defaults into this config
    /// Returns true if any fields were added
    fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        // Merge string fields only when they're empty (use defaults for empty values)
        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.data_dir.is_empty() && !defaults.paths.data_dir.is_empty() {
            self.paths.data_dir.clone_from(&defaults.paths.data_dir);
            changed = true;
        }
        if self.paths.catalog_dir.is_empty() && !defaults.paths.catalog_dir.is_empty() {
            self.paths
                .catalog_dir
                .clone_from(&defaults.paths.catalog_dir);
            changed = true;
        }

        changed
    }

    /// Get the user config file path
    ///
    /// return config.toml for release
    ///        dconfig.toml for debug
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            Self::get_mallatracker_dir().join("dconfig.toml")
        }
        #[cfg(not(debug_assertions))]
        {
            Self::get_mallatracker_dir().join("config.toml")
        }
    }

    /// Expand `$MALLA_TRACKER` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$MALLA_TRACKER") {
            let tracker_dir = Self::get_mallatracker_dir();
            value.replace("$MALLA_TRACKER", tracker_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        // Expand variables in config values
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.catalog_dir = Self::expand_variables(&config.paths.catalog_dir);

        Ok(config)
    }

    /// Initialize config from defaults (TOML string)
    ///
    /// # Panics
    /// Panics if the compiled-in defaults TOML cannot be parsed
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load config from user config file, creating it from defaults on first run
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    // Merge any missing fields from defaults
                    if config.merge_defaults(&defaults) {
                        // Save the updated config with new fields
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            // First run: create directory and config file from defaults

            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }

            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save config to user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be saved
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Apply CLI overrides on top of this config
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(threshold) = overrides.passing_threshold {
            self.grading.passing_threshold = threshold;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
        if let Some(catalog_dir) = &overrides.catalog_dir {
            self.paths.catalog_dir.clone_from(catalog_dir);
        }
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "passing_threshold" => Some(self.grading.passing_threshold.to_string()),
            "data_dir" => Some(self.paths.data_dir.clone()),
            "catalog_dir" => Some(self.paths.catalog_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "passing_threshold" => {
                let threshold = value.parse::<f64>().map_err(|_| {
                    format!("Invalid numeric value for 'passing_threshold': '{value}'")
                })?;
                if !(1.0..=7.0).contains(&threshold) {
                    return Err(format!(
                        "'passing_threshold' must be between 1.0 and 7.0, got {value}"
                    ));
                }
                self.grading.passing_threshold = threshold;
            }
            "data_dir" => self.paths.data_dir = value.to_string(),
            "catalog_dir" => self.paths.catalog_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "passing_threshold" => {
                self.grading.passing_threshold = defaults.grading.passing_threshold;
            }
            "data_dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "catalog_dir" => self
                .paths
                .catalog_dir
                .clone_from(&defaults.paths.catalog_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// # Errors
    /// Returns an error if the config file cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(
            f,
            "  passing_threshold = {}",
            self.grading.passing_threshold
        )?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  catalog_dir = \"{}\"", self.paths.catalog_dir)?;

        Ok(())
    }
}
