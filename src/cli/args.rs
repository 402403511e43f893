//! CLI argument definitions for `MallaTracker`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use malla_tracker::config::ConfigOverrides;
use malla_tracker::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Subcommands for configuration management
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `passing_threshold`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Operations on one course's evaluation set
#[derive(Debug, Subcommand)]
pub enum GradesSubcommand {
    /// Show the evaluations and grade projection for the course.
    List,
    /// Add an evaluation with a weight and an optional grade.
    Add {
        /// Evaluation name (e.g., "Controles", "Examen")
        #[arg(value_name = "NAME")]
        name: String,

        /// Percentage of the course grade, in (0, 100]
        #[arg(value_name = "WEIGHT")]
        weight: f64,

        /// Grade in [1.0, 7.0] (optional; omit when not yet graded)
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<f64>,
    },
    /// Remove an evaluation by id.
    Remove {
        /// Evaluation id
        #[arg(value_name = "ID")]
        id: u64,
    },
    /// Set the grade of an evaluation directly.
    ///
    /// Ignored while the evaluation has sub-scores; their mean governs the grade.
    SetGrade {
        /// Evaluation id
        #[arg(value_name = "ID")]
        id: u64,

        /// Grade in [1.0, 7.0]
        #[arg(value_name = "GRADE")]
        grade: f64,
    },
    /// Add a sub-score to an evaluation; the grade becomes the mean of sub-scores.
    AddScore {
        /// Evaluation id
        #[arg(value_name = "ID")]
        id: u64,

        /// Score in [1.0, 7.0]
        #[arg(value_name = "SCORE")]
        score: f64,
    },
    /// Remove a sub-score from an evaluation.
    RemoveScore {
        /// Evaluation id
        #[arg(value_name = "ID")]
        id: u64,

        /// Sub-score id
        #[arg(value_name = "SUB_ID")]
        sub_id: u64,
    },
}

/// Top-level CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List available curricula, or show the courses of one curriculum file.
    Courses {
        /// Path to a curriculum JSON file (omit to list the catalog directory)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Track grades for a course and project what is needed to pass.
    Grades {
        /// Course identifier (e.g., "BQ101")
        #[arg(value_name = "COURSE_ID")]
        course_id: String,

        #[command(subcommand)]
        subcommand: GradesSubcommand,
    },
}

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
    name = "mallatracker",
    about = "MallaTracker command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config passing threshold
    #[arg(long = "config-threshold", value_name = "GRADE")]
    pub config_threshold: Option<f64>,

    /// Override config passing threshold (short form)
    #[arg(long = "threshold", value_name = "GRADE")]
    pub threshold: Option<f64>,

    /// Override config data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config catalog directory
    #[arg(long = "catalog-dir", value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be applied to
    /// the loaded configuration. Short-form flags (e.g., `--threshold`) take precedence
    /// over long-form flags (e.g., `--config-threshold`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            passing_threshold: self.threshold.or(self.config_threshold),
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_data_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
            catalog_dir: self
                .catalog_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
