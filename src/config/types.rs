//! Configuration types

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DEFAULT_EXTENSIONS, DEFAULT_IGNORE};
use crate::error::{MirrorError, MirrorResult};

use super::loader::{self, ConfigWarning};

/// Watch timing configuration. Durations are in (fractional) seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Quiet period a path must see before its event is acted on
    #[serde(default = "default_debounce_secs")]
    pub debounce_secs: f64,

    #[serde(default = "default_debounce_check_secs")]
    pub debounce_check_secs: f64,

    /// Window after the first event in a directory before it is re-listed
    #[serde(default = "default_reconcile_secs")]
    pub reconcile_secs: f64,

    #[serde(default = "default_reconcile_check_secs")]
    pub reconcile_check_secs: f64,

    /// Tasks handed to the transform per scheduler call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Mirror files that already exist when the watch starts
    #[serde(default = "default_true")]
    pub initial_scan: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_secs: default_debounce_secs(),
            debounce_check_secs: default_debounce_check_secs(),
            reconcile_secs: default_reconcile_secs(),
            reconcile_check_secs: default_reconcile_check_secs(),
            batch_size: default_batch_size(),
            initial_scan: true,
        }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        secs_or(self.debounce_secs, default_debounce_secs())
    }

    pub fn debounce_check(&self) -> Duration {
        secs_or(self.debounce_check_secs, default_debounce_check_secs())
    }

    pub fn reconcile(&self) -> Duration {
        secs_or(self.reconcile_secs, default_reconcile_secs())
    }

    pub fn reconcile_check(&self) -> Duration {
        secs_or(self.reconcile_check_secs, default_reconcile_check_secs())
    }
}

fn default_debounce_secs() -> f64 {
    5.0
}

fn default_debounce_check_secs() -> f64 {
    1.0
}

fn default_reconcile_secs() -> f64 {
    30.0
}

fn default_reconcile_check_secs() -> f64 {
    5.0
}

fn default_batch_size() -> usize {
    1
}

fn default_true() -> bool {
    true
}

/// Upper bound for every `watch.*_secs` value (one week).
pub const MAX_DURATION_SECS: f64 = 7.0 * 24.0 * 60.0 * 60.0;

fn secs_or(value: f64, fallback: f64) -> Duration {
    Duration::try_from_secs_f64(value)
        .or_else(|_| Duration::try_from_secs_f64(fallback))
        .unwrap_or_default()
}

/// Which paths are mirrored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Extensions accepted for updates (case-insensitive, no leading dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Gitignore-style globs for paths that are never mirrored
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore: default_ignore(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}

/// Transform configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TransformConfig {
    /// External command and arguments. Empty means plain copy.
    ///
    /// `{input}`, `{output}` and `{output_dir}` are substituted per file.
    #[serde(default)]
    pub command: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub transform: TransformConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> MirrorResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> MirrorResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the user config, or defaults
    pub fn load_or_default(explicit: Option<&Path>) -> MirrorResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (TREEMIRROR_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Reject values the watch loop cannot run with.
    pub fn validate(&self, file: &Path) -> MirrorResult<()> {
        let invalid = |message: String| MirrorError::InvalidConfig {
            file: file.to_path_buf(),
            message,
        };

        if self.watch.batch_size == 0 {
            return Err(invalid("watch.batch_size must be at least 1".to_string()));
        }
        for (key, value) in [
            ("debounce_secs", self.watch.debounce_secs),
            ("debounce_check_secs", self.watch.debounce_check_secs),
            ("reconcile_secs", self.watch.reconcile_secs),
            ("reconcile_check_secs", self.watch.reconcile_check_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "watch.{key} must be a non-negative number of seconds, got {value}"
                )));
            }
            if value > MAX_DURATION_SECS {
                return Err(invalid(format!(
                    "watch.{key} must be at most {MAX_DURATION_SECS} seconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}
