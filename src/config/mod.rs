//! Configuration module for treemirror
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TREEMIRROR_*)
//! 3. `--config` file, or `$TREEMIRROR_CONFIG`
//! 4. User config (`$XDG_CONFIG_HOME/treemirror/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_or_default, parse_with_warnings, resolve_config_path, with_env_overrides_from,
    ConfigWarning, CONFIG_FILE,
};
pub use types::{
    ColorMode, Config, FilterConfig, OutputConfig, TransformConfig, WatchConfig, MAX_DURATION_SECS,
};
