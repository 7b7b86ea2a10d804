//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};

use super::types::{ColorMode, Config};

/// File name looked up under the user config directory.
pub const CONFIG_FILE: &str = "treemirror/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> MirrorResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used for messages.
pub fn parse_with_warnings(content: &str, path: &Path) -> MirrorResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| MirrorError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit path, `$TREEMIRROR_CONFIG`, the user config, or
/// defaults; then apply environment overrides and validate.
pub fn load_or_default(explicit: Option<&Path>) -> MirrorResult<(Config, Vec<ConfigWarning>)> {
    let get_env = |key: &str| std::env::var(key).ok();

    let path = resolve_config_path(explicit, get_env)?;
    let (config, warnings) = match &path {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    let config = with_env_overrides_from(config, get_env);
    let origin = path.unwrap_or_else(|| PathBuf::from("<environment>"));
    config.validate(&origin)?;

    Ok((config, warnings))
}

/// Pick the config file to read, if any.
///
/// An explicitly named file must exist. The user file is optional.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    get_env: impl Fn(&str) -> Option<String>,
) -> MirrorResult<Option<PathBuf>> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| get_env("TREEMIRROR_CONFIG").map(PathBuf::from));
    if let Some(path) = named {
        if !path.is_file() {
            return Err(MirrorError::InvalidConfig {
                file: path,
                message: "file not found".to_string(),
            });
        }
        return Ok(Some(path));
    }

    let user_config = user_config_dir(&get_env).map(|dir| dir.join(CONFIG_FILE));
    Ok(user_config.filter(|p| p.is_file()))
}

/// Apply environment variable overrides (TREEMIRROR_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Like [`with_env_overrides`] with an injectable lookup.
///
/// Unparsable values are ignored and the file value is kept.
pub fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // TREEMIRROR_DEBOUNCE_SECS
    if let Some(secs) = get_env("TREEMIRROR_DEBOUNCE_SECS").and_then(|v| v.trim().parse().ok()) {
        config.watch.debounce_secs = secs;
    }

    // TREEMIRROR_RECONCILE_SECS
    if let Some(secs) = get_env("TREEMIRROR_RECONCILE_SECS").and_then(|v| v.trim().parse().ok())
    {
        config.watch.reconcile_secs = secs;
    }

    // TREEMIRROR_BATCH_SIZE
    if let Some(size) = get_env("TREEMIRROR_BATCH_SIZE").and_then(|v| v.trim().parse().ok()) {
        config.watch.batch_size = size;
    }

    // TREEMIRROR_EXTENSIONS (comma-separated)
    if let Some(extensions) = get_env("TREEMIRROR_EXTENSIONS") {
        let parsed: Vec<String> = extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !parsed.is_empty() {
            config.filter.extensions = parsed;
        }
    }

    // TREEMIRROR_COLOR
    if let Some(color) = get_env("TREEMIRROR_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

fn user_config_dir(get_env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    get_env("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "debounce_secs",
        "debounce_check_secs",
        "reconcile_secs",
        "reconcile_check_secs",
        "batch_size",
        "initial_scan",
        "filter",
        "extensions",
        "ignore",
        "transform",
        "command",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
