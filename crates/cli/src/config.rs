// Local configuration for the CLI.
//
// Global config: `~/.cmdpath/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cmdpath_core::ResolverOptions;

/// Root directory for cmdpath global state: `~/.cmdpath/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cmdpath"))
}

/// Path to the global config file: `~/.cmdpath/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

/// Global configuration at `~/.cmdpath/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Command definitions file. Relative paths resolve against the
    /// directory holding the config file.
    pub commands: Option<PathBuf>,
    /// Resolver options (case policy, quotes, depth limit).
    pub resolver: ResolverOptions,
}

impl GlobalConfig {
    /// Load from `~/.cmdpath/config.toml`. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        global_config_path().and_then(|p| Self::load_from(&p).ok()).unwrap_or_default()
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// The definitions file, with relative paths anchored at `config_dir`.
    pub fn commands_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.commands.as_ref().map(|path| {
            if path.is_relative() {
                config_dir.join(path)
            } else {
                path.clone()
            }
        })
    }
}

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
