//! Configuration file for ewrepo tools.
//!
//! Settings live in an INI file, by default `~/.ewrepo/config.ini`:
//!
//! ```ini
//! [grammar]
//! package_extensions = tar.gz,app,rel
//!
//! [defaults]
//! area = Generic
//!
//! [logging]
//! level = info
//! ```
//!
//! A missing file yields the defaults. Unknown sections and keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::suffix::{Grammar, GrammarError, DEFAULT_PACKAGE_EXTENSIONS, GENERIC_AREA};

/// Directory holding the configuration file, relative to the home directory.
const CONFIG_DIR: &str = ".ewrepo";

/// Configuration filename.
const CONFIG_FILE: &str = "config.ini";

const SECTION_GRAMMAR: &str = "grammar";
const SECTION_DEFAULTS: &str = "defaults";
const SECTION_LOGGING: &str = "logging";

const KEY_PACKAGE_EXTENSIONS: &str = "package_extensions";
const KEY_AREA: &str = "area";
const KEY_LEVEL: &str = "level";

/// Default log filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors loading, saving or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// The file exists but could not be read or parsed.
    #[error("failed to read config {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// The file or its directory could not be written.
    #[error("failed to write config {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value is malformed.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// The configured extensions do not form a valid grammar.
    #[error("invalid grammar configuration: {0}")]
    Grammar(#[from] GrammarError),
}

/// Path of the user configuration file.
pub fn config_file_path() -> ConfigResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoHomeDir)
}

/// Settings shared by the ewrepo library and CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixConfig {
    /// Extensions accepted for the terminal package file, without dots.
    pub package_extensions: Vec<String>,

    /// Area used when a command does not name one.
    pub default_area: String,

    /// Log filter directive, e.g. `info` or `ewrepo=debug`.
    pub log_level: String,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            package_extensions: DEFAULT_PACKAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            default_area: GENERIC_AREA.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl SuffixConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted package file extensions.
    pub fn with_package_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default area.
    pub fn with_default_area(mut self, area: impl Into<String>) -> Self {
        self.default_area = area.into();
        self
    }

    /// Set the log filter directive.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Load from the user configuration file.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_ini(&ini)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Build from parsed INI content, falling back to defaults per key.
    pub fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(value) = ini
            .section(Some(SECTION_GRAMMAR))
            .and_then(|s| s.get(KEY_PACKAGE_EXTENSIONS))
        {
            let extensions: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
                .collect();
            if extensions.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("{}.{}", SECTION_GRAMMAR, KEY_PACKAGE_EXTENSIONS),
                    reason: "at least one extension is required".to_string(),
                });
            }
            config.package_extensions = extensions;
        }

        if let Some(area) = ini
            .section(Some(SECTION_DEFAULTS))
            .and_then(|s| s.get(KEY_AREA))
        {
            let area = area.trim();
            if area.is_empty() || area.contains('/') {
                return Err(ConfigError::InvalidValue {
                    key: format!("{}.{}", SECTION_DEFAULTS, KEY_AREA),
                    reason: format!("'{}' is not a single path token", area),
                });
            }
            config.default_area = area.to_string();
        }

        if let Some(level) = ini
            .section(Some(SECTION_LOGGING))
            .and_then(|s| s.get(KEY_LEVEL))
        {
            config.log_level = level.trim().to_string();
        }

        Ok(config)
    }

    /// Render as INI content.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION_GRAMMAR))
            .set(KEY_PACKAGE_EXTENSIONS, self.package_extensions.join(","));
        ini.with_section(Some(SECTION_DEFAULTS))
            .set(KEY_AREA, self.default_area.as_str());
        ini.with_section(Some(SECTION_LOGGING))
            .set(KEY_LEVEL, self.log_level.as_str());
        ini
    }

    /// Save to a specific file, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Compile the grammar described by this configuration.
    ///
    /// Returns a fresh grammar even when the extensions equal the defaults;
    /// use [`Grammar::default_grammar`] to share the process-wide instance.
    pub fn grammar(&self) -> ConfigResult<Grammar> {
        Ok(Grammar::with_package_extensions(&self.package_extensions)?)
    }
}
