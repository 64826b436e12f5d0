//! CLI error type.

use std::fmt;

use ewrepo::config::ConfigError;
use ewrepo::suffix::SuffixError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or applied.
    Config(String),

    /// The suffix was rejected by the grammar.
    Suffix(SuffixError),

    /// Invalid command-line usage.
    Usage(String),

    /// Output could not be rendered.
    Output(String),

    /// Logging could not be initialized.
    Logging(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Suffix(e) => write!(f, "Invalid suffix: {}", e),
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Suffix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<SuffixError> for CliError {
    fn from(e: SuffixError) -> Self {
        CliError::Suffix(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_suffix_error_display_and_source() {
        let err = CliError::from(SuffixError::BadSide("bin".to_string()));
        assert!(err.to_string().contains("bad_side"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_conversion() {
        let err = CliError::from(ConfigError::NoHomeDir);
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("home directory"));
        assert!(err.source().is_none());
    }
}
