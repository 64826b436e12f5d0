//! Error types for suffix decomposition and grammar construction.

use thiserror::Error;

use super::segment::SegmentKind;

/// Result type for suffix operations.
pub type SuffixResult<T> = Result<T, SuffixError>;

/// A grammar violation found while decomposing a suffix.
///
/// Each variant names the stage that rejected the input and carries the
/// exact offending token text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuffixError {
    /// The first token does not fully match the runtime version rule.
    #[error("bad_erts_vsn: '{0}' is not a valid erts version")]
    BadErtsVsn(String),

    /// The side token is neither `lib` nor `releases`.
    #[error("bad_side: '{0}' is not a valid side (expected lib or releases)")]
    BadSide(String),

    /// The package name token fails its full-match rule.
    #[error("bad_package_name: '{0}' is not a valid package name")]
    BadPackageName(String),

    /// The package version token fails its full-match rule.
    #[error("bad_package_vsn: '{0}' is not a valid package version")]
    BadPackageVsn(String),

    /// The terminal file token is not a recognized package file, or tokens
    /// remain after the terminal position.
    #[error("bad_package: '{0}' is not a valid package file")]
    BadPackage(String),
}

impl SuffixError {
    /// Stage tag identifying where decomposition failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewrepo::suffix::SuffixError;
    ///
    /// assert_eq!(SuffixError::BadSide("bin".into()).tag(), "bad_side");
    /// ```
    pub fn tag(&self) -> &'static str {
        match self {
            SuffixError::BadErtsVsn(_) => "bad_erts_vsn",
            SuffixError::BadSide(_) => "bad_side",
            SuffixError::BadPackageName(_) => "bad_package_name",
            SuffixError::BadPackageVsn(_) => "bad_package_vsn",
            SuffixError::BadPackage(_) => "bad_package",
        }
    }

    /// The offending token text.
    pub fn token(&self) -> &str {
        match self {
            SuffixError::BadErtsVsn(t)
            | SuffixError::BadSide(t)
            | SuffixError::BadPackageName(t)
            | SuffixError::BadPackageVsn(t)
            | SuffixError::BadPackage(t) => t,
        }
    }

    /// The segment kind whose validation failed.
    pub fn stage(&self) -> SegmentKind {
        match self {
            SuffixError::BadErtsVsn(_) => SegmentKind::ErtsVersion,
            SuffixError::BadSide(_) => SegmentKind::Side,
            SuffixError::BadPackageName(_) => SegmentKind::PackageName,
            SuffixError::BadPackageVsn(_) => SegmentKind::PackageVersion,
            SuffixError::BadPackage(_) => SegmentKind::PackageFile,
        }
    }
}

/// Errors building a custom [`Grammar`](super::Grammar).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// No package file extensions were supplied.
    #[error("package file extension set is empty")]
    NoPackageExtensions,

    /// An extension is empty or contains characters outside `[A-Za-z0-9_.]`.
    #[error("invalid package file extension: '{0}'")]
    InvalidExtension(String),

    /// The compiled pattern was rejected by the regex engine.
    #[error("failed to compile package file pattern: {0}")]
    Pattern(String),
}
