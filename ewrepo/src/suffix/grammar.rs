//! Per-segment validation rules and the segment transition table.
//!
//! Every rule is a whole-token match: a pattern that only matches a prefix
//! of the token rejects it. This keeps near-miss tokens such as `5.5.5x`
//! or `1.0!` out of decomposed suffixes.

use std::sync::OnceLock;

use regex::Regex;

use super::error::GrammarError;
use super::segment::{SegmentKind, META_AREA};

/// File extensions recognized as package files when none are configured.
pub const DEFAULT_PACKAGE_EXTENSIONS: &[&str] = &["tar.gz", "app", "rel"];

/// Parser state, named after the segment kind expected next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    ExpectErtsVersion,
    ExpectArea,
    ExpectSide,
    ExpectPackageName,
    ExpectPackageVersion,
    ExpectPackageFile,
    /// Terminal file consumed; nothing may follow.
    Done,
}

impl ParseState {
    /// The segment kind this state consumes, or `None` for [`ParseState::Done`].
    pub fn expected_kind(&self) -> Option<SegmentKind> {
        match self {
            ParseState::ExpectErtsVersion => Some(SegmentKind::ErtsVersion),
            ParseState::ExpectArea => Some(SegmentKind::Area),
            ParseState::ExpectSide => Some(SegmentKind::Side),
            ParseState::ExpectPackageName => Some(SegmentKind::PackageName),
            ParseState::ExpectPackageVersion => Some(SegmentKind::PackageVersion),
            ParseState::ExpectPackageFile => Some(SegmentKind::PackageFile),
            ParseState::Done => None,
        }
    }

    /// Whether running out of tokens in this state is a successful parse.
    ///
    /// Only the erts version is mandatory.
    pub fn accepts_end(&self) -> bool {
        !matches!(self, ParseState::ExpectErtsVersion)
    }
}

/// Compiled suffix grammar.
///
/// Use [`Grammar::default_grammar`] for the shared, process-wide instance,
/// or [`Grammar::with_package_extensions`] to accept a different set of
/// terminal file extensions.
#[derive(Debug, Clone)]
pub struct Grammar {
    erts_version: Regex,
    package_name: Regex,
    package_vsn: Regex,
    package_file: Regex,
    package_extensions: Vec<String>,
}

impl Grammar {
    /// The shared grammar using [`DEFAULT_PACKAGE_EXTENSIONS`].
    ///
    /// Compiled once on first use and never mutated afterwards.
    pub fn default_grammar() -> &'static Grammar {
        static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
        GRAMMAR.get_or_init(|| {
            Grammar::with_package_extensions(DEFAULT_PACKAGE_EXTENSIONS)
                .expect("default package extensions are valid")
        })
    }

    /// Build a grammar accepting the given package file extensions.
    ///
    /// Extensions are given without the leading dot (`tar.gz`, not `.tar.gz`);
    /// a single leading dot is tolerated and stripped.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty or an extension contains
    /// characters other than ASCII alphanumerics, `_` and inner dots.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewrepo::suffix::{Grammar, SegmentKind};
    ///
    /// let grammar = Grammar::with_package_extensions(["tar.gz", "tar.bz2"]).unwrap();
    /// assert!(grammar.matches(SegmentKind::PackageFile, "gas.tar.bz2"));
    /// assert!(!grammar.matches(SegmentKind::PackageFile, "gas.app"));
    /// ```
    pub fn with_package_extensions<I, S>(extensions: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let package_extensions = normalize_extensions(extensions)?;

        let alternatives = package_extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");
        let package_file = compile(&format!(
            r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*\.(?:{})$",
            alternatives
        ))?;

        Ok(Self {
            // Three or more dot-separated digit groups: 5.5.5, 5.10.4.2
            erts_version: compile(r"^[0-9]+(?:\.[0-9]+){2,}$")?,
            package_name: compile(r"^[a-z][A-Za-z0-9_]*$")?,
            package_vsn: compile(r"^[A-Za-z0-9_]+(?:[.\-][A-Za-z0-9_]+)*$")?,
            package_file,
            package_extensions,
        })
    }

    /// The accepted package file extensions, without leading dots.
    pub fn package_extensions(&self) -> &[String] {
        &self.package_extensions
    }

    /// Check a token against the rule for `kind`, over its entire length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ewrepo::suffix::{Grammar, SegmentKind};
    ///
    /// let grammar = Grammar::default_grammar();
    /// assert!(grammar.matches(SegmentKind::ErtsVersion, "5.5.5"));
    /// assert!(!grammar.matches(SegmentKind::ErtsVersion, "5.5"));
    /// assert!(!grammar.matches(SegmentKind::ErtsVersion, "5.5.5-beta"));
    /// ```
    pub fn matches(&self, kind: SegmentKind, token: &str) -> bool {
        match kind {
            SegmentKind::ErtsVersion => self.erts_version.is_match(token),
            SegmentKind::Area => !token.is_empty(),
            SegmentKind::Side => matches!(token, "lib" | "releases"),
            SegmentKind::PackageName => self.package_name.is_match(token),
            SegmentKind::PackageVersion => self.package_vsn.is_match(token),
            SegmentKind::PackageFile => self.package_file.is_match(token),
        }
    }

    /// State following `state` once `token` has been accepted in it.
    ///
    /// The only conditional branch: an area of `Meta` skips the side
    /// segment and goes straight to the package name. This is a
    /// transitional irregularity in the repository layout, kept until
    /// side-aware Meta areas exist.
    pub fn next_state(&self, state: ParseState, token: &str) -> ParseState {
        match state {
            ParseState::ExpectErtsVersion => ParseState::ExpectArea,
            ParseState::ExpectArea if token == META_AREA => ParseState::ExpectPackageName,
            ParseState::ExpectArea => ParseState::ExpectSide,
            ParseState::ExpectSide => ParseState::ExpectPackageName,
            ParseState::ExpectPackageName => ParseState::ExpectPackageVersion,
            ParseState::ExpectPackageVersion => ParseState::ExpectPackageFile,
            ParseState::ExpectPackageFile | ParseState::Done => ParseState::Done,
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::default_grammar().clone()
    }
}

fn compile(pattern: &str) -> Result<Regex, GrammarError> {
    Regex::new(pattern).map_err(|e| GrammarError::Pattern(e.to_string()))
}

fn normalize_extensions<I, S>(extensions: I) -> Result<Vec<String>, GrammarError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for raw in extensions {
        let raw = raw.as_ref().trim();
        let ext = raw.strip_prefix('.').unwrap_or(raw);
        let valid = !ext.is_empty()
            && ext
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(is_extension_char));
        if !valid {
            return Err(GrammarError::InvalidExtension(raw.to_string()));
        }
        if !normalized.iter().any(|e| e == ext) {
            normalized.push(ext.to_string());
        }
    }

    if normalized.is_empty() {
        return Err(GrammarError::NoPackageExtensions);
    }
    Ok(normalized)
}

fn is_extension_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
