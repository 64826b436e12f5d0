//! Suffix decomposition.
//!
//! The parser tokenizes a suffix on `/` and walks the grammar's transition
//! table one token at a time. The walk stops successfully when tokens run
//! out at any segment boundary after the erts version, and aborts on the
//! first token that fails its rule.

use super::builder::SEPARATOR;
use super::error::{SuffixError, SuffixResult};
use super::grammar::{Grammar, ParseState};
use super::segment::{Segment, SegmentKind};

/// Finite-state decomposer over a compiled [`Grammar`].
#[derive(Debug, Clone, Copy)]
pub struct SuffixParser<'g> {
    grammar: &'g Grammar,
}

impl Default for SuffixParser<'static> {
    fn default() -> Self {
        Self::new(Grammar::default_grammar())
    }
}

impl<'g> SuffixParser<'g> {
    /// Create a parser over the given grammar.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// The grammar this parser validates against.
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Decompose a suffix into its ordered, typed segments.
    ///
    /// Repeated, leading and trailing separators are ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`SuffixError`] of the first stage that rejects its
    /// token. No partial segment list is returned on failure.
    pub fn decompose(&self, suffix: &str) -> SuffixResult<Vec<Segment>> {
        let tokens: Vec<&str> = suffix
            .split(SEPARATOR)
            .filter(|t| !t.is_empty())
            .collect();

        let mut segments = Vec::with_capacity(tokens.len());
        let mut state = ParseState::ExpectErtsVersion;
        let mut index = 0;

        // The file stage owns the last token, so Done is only reached at end of input
        while let Some(kind) = state.expected_kind() {
            let Some(&token) = tokens.get(index) else {
                if state.accepts_end() {
                    break;
                }
                // Nothing at all to read as the erts version
                return Err(self.reject(state, ""));
            };

            if kind == SegmentKind::PackageFile && tokens.len() - index > 1 {
                return Err(self.reject(state, &tokens[index..].join("/")));
            }

            if !self.grammar.matches(kind, token) {
                return Err(self.reject(state, token));
            }

            tracing::trace!(kind = %kind, token, "accepted suffix segment");
            segments.push(Segment::new(kind, token));
            state = self.grammar.next_state(state, token);
            index += 1;
        }

        Ok(segments)
    }

    fn reject(&self, state: ParseState, token: &str) -> SuffixError {
        let token = token.to_string();
        let err = match state {
            ParseState::ExpectErtsVersion => SuffixError::BadErtsVsn(token),
            ParseState::ExpectSide => SuffixError::BadSide(token),
            ParseState::ExpectPackageName => SuffixError::BadPackageName(token),
            ParseState::ExpectPackageVersion => SuffixError::BadPackageVsn(token),
            // Area only rejects empty tokens, which tokenization removes
            ParseState::ExpectArea | ParseState::ExpectPackageFile | ParseState::Done => {
                SuffixError::BadPackage(token)
            }
        };
        tracing::debug!(tag = err.tag(), token = err.token(), "rejected suffix");
        err
    }
}

/// Decompose a suffix with the default grammar.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::{decompose, Segment, SegmentKind};
///
/// let segments = decompose("5.5.5/Generic/lib").unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
///         Segment::new(SegmentKind::Area, "Generic"),
///         Segment::new(SegmentKind::Side, "lib"),
///     ]
/// );
///
/// let err = decompose("5.5/Generic/lib").unwrap_err();
/// assert_eq!(err.tag(), "bad_erts_vsn");
/// assert_eq!(err.token(), "5.5");
/// ```
pub fn decompose(suffix: &str) -> SuffixResult<Vec<Segment>> {
    SuffixParser::default().decompose(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(kind: SegmentKind, text: &str) -> Segment {
        Segment::new(kind, text)
    }

    // ========================================================================
    // Successful decompositions
    // ========================================================================

    #[test]
    fn test_erts_only() {
        assert_eq!(
            decompose("5.5.5").unwrap(),
            vec![seg(SegmentKind::ErtsVersion, "5.5.5")]
        );
    }

    #[test]
    fn test_area_level() {
        assert_eq!(
            decompose("/5.5.5/Generic").unwrap(),
            vec![
                seg(SegmentKind::ErtsVersion, "5.5.5"),
                seg(SegmentKind::Area, "Generic"),
            ]
        );
    }

    #[test]
    fn test_side_level_terminates_early() {
        assert_eq!(
            decompose("5.5.5/Generic/lib").unwrap(),
            vec![
                seg(SegmentKind::ErtsVersion, "5.5.5"),
                seg(SegmentKind::Area, "Generic"),
                seg(SegmentKind::Side, "lib"),
            ]
        );
    }

    #[test]
    fn test_package_version_level() {
        assert_eq!(
            decompose("5.5.5/Generic/releases/faxien/1.0").unwrap(),
            vec![
                seg(SegmentKind::ErtsVersion, "5.5.5"),
                seg(SegmentKind::Area, "Generic"),
                seg(SegmentKind::Side, "releases"),
                seg(SegmentKind::PackageName, "faxien"),
                seg(SegmentKind::PackageVersion, "1.0"),
            ]
        );
    }

    #[test]
    fn test_full_depth() {
        assert_eq!(
            decompose("5.5.5/Generic/lib/gas/5.1.0/gas.tar.gz").unwrap(),
            vec![
                seg(SegmentKind::ErtsVersion, "5.5.5"),
                seg(SegmentKind::Area, "Generic"),
                seg(SegmentKind::Side, "lib"),
                seg(SegmentKind::PackageName, "gas"),
                seg(SegmentKind::PackageVersion, "5.1.0"),
                seg(SegmentKind::PackageFile, "gas.tar.gz"),
            ]
        );
    }

    #[test]
    fn test_version_with_dash() {
        let segments = decompose("5.5.5/Generic/lib/gas/5.1-alpha/gas.tar.gz").unwrap();
        assert_eq!(segments[4], seg(SegmentKind::PackageVersion, "5.1-alpha"));
    }

    #[test]
    fn test_repeated_separators_ignored() {
        assert_eq!(
            decompose("//5.5.5//Generic///lib/").unwrap(),
            decompose("5.5.5/Generic/lib").unwrap()
        );
    }

    // ========================================================================
    // Meta area
    // ========================================================================

    #[test]
    fn test_meta_lib_is_read_as_package_name() {
        // Meta skips the side level, so "lib" lands in the package name slot
        assert_eq!(
            decompose("5.5.5/Meta/lib").unwrap(),
            vec![
                seg(SegmentKind::ErtsVersion, "5.5.5"),
                seg(SegmentKind::Area, "Meta"),
                seg(SegmentKind::PackageName, "lib"),
            ]
        );
    }

    #[test]
    fn test_meta_full_depth() {
        assert_eq!(
            decompose("/5.5.5/Meta/faxien/1.0/faxien.rel").unwrap(),
            vec![
                seg(SegmentKind::ErtsVersion, "5.5.5"),
                seg(SegmentKind::Area, "Meta"),
                seg(SegmentKind::PackageName, "faxien"),
                seg(SegmentKind::PackageVersion, "1.0"),
                seg(SegmentKind::PackageFile, "faxien.rel"),
            ]
        );
    }

    #[test]
    fn test_meta_with_side_shifts_segments() {
        // "releases" becomes the package name and "faxien" the version,
        // leaving two tokens for the single file slot
        let err = decompose("5.5.5/Meta/releases/faxien/1.0/faxien.rel").unwrap_err();
        assert_eq!(err, SuffixError::BadPackage("1.0/faxien.rel".to_string()));
    }

    // ========================================================================
    // Rejections
    // ========================================================================

    #[test]
    fn test_bad_erts_vsn() {
        let err = decompose("5.5/Generic/lib/gas/5.1.0/gas.tar.z").unwrap_err();
        assert_eq!(err, SuffixError::BadErtsVsn("5.5".to_string()));
    }

    #[test]
    fn test_empty_suffix_is_bad_erts_vsn() {
        assert_eq!(decompose("").unwrap_err(), SuffixError::BadErtsVsn(String::new()));
        assert_eq!(decompose("///").unwrap_err(), SuffixError::BadErtsVsn(String::new()));
    }

    #[test]
    fn test_bad_side() {
        let err = decompose("5.5.5/Generic/bin/gas").unwrap_err();
        assert_eq!(err, SuffixError::BadSide("bin".to_string()));
    }

    #[test]
    fn test_bad_package_name() {
        let err = decompose("5.5.5/Generic/lib/Gas/5.1.0").unwrap_err();
        assert_eq!(err, SuffixError::BadPackageName("Gas".to_string()));
    }

    #[test]
    fn test_bad_package_vsn_trailing_character() {
        let err = decompose("5.5.5/Generic/lib/gas/5.1.0!/gas.tar.gz").unwrap_err();
        assert_eq!(err, SuffixError::BadPackageVsn("5.1.0!".to_string()));
    }

    #[test]
    fn test_bad_package_extension() {
        let err = decompose("5.5.5/Generic/lib/gas/5.1.0/gas.tar.z").unwrap_err();
        assert_eq!(err, SuffixError::BadPackage("gas.tar.z".to_string()));
    }

    #[test]
    fn test_excess_tokens_are_bad_package() {
        let err = decompose("5.5.5/Generic/lib/gas/5.1.0/gas.tar.gz/extra").unwrap_err();
        assert_eq!(
            err,
            SuffixError::BadPackage("gas.tar.gz/extra".to_string())
        );
    }

    #[test]
    fn test_file_depth_ends_parse() {
        let segments = decompose("/5.5.5/Meta/faxien/1.0/faxien.app").unwrap();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[4].kind, SegmentKind::PackageFile);

        let trailing = decompose("/5.5.5/Meta/faxien/1.0/faxien.app/").unwrap();
        assert_eq!(trailing, segments);

        let err = decompose("/5.5.5/Meta/faxien/1.0/faxien.app/faxien.app").unwrap_err();
        assert_eq!(
            err,
            SuffixError::BadPackage("faxien.app/faxien.app".to_string())
        );
    }

    #[test]
    fn test_erts_archive_is_not_a_side() {
        let err = decompose("/5.5.5/myos/erts.tar.gz").unwrap_err();
        assert_eq!(err, SuffixError::BadSide("erts.tar.gz".to_string()));
    }

    #[test]
    fn test_first_failure_wins() {
        // Both the side and the version are invalid; the side is reported
        let err = decompose("5.5.5/Generic/bin/gas/5.1.0!").unwrap_err();
        assert_eq!(err.tag(), "bad_side");
    }

    // ========================================================================
    // Custom grammar
    // ========================================================================

    #[test]
    fn test_custom_grammar_changes_file_acceptance() {
        let grammar = Grammar::with_package_extensions(["tar.z"]).unwrap();
        let parser = SuffixParser::new(&grammar);

        let segments = parser
            .decompose("5.5.5/Generic/lib/gas/5.1.0/gas.tar.z")
            .unwrap();
        assert_eq!(segments[5], seg(SegmentKind::PackageFile, "gas.tar.z"));

        assert!(parser
            .decompose("5.5.5/Generic/lib/gas/5.1.0/gas.tar.gz")
            .is_err());
    }
}
