//! Repository suffix grammar engine.
//!
//! A suffix locates an artifact inside a package repository, relative to the
//! repository root. This module composes suffixes from typed components and
//! decomposes arbitrary suffix strings back into typed segments.
//!
//! # Format
//!
//! ```text
//! /<ErtsVersion>/<Area>[/<Side>]/<PackageName>/<PackageVersion>/<PackageName>.tar.gz
//! /<ErtsVersion>/Meta/<AppName>/<AppVsn>/<AppName>.app
//! /<ErtsVersion>/Meta/<ReleaseName>/<ReleaseVsn>/<ReleaseName>.rel
//! /<ErtsVersion>/<Area>/erts.tar.gz
//! ```
//!
//! The `Meta` area has no side level. Any prefix of the general pattern is a
//! valid directory-level suffix.
//!
//! # Components
//!
//! - **Grammar**: whole-token rules per [`SegmentKind`] plus the transition table
//! - **Builder**: [`erts_suffix`] through [`package_suffix`], the fixed forms,
//!   and [`compose`]
//! - **Parser**: [`SuffixParser`] and [`decompose`]
//!
//! # Example
//!
//! ```
//! use ewrepo::suffix::{decompose, package_suffix, Side, SuffixComponents};
//!
//! let suffix = package_suffix("5.5.5", "Generic", Side::Lib, "gas", "5.1.0");
//! let segments = decompose(&suffix).unwrap();
//! let components = SuffixComponents::from_segments(&segments).unwrap();
//!
//! assert_eq!(components.package_name.as_deref(), Some("gas"));
//! assert_eq!(components.package_file.as_deref(), Some("gas.tar.gz"));
//! ```

mod builder;
mod error;
mod grammar;
mod parser;
mod segment;

// Data model
pub use segment::{Segment, SegmentKind, Side, SuffixComponents, GENERIC_AREA, META_AREA};

// Grammar
pub use grammar::{Grammar, ParseState, DEFAULT_PACKAGE_EXTENSIONS};

// Composition
pub use builder::{
    area_suffix, compose, dot_app_file_suffix, dot_rel_file_suffix, erts_package_suffix,
    erts_suffix, join, package_name_suffix, package_suffix, package_vsn_suffix, side_suffix,
    DOT_APP_EXT, DOT_REL_EXT, ERTS_PACKAGE_FILE, PACKAGE_ARCHIVE_EXT, SEPARATOR,
};

// Decomposition
pub use error::{GrammarError, SuffixError, SuffixResult};
pub use parser::{decompose, SuffixParser};
