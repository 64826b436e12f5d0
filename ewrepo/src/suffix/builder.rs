//! Suffix composition from typed components.
//!
//! Each function builds the suffix for one repository depth and delegates
//! to the shallower one. Components are assumed to be valid already; the
//! builder is only responsible for positional joining and the `Meta` area
//! special case.
//!
//! # Format
//!
//! ```text
//! /<ErtsVersion>/<Area>[/<Side>]/<PackageName>/<PackageVersion>/<PackageName>.tar.gz
//! ```

use super::segment::{Side, SuffixComponents, META_AREA};

/// Path separator used in suffixes.
pub const SEPARATOR: char = '/';

/// File name of the runtime archive within an area.
pub const ERTS_PACKAGE_FILE: &str = "erts.tar.gz";

/// Extension of package archives.
pub const PACKAGE_ARCHIVE_EXT: &str = "tar.gz";

/// Extension of application descriptor files.
pub const DOT_APP_EXT: &str = "app";

/// Extension of release descriptor files.
pub const DOT_REL_EXT: &str = "rel";

/// Join two suffix parts with exactly one separator between them.
///
/// `part` must not be empty; callers pass single path tokens.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::join;
///
/// assert_eq!(join("/5.5.5", "Generic"), "/5.5.5/Generic");
/// assert_eq!(join("/5.5.5/", "/Generic"), "/5.5.5/Generic");
/// ```
pub fn join(base: &str, part: &str) -> String {
    debug_assert!(!part.is_empty(), "empty suffix part joined onto '{}'", base);
    format!(
        "{}{}{}",
        base.trim_end_matches(SEPARATOR),
        SEPARATOR,
        part.trim_start_matches(SEPARATOR)
    )
}

/// Suffix of a runtime version directory.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::erts_suffix;
///
/// assert_eq!(erts_suffix("5.5.5"), "/5.5.5");
/// ```
pub fn erts_suffix(erts_vsn: &str) -> String {
    join("", erts_vsn)
}

/// Suffix of an area directory.
pub fn area_suffix(erts_vsn: &str, area: &str) -> String {
    join(&erts_suffix(erts_vsn), area)
}

/// Suffix of a side directory.
///
/// The `Meta` area has no side level, so the side is dropped there.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::{side_suffix, Side};
///
/// assert_eq!(side_suffix("5.5.5", "Generic", Side::Lib), "/5.5.5/Generic/lib");
/// assert_eq!(side_suffix("5.5.5", "Meta", Side::Lib), "/5.5.5/Meta");
/// ```
pub fn side_suffix(erts_vsn: &str, area: &str, side: Side) -> String {
    let base = area_suffix(erts_vsn, area);
    if area == META_AREA {
        base
    } else {
        join(&base, side.as_str())
    }
}

/// Suffix of a package name directory.
pub fn package_name_suffix(erts_vsn: &str, area: &str, side: Side, package_name: &str) -> String {
    join(&side_suffix(erts_vsn, area, side), package_name)
}

/// Suffix of a package version directory.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::{package_vsn_suffix, Side};
///
/// assert_eq!(
///     package_vsn_suffix("5.5.5", "Generic", Side::Lib, "mnesia", "1.0"),
///     "/5.5.5/Generic/lib/mnesia/1.0"
/// );
/// ```
pub fn package_vsn_suffix(
    erts_vsn: &str,
    area: &str,
    side: Side,
    package_name: &str,
    package_vsn: &str,
) -> String {
    join(
        &package_name_suffix(erts_vsn, area, side, package_name),
        package_vsn,
    )
}

/// Suffix of a package archive, `<name>.tar.gz`.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::{package_suffix, Side};
///
/// assert_eq!(
///     package_suffix("5.5.5", "Generic", Side::Lib, "gas", "5.1.0"),
///     "/5.5.5/Generic/lib/gas/5.1.0/gas.tar.gz"
/// );
/// ```
pub fn package_suffix(
    erts_vsn: &str,
    area: &str,
    side: Side,
    package_name: &str,
    package_vsn: &str,
) -> String {
    join(
        &package_vsn_suffix(erts_vsn, area, side, package_name, package_vsn),
        &file_name(package_name, PACKAGE_ARCHIVE_EXT),
    )
}

/// Suffix of the runtime archive for an area.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::erts_package_suffix;
///
/// assert_eq!(erts_package_suffix("5.5.5", "myos"), "/5.5.5/myos/erts.tar.gz");
/// ```
pub fn erts_package_suffix(erts_vsn: &str, area: &str) -> String {
    join(&area_suffix(erts_vsn, area), ERTS_PACKAGE_FILE)
}

/// Suffix of an application descriptor, stored in the `Meta` area.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::dot_app_file_suffix;
///
/// assert_eq!(
///     dot_app_file_suffix("5.5.5", "faxien", "1.0"),
///     "/5.5.5/Meta/faxien/1.0/faxien.app"
/// );
/// ```
pub fn dot_app_file_suffix(erts_vsn: &str, app_name: &str, app_vsn: &str) -> String {
    join(
        &package_vsn_suffix(erts_vsn, META_AREA, Side::Lib, app_name, app_vsn),
        &file_name(app_name, DOT_APP_EXT),
    )
}

/// Suffix of a release descriptor, stored in the `Meta` area.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::dot_rel_file_suffix;
///
/// assert_eq!(
///     dot_rel_file_suffix("5.5.5", "faxien", "1.0"),
///     "/5.5.5/Meta/faxien/1.0/faxien.rel"
/// );
/// ```
pub fn dot_rel_file_suffix(erts_vsn: &str, release_name: &str, release_vsn: &str) -> String {
    join(
        &package_vsn_suffix(
            erts_vsn,
            META_AREA,
            Side::Releases,
            release_name,
            release_vsn,
        ),
        &file_name(release_name, DOT_REL_EXT),
    )
}

/// Compose the suffix for components of any depth.
///
/// This is the inverse of decomposition: fields are emitted in positional
/// order up to the first missing one, and a side given for the `Meta` area
/// is dropped. A missing side outside `Meta` stops composition at the area
/// level.
///
/// # Examples
///
/// ```
/// use ewrepo::suffix::{compose, Side, SuffixComponents};
///
/// let components = SuffixComponents {
///     erts_version: "5.5.5".into(),
///     area: Some("Generic".into()),
///     side: Some(Side::Lib),
///     package_name: Some("gas".into()),
///     ..Default::default()
/// };
/// assert_eq!(compose(&components), "/5.5.5/Generic/lib/gas");
/// ```
pub fn compose(components: &SuffixComponents) -> String {
    let mut suffix = erts_suffix(&components.erts_version);

    let Some(area) = components.area.as_deref() else {
        return suffix;
    };
    suffix = join(&suffix, area);

    if area != META_AREA {
        let Some(side) = components.side else {
            return suffix;
        };
        suffix = join(&suffix, side.as_str());
    }

    let deeper = [
        components.package_name.as_deref(),
        components.package_vsn.as_deref(),
        components.package_file.as_deref(),
    ];
    for part in deeper {
        match part {
            Some(text) => suffix = join(&suffix, text),
            None => break,
        }
    }
    suffix
}

fn file_name(stem: &str, ext: &str) -> String {
    format!("{}.{}", stem, ext)
}
