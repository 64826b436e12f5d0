//! Segment kinds and typed suffix components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SuffixError;

/// Area value that removes the side segment from the grammar.
pub const META_AREA: &str = "Meta";

/// Area value for architecture-independent packages.
pub const GENERIC_AREA: &str = "Generic";

/// Kind of a suffix segment, in the fixed order segments appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Runtime version, e.g. `5.5.5`.
    ErtsVersion,
    /// Deployment area: an architecture name, `Generic`, or `Meta`.
    Area,
    /// Distribution side: `lib` or `releases`.
    Side,
    /// Package identifier.
    PackageName,
    /// Package version.
    PackageVersion,
    /// Terminal artifact file name.
    PackageFile,
}

impl SegmentKind {
    /// Every kind, in positional order.
    pub const ALL: [SegmentKind; 6] = [
        SegmentKind::ErtsVersion,
        SegmentKind::Area,
        SegmentKind::Side,
        SegmentKind::PackageName,
        SegmentKind::PackageVersion,
        SegmentKind::PackageFile,
    ];

    /// Short snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::ErtsVersion => "erts_version",
            SegmentKind::Area => "area",
            SegmentKind::Side => "side",
            SegmentKind::PackageName => "package_name",
            SegmentKind::PackageVersion => "package_vsn",
            SegmentKind::PackageFile => "package_file",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One typed, validated token of a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// What the token represents.
    pub kind: SegmentKind,
    /// The token text, exactly as it appeared.
    pub text: String,
}

impl Segment {
    /// Create a segment.
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.text)
    }
}

/// Distribution side within an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Library packages.
    Lib,
    /// Release descriptors.
    Releases,
}

impl Side {
    /// The path token for this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Lib => "lib",
            Side::Releases => "releases",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = SuffixError;

    /// Accepts exactly `lib` or `releases`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lib" => Ok(Side::Lib),
            "releases" => Ok(Side::Releases),
            other => Err(SuffixError::BadSide(other.to_string())),
        }
    }
}

/// Typed view over a decomposed suffix.
///
/// Only `erts_version` is mandatory; deeper fields are `None` when the
/// suffix stops at a directory level. For the `Meta` area `side` is always
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixComponents {
    pub erts_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_vsn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_file: Option<String>,
}

impl SuffixComponents {
    /// Collect components from a segment list produced by the parser.
    ///
    /// Returns `None` unless the list is in positional order with no
    /// duplicates or gaps: it starts with an erts version, and under the
    /// `Meta` area has no side segment.
    pub fn from_segments(segments: &[Segment]) -> Option<Self> {
        let (first, rest) = segments.split_first()?;
        if first.kind != SegmentKind::ErtsVersion {
            return None;
        }

        let mut components = SuffixComponents {
            erts_version: first.text.clone(),
            ..Default::default()
        };

        let mut previous = SegmentKind::ErtsVersion;
        for segment in rest {
            if Some(segment.kind) != next_kind(previous, components.is_meta()) {
                return None;
            }
            let text = Some(segment.text.clone());
            match segment.kind {
                SegmentKind::ErtsVersion => return None,
                SegmentKind::Area => components.area = text,
                SegmentKind::Side => components.side = Some(segment.text.parse().ok()?),
                SegmentKind::PackageName => components.package_name = text,
                SegmentKind::PackageVersion => components.package_vsn = text,
                SegmentKind::PackageFile => components.package_file = text,
            }
            previous = segment.kind;
        }

        Some(components)
    }

    /// Flatten back into the ordered segment list.
    ///
    /// Matches what decomposing [`compose`](super::compose) output yields:
    /// the side is skipped under `Meta`, and flattening stops at the first
    /// missing component.
    pub fn to_segments(&self) -> Vec<Segment> {
        let mut segments = vec![Segment::new(
            SegmentKind::ErtsVersion,
            self.erts_version.as_str(),
        )];
        let fields = [
            (SegmentKind::Area, self.area.clone()),
            (SegmentKind::Side, self.side.map(|s| s.as_str().to_string())),
            (SegmentKind::PackageName, self.package_name.clone()),
            (SegmentKind::PackageVersion, self.package_vsn.clone()),
            (SegmentKind::PackageFile, self.package_file.clone()),
        ];
        for (kind, value) in fields {
            if kind == SegmentKind::Side && self.is_meta() {
                continue;
            }
            match value {
                Some(text) => segments.push(Segment::new(kind, text)),
                None => break,
            }
        }
        segments
    }

    /// Whether the area is the metadata area.
    pub fn is_meta(&self) -> bool {
        self.area.as_deref() == Some(META_AREA)
    }
}

/// Kind that must follow `previous`; the `Meta` area has no side level.
fn next_kind(previous: SegmentKind, meta: bool) -> Option<SegmentKind> {
    match previous {
        SegmentKind::ErtsVersion => Some(SegmentKind::Area),
        SegmentKind::Area if meta => Some(SegmentKind::PackageName),
        SegmentKind::Area => Some(SegmentKind::Side),
        SegmentKind::Side => Some(SegmentKind::PackageName),
        SegmentKind::PackageName => Some(SegmentKind::PackageVersion),
        SegmentKind::PackageVersion => Some(SegmentKind::PackageFile),
        SegmentKind::PackageFile => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_is_positional() {
        let mut sorted = SegmentKind::ALL;
        sorted.sort();
        assert_eq!(sorted, SegmentKind::ALL);
        assert!(SegmentKind::ErtsVersion < SegmentKind::PackageFile);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SegmentKind::ErtsVersion.to_string(), "erts_version");
        assert_eq!(SegmentKind::PackageVersion.to_string(), "package_vsn");
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("lib".parse::<Side>().unwrap(), Side::Lib);
        assert_eq!("releases".parse::<Side>().unwrap(), Side::Releases);
        assert_eq!(
            "Lib".parse::<Side>(),
            Err(SuffixError::BadSide("Lib".to_string()))
        );
        assert!("release".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Lib.to_string(), "lib");
        assert_eq!(Side::Releases.to_string(), "releases");
    }

    #[test]
    fn test_components_from_segments() {
        let segments = vec![
            Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
            Segment::new(SegmentKind::Area, "Generic"),
            Segment::new(SegmentKind::Side, "lib"),
            Segment::new(SegmentKind::PackageName, "gas"),
        ];
        let components = SuffixComponents::from_segments(&segments).unwrap();
        assert_eq!(components.erts_version, "5.5.5");
        assert_eq!(components.area.as_deref(), Some("Generic"));
        assert_eq!(components.side, Some(Side::Lib));
        assert_eq!(components.package_name.as_deref(), Some("gas"));
        assert_eq!(components.package_vsn, None);
        assert_eq!(components.to_segments(), segments);
    }

    #[test]
    fn test_components_require_leading_erts_version() {
        assert!(SuffixComponents::from_segments(&[]).is_none());
        let segments = vec![Segment::new(SegmentKind::Area, "Generic")];
        assert!(SuffixComponents::from_segments(&segments).is_none());
    }

    #[test]
    fn test_components_meta() {
        let components = SuffixComponents {
            erts_version: "5.5.5".into(),
            area: Some(META_AREA.into()),
            ..Default::default()
        };
        assert!(components.is_meta());
        assert_eq!(components.to_segments().len(), 2);
    }

    #[test]
    fn test_components_meta_skips_side() {
        let components = SuffixComponents {
            erts_version: "5.5.5".into(),
            area: Some(META_AREA.into()),
            side: Some(Side::Lib),
            package_name: Some("gas".into()),
            ..Default::default()
        };
        assert_eq!(
            components.to_segments(),
            vec![
                Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
                Segment::new(SegmentKind::Area, "Meta"),
                Segment::new(SegmentKind::PackageName, "gas"),
            ]
        );
    }

    #[test]
    fn test_components_to_segments_stops_at_gap() {
        let components = SuffixComponents {
            erts_version: "5.5.5".into(),
            area: Some("Generic".into()),
            package_name: Some("gas".into()),
            ..Default::default()
        };
        assert_eq!(components.to_segments().len(), 2);
    }

    #[test]
    fn test_components_reject_disordered_segments() {
        let segments = vec![
            Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
            Segment::new(SegmentKind::PackageName, "gas"),
            Segment::new(SegmentKind::Area, "Generic"),
        ];
        assert!(SuffixComponents::from_segments(&segments).is_none());
    }

    #[test]
    fn test_components_reject_duplicated_segments() {
        let segments = vec![
            Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
            Segment::new(SegmentKind::Area, "Generic"),
            Segment::new(SegmentKind::Area, "Meta"),
        ];
        assert!(SuffixComponents::from_segments(&segments).is_none());
    }

    #[test]
    fn test_components_reject_gap_outside_meta() {
        let segments = vec![
            Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
            Segment::new(SegmentKind::Area, "Generic"),
            Segment::new(SegmentKind::PackageName, "gas"),
        ];
        assert!(SuffixComponents::from_segments(&segments).is_none());
    }

    #[test]
    fn test_components_reject_side_under_meta() {
        let segments = vec![
            Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
            Segment::new(SegmentKind::Area, "Meta"),
            Segment::new(SegmentKind::Side, "lib"),
        ];
        assert!(SuffixComponents::from_segments(&segments).is_none());

        let meta = vec![
            Segment::new(SegmentKind::ErtsVersion, "5.5.5"),
            Segment::new(SegmentKind::Area, "Meta"),
            Segment::new(SegmentKind::PackageName, "gas"),
        ];
        let components = SuffixComponents::from_segments(&meta).unwrap();
        assert_eq!(components.to_segments(), meta);
    }

    #[test]
    fn test_components_serialize_skips_missing() {
        let components = SuffixComponents {
            erts_version: "5.5.5".into(),
            area: Some("Generic".into()),
            side: Some(Side::Releases),
            ..Default::default()
        };
        let json = serde_json::to_string(&components).unwrap();
        assert_eq!(
            json,
            r#"{"erts_version":"5.5.5","area":"Generic","side":"releases"}"#
        );
    }
}
