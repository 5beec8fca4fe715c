use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Java language version, ordered by `(major, minor, patch)`.
///
/// Legacy `1.x` strings are folded into the modern scheme, so `1.8.0_292`
/// becomes `8.0.292`. Build metadata (`+8`) and pre-release tags (`-ea`) are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct JavaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl JavaVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn major(major: u32) -> Self {
        Self::new(major, 0, 0)
    }

    /// Parse a version string as reported by a JVM launcher.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::parse_components(raw).map(|(version, _)| version)
    }

    /// Returns the version together with the number of numeric components
    /// that were present after folding the legacy `1.` prefix.
    fn parse_components(raw: &str) -> Option<(Self, usize)> {
        let raw = raw.trim().trim_matches('"');
        let core = raw.split(['+', '-', ' ']).next()?;
        let mut parts = core.split(['.', '_']).map(str::parse::<u32>);

        let first = parts.next()?.ok()?;
        let rest: Vec<u32> = parts.map_while(Result::ok).collect();

        let numbers: Vec<u32> = if first == 1 && !rest.is_empty() {
            rest
        } else {
            std::iter::once(first).chain(rest).collect()
        };

        let version = Self::new(
            numbers[0],
            numbers.get(1).copied().unwrap_or(0),
            numbers.get(2).copied().unwrap_or(0),
        );
        Some((version, numbers.len()))
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<JavaVersion> for String {
    fn from(value: JavaVersion) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for JavaVersion {
    type Error = ConstraintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        JavaVersion::parse(&value).ok_or(ConstraintParseError::InvalidVersion(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintParseError {
    #[error("invalid Java version: {0:?}")]
    InvalidVersion(String),
    #[error("empty version constraint")]
    Empty,
}

/// Restriction on the language version of an installation.
///
/// Textual forms: `17` (any 17.x), `1.8` (any 8.x), `17.0` (any 17.0.x),
/// `17+` (17 or newer), `17.0.2` (exactly), `11..21` (11 inclusive up to 21
/// exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum VersionConstraint {
    Major(u32),
    MajorMinor(u32, u32),
    AtLeast(JavaVersion),
    Exact(JavaVersion),
    Between {
        min: JavaVersion,
        max_exclusive: JavaVersion,
    },
}

impl VersionConstraint {
    pub fn matches(&self, version: &JavaVersion) -> bool {
        match self {
            Self::Major(major) => version.major == *major,
            Self::MajorMinor(major, minor) => version.major == *major && version.minor == *minor,
            Self::AtLeast(min) => version >= min,
            Self::Exact(exact) => version == exact,
            Self::Between { min, max_exclusive } => version >= min && version < max_exclusive,
        }
    }

    /// False when no Java version could ever match.
    pub fn is_satisfiable(&self) -> bool {
        match self {
            Self::Between { min, max_exclusive } => min < max_exclusive,
            _ => true,
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = ConstraintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConstraintParseError::Empty);
        }

        let version = |raw: &str| {
            JavaVersion::parse(raw).ok_or_else(|| ConstraintParseError::InvalidVersion(raw.to_string()))
        };

        if let Some((min, max)) = s.split_once("..") {
            return Ok(Self::Between {
                min: version(min)?,
                max_exclusive: version(max)?,
            });
        }

        if let Some(min) = s.strip_suffix('+') {
            return Ok(Self::AtLeast(version(min)?));
        }

        let (parsed, components) = JavaVersion::parse_components(s)
            .ok_or_else(|| ConstraintParseError::InvalidVersion(s.to_string()))?;
        match components {
            1 => Ok(Self::Major(parsed.major)),
            2 => Ok(Self::MajorMinor(parsed.major, parsed.minor)),
            _ => Ok(Self::Exact(parsed)),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major(major) => write!(f, "{major}"),
            Self::MajorMinor(major, minor) => write!(f, "{major}.{minor}"),
            Self::AtLeast(min) => write!(f, "{min}+"),
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Between { min, max_exclusive } => write!(f, "{min}..{max_exclusive}"),
        }
    }
}

impl From<VersionConstraint> for String {
    fn from(value: VersionConstraint) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for VersionConstraint {
    type Error = ConstraintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modern_versions() {
        assert_eq!(JavaVersion::parse("17.0.2"), Some(JavaVersion::new(17, 0, 2)));
        assert_eq!(JavaVersion::parse("17.0.2+8"), Some(JavaVersion::new(17, 0, 2)));
        assert_eq!(JavaVersion::parse("21-ea"), Some(JavaVersion::major(21)));
        assert_eq!(JavaVersion::parse("11"), Some(JavaVersion::major(11)));
        assert_eq!(JavaVersion::parse("\"21.0.1\""), Some(JavaVersion::new(21, 0, 1)));
    }

    #[test]
    fn test_parse_legacy_versions() {
        assert_eq!(JavaVersion::parse("1.8.0_292"), Some(JavaVersion::new(8, 0, 292)));
        assert_eq!(JavaVersion::parse("1.7.0"), Some(JavaVersion::major(7)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(JavaVersion::parse(""), None);
        assert_eq!(JavaVersion::parse("openjdk"), None);
    }

    #[test]
    fn test_version_ordering() {
        let mut versions = vec![
            JavaVersion::new(17, 0, 2),
            JavaVersion::new(8, 0, 292),
            JavaVersion::new(17, 0, 10),
            JavaVersion::major(11),
        ];
        versions.sort();
        assert_eq!(
            versions,
            vec![
                JavaVersion::new(8, 0, 292),
                JavaVersion::major(11),
                JavaVersion::new(17, 0, 2),
                JavaVersion::new(17, 0, 10),
            ]
        );
    }

    #[test]
    fn test_constraint_forms() {
        assert_eq!("17".parse::<VersionConstraint>(), Ok(VersionConstraint::Major(17)));
        assert_eq!("1.8".parse::<VersionConstraint>(), Ok(VersionConstraint::Major(8)));
        assert_eq!(
            "17+".parse::<VersionConstraint>(),
            Ok(VersionConstraint::AtLeast(JavaVersion::major(17)))
        );
        assert_eq!(
            "17.0.2".parse::<VersionConstraint>(),
            Ok(VersionConstraint::Exact(JavaVersion::new(17, 0, 2)))
        );
        assert_eq!(
            "11..21".parse::<VersionConstraint>(),
            Ok(VersionConstraint::Between {
                min: JavaVersion::major(11),
                max_exclusive: JavaVersion::major(21),
            })
        );
        assert_eq!("".parse::<VersionConstraint>(), Err(ConstraintParseError::Empty));
        assert!("latest".parse::<VersionConstraint>().is_err());
    }

    #[test]
    fn test_constraint_matching() {
        let v17 = JavaVersion::new(17, 0, 2);
        assert!(VersionConstraint::Major(17).matches(&v17));
        assert!(!VersionConstraint::Major(11).matches(&v17));
        assert!(VersionConstraint::AtLeast(JavaVersion::major(11)).matches(&v17));
        assert!(!VersionConstraint::AtLeast(JavaVersion::major(21)).matches(&v17));

        let range: VersionConstraint = "11..17".parse().unwrap();
        assert!(range.matches(&JavaVersion::new(11, 0, 20)));
        assert!(!range.matches(&v17));
    }

    #[test]
    fn test_two_components_match_any_patch() {
        let constraint: VersionConstraint = "17.0".parse().unwrap();
        assert_eq!(constraint, VersionConstraint::MajorMinor(17, 0));
        assert!(constraint.matches(&JavaVersion::new(17, 0, 2)));
        assert!(constraint.matches(&JavaVersion::major(17)));
        assert!(!constraint.matches(&JavaVersion::new(17, 1, 0)));
        assert_eq!(constraint.to_string(), "17.0");

        assert_eq!(
            "1.8.0".parse::<VersionConstraint>(),
            Ok(VersionConstraint::MajorMinor(8, 0))
        );
    }

    #[test]
    fn test_unsatisfiable_range() {
        let range: VersionConstraint = "21..17".parse().unwrap();
        assert!(!range.is_satisfiable());
        assert!(VersionConstraint::Major(17).is_satisfiable());
    }

    #[test]
    fn test_serde_uses_text_form() {
        let json = serde_json::to_string(&JavaVersion::new(17, 0, 2)).unwrap();
        assert_eq!(json, "\"17.0.2\"");

        let constraint: VersionConstraint = serde_json::from_str("\"17+\"").unwrap();
        assert_eq!(constraint, VersionConstraint::AtLeast(JavaVersion::major(17)));
    }
}
