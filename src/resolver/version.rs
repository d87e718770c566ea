//! Mod version parsing and ordering
//!
//! Versions are compared with semantic version precedence. Mod versions are
//! often written with fewer than three components (`1.2`), so purely numeric
//! cores are padded with zeros before parsing. Anything that still fails to
//! parse is kept as its raw string and never ordered against real versions.

use std::cmp::Ordering;
use std::fmt;

use semver::Version;

/// A version as read from a mod descriptor
#[derive(Debug, Clone)]
pub enum ParsedVersion {
    /// The descriptor had no version
    Missing,
    /// A version string that is not a semantic version
    Unparseable(String),
    /// A semantic version
    Semantic(Version),
}

impl ParsedVersion {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => ParsedVersion::Missing,
            Some(raw) => match parse_lenient(raw) {
                Some(version) => ParsedVersion::Semantic(version),
                None => ParsedVersion::Unparseable(raw.to_string()),
            },
        }
    }

    pub fn semantic(&self) -> Option<&Version> {
        match self {
            ParsedVersion::Semantic(version) => Some(version),
            _ => None,
        }
    }

    /// Grouping key used to order versions
    pub fn key(&self) -> VersionKey {
        match self {
            ParsedVersion::Missing => VersionKey::Unversioned(None),
            ParsedVersion::Unparseable(raw) => VersionKey::Unversioned(Some(raw.clone())),
            ParsedVersion::Semantic(version) => VersionKey::Semantic(version.clone()),
        }
    }
}

/// Ordering key for version groups.
///
/// Missing and unparseable versions sort before every semantic version and
/// are only ever equal to the same raw string. Semantic versions compare by
/// precedence, ignoring build metadata.
#[derive(Debug, Clone)]
pub enum VersionKey {
    Unversioned(Option<String>),
    Semantic(Version),
}

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionKey {}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (VersionKey::Unversioned(a), VersionKey::Unversioned(b)) => a.cmp(b),
            (VersionKey::Unversioned(_), VersionKey::Semantic(_)) => Ordering::Less,
            (VersionKey::Semantic(_), VersionKey::Unversioned(_)) => Ordering::Greater,
            (VersionKey::Semantic(a), VersionKey::Semantic(b)) => a.cmp_precedence(b),
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKey::Unversioned(None) => write!(f, "no version"),
            VersionKey::Unversioned(Some(raw)) => write!(f, "{raw}"),
            VersionKey::Semantic(version) => write!(f, "{version}"),
        }
    }
}

/// Parse a version, padding a numeric core of one or two components
fn parse_lenient(raw: &str) -> Option<Version> {
    if let Ok(version) = Version::parse(raw) {
        return Some(version);
    }
    let split = raw.find(['-', '+']).unwrap_or(raw.len());
    let (core, rest) = raw.split_at(split);
    let parts: Vec<&str> = core.split('.').collect();
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if !numeric || parts.len() >= 3 {
        return None;
    }
    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(rest);
    Version::parse(&padded).ok()
}
