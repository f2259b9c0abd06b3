//! Engine release versions such as `2021.3.21f1`

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use typetree_error::TypeTreeError;

/// Release stream letter of an engine version.
///
/// Declaration order is the sort order within one `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseKind {
    Experimental,
    Alpha,
    Beta,
    Final,
    China,
    Patch,
}

impl ReleaseKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Self::Experimental),
            'a' => Some(Self::Alpha),
            'b' => Some(Self::Beta),
            'f' => Some(Self::Final),
            'c' => Some(Self::China),
            'p' => Some(Self::Patch),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Experimental => 'x',
            Self::Alpha => 'a',
            Self::Beta => 'b',
            Self::Final => 'f',
            Self::China => 'c',
            Self::Patch => 'p',
        }
    }
}

/// A target engine version.
///
/// Missing components parse as zero and a missing release letter as a final
/// release, so `2021.3` reads as `2021.3.0f0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub kind: ReleaseKind,
    pub build: u32,
}

impl EngineVersion {
    pub const fn new(major: u32, minor: u32, patch: u32, kind: ReleaseKind, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            kind,
            build,
        }
    }

    fn sort_key(&self) -> (u32, u32, u32, ReleaseKind, u32) {
        (self.major, self.minor, self.patch, self.kind, self.build)
    }
}

impl Ord for EngineVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for EngineVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}{}",
            self.major,
            self.minor,
            self.patch,
            self.kind.as_char(),
            self.build
        )
    }
}

impl FromStr for EngineVersion {
    type Err = TypeTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeTreeError::config_invalid_value(format!("invalid engine version '{s}'"));
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut parts = trimmed.splitn(3, '.');
        let major = parse_number(parts.next().ok_or_else(invalid)?).ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(part) => parse_number(part).ok_or_else(invalid)?,
            None => 0,
        };

        let (patch, kind, build) = match parts.next() {
            None => (0, ReleaseKind::Final, 0),
            Some(tail) => {
                let split = tail
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(tail.len());
                let patch = parse_number(&tail[..split]).ok_or_else(invalid)?;
                let rest = &tail[split..];
                let mut chars = rest.chars();
                match chars.next() {
                    None => (patch, ReleaseKind::Final, 0),
                    Some(letter) => {
                        let kind = ReleaseKind::from_char(letter).ok_or_else(invalid)?;
                        let build_str = chars.as_str();
                        let build = if build_str.is_empty() {
                            0
                        } else {
                            parse_number(build_str).ok_or_else(invalid)?
                        };
                        (patch, kind, build)
                    }
                }
            }
        };

        Ok(Self::new(major, minor, patch, kind, build))
    }
}

fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl TryFrom<String> for EngineVersion {
    type Error = TypeTreeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EngineVersion> for String {
    fn from(version: EngineVersion) -> Self {
        version.to_string()
    }
}
