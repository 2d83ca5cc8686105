//! Parsing of loosely structured version strings.
//!
//! Accepted shape: `[prefix-]major[.minor][.maintenance][.build][-suffix[N]]`,
//! for example `1.0`, `com-1`, `prev-1.0.0-rc1` or `prev-1.0.0.7-final`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::comparator;
use crate::component::Component;
use crate::config::with_global_config;
use crate::delta::VersionDelta;
use crate::error::{FlexVersionError, Result};

// A minor component is preferred so that `1.0.0-1` keeps `1` as a suffix
// version instead of reading `1.0.0` as a prefix.
static DOTTED_VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>.*-)?(?P<major>[0-9]+)\.(?P<minor>[0-9]+)(?:\.(?P<maintenance>[0-9]+))?(?:\.(?P<build>[0-9]+))?(?P<suffix_raw>-.*)?",
    )
    .expect("Invalid regex")
});

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<prefix>.*-)?(?P<major>[0-9]+)(?:\.(?P<minor>[0-9]+))?(?:\.(?P<maintenance>[0-9]+))?(?:\.(?P<build>[0-9]+))?(?P<suffix_raw>-.*)?",
    )
    .expect("Invalid regex")
});

static SUFFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<suffix>[^0-9]*)(?P<version>[0-9]+)?").expect("Invalid regex")
});

const TRIM_CHARS: &[char] = &[' ', '\r', '\n', '-', '.'];

/// Structured form of a version string.
///
/// Numeric components other than `major` are optional, and an absent
/// component is kept distinct from an explicit `0`.
///
/// # Examples
///
/// ```
/// use flex_version::VersionMeta;
///
/// let v = VersionMeta::parse("prev-1.0.0-rc1").unwrap();
/// assert_eq!(v.prefix(), Some("prev"));
/// assert_eq!(v.major(), 1);
/// assert_eq!(v.build(), None);
/// assert_eq!(v.suffix(), Some("rc"));
/// assert_eq!(v.suffix_version(), Some(1));
/// ```
///
/// Serialized field by field, since the rendering of a value with a gap
/// (say a build but no maintenance component) parses back differently.
/// Deserialization also accepts a plain version string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VersionWire")]
pub struct VersionMeta {
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    major: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    minor: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintenance: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix_version: Option<u64>,
}

impl VersionMeta {
    pub fn parse(version: &str) -> Result<Self> {
        if version.is_empty() {
            return Err(parse_error(version, "empty version string"));
        }

        let captures = DOTTED_VERSION_PATTERN
            .captures(version)
            .or_else(|| VERSION_PATTERN.captures(version))
            .ok_or_else(|| {
                tracing::debug!("no major version found in '{}'", version);
                parse_error(version, "missing major version")
            })?;

        let major = parse_number(version, &captures, "major", Component::Major)?
            .ok_or_else(|| parse_error(version, "missing major version"))?;

        let mut meta = Self {
            raw: version.to_string(),
            prefix: trimmed(&captures, "prefix"),
            major,
            minor: parse_number(version, &captures, "minor", Component::Minor)?,
            maintenance: parse_number(version, &captures, "maintenance", Component::Maintenance)?,
            build: parse_number(version, &captures, "build", Component::Build)?,
            suffix: None,
            suffix_version: None,
        };

        if let Some(suffix_raw) = trimmed(&captures, "suffix_raw").filter(|s| !s.is_empty())
            && let Some(suffix_captures) = SUFFIX_PATTERN.captures(&suffix_raw)
        {
            meta.suffix = trimmed(&suffix_captures, "suffix");
            meta.suffix_version = parse_number(
                version,
                &suffix_captures,
                "version",
                Component::SuffixVersion,
            )?;
        }

        tracing::trace!("parsed version '{}' as {:?}", version, meta);
        Ok(meta)
    }

    /// The input this value was parsed from, or the canonical rendering of a
    /// value produced by delta application.
    pub fn raw_str(&self) -> &str {
        &self.raw
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub const fn major(&self) -> u64 {
        self.major
    }

    pub const fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub const fn maintenance(&self) -> Option<u64> {
        self.maintenance
    }

    pub const fn build(&self) -> Option<u64> {
        self.build
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub const fn suffix_version(&self) -> Option<u64> {
        self.suffix_version
    }

    pub const fn get(&self, component: Component) -> Option<u64> {
        match component {
            Component::Major => Some(self.major),
            Component::Minor => self.minor,
            Component::Maintenance => self.maintenance,
            Component::Build => self.build,
            Component::SuffixVersion => self.suffix_version,
        }
    }

    pub fn shares_prefix(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }

    pub fn shares_suffix(&self, other: &Self) -> bool {
        self.suffix == other.suffix
    }

    /// Field-wise difference `self - other`.
    ///
    /// A component absent on either side is absent in the result. With
    /// `ignore_suffix` the suffix labels may differ and the suffix version
    /// is left out of the delta.
    pub fn subtract(
        &self,
        other: &Self,
        ignore_prefix: bool,
        ignore_suffix: bool,
    ) -> Result<VersionDelta> {
        if !ignore_prefix && !self.shares_prefix(other) {
            return Err(FlexVersionError::PrefixMismatch {
                left: self.prefix.clone(),
                right: other.prefix.clone(),
            });
        }

        if !ignore_suffix && !self.shares_suffix(other) {
            return Err(FlexVersionError::SuffixMismatch {
                left: self.suffix.clone(),
                right: other.suffix.clone(),
            });
        }

        let suffix_version = if ignore_suffix {
            None
        } else {
            difference(self.suffix_version, other.suffix_version)
        };

        Ok(VersionDelta::new(
            difference(Some(self.major), Some(other.major)),
            difference(self.minor, other.minor),
            difference(self.maintenance, other.maintenance),
            difference(self.build, other.build),
            suffix_version,
        ))
    }

    /// Applies `delta`, returning a new version.
    ///
    /// An absent component takes the delta value; an absent delta field leaves
    /// the component unchanged. When the result carries a suffix version,
    /// `suffix` replaces the suffix label, and one of the two must exist.
    pub fn add(&self, delta: VersionDelta, suffix: Option<&str>) -> Result<Self> {
        let mut result = self.clone();
        result.major = apply(Some(self.major), delta.major(), Component::Major)?.unwrap_or(self.major);
        result.minor = apply(self.minor, delta.minor(), Component::Minor)?;
        result.maintenance = apply(self.maintenance, delta.maintenance(), Component::Maintenance)?;
        result.build = apply(self.build, delta.build(), Component::Build)?;
        result.suffix_version = apply(
            self.suffix_version,
            delta.suffix_version(),
            Component::SuffixVersion,
        )?;

        if result.suffix_version.is_some() {
            match suffix {
                Some(label) => result.suffix = Some(label.to_string()),
                None if result.suffix.is_none() => {
                    return Err(FlexVersionError::MissingSuffix {
                        version: self.to_string(),
                    });
                }
                None => {}
            }
        }

        result.raw = result.to_string();
        Ok(result)
    }

    /// Applies the negation of `delta`.
    pub fn sub_delta(&self, delta: VersionDelta, suffix: Option<&str>) -> Result<Self> {
        self.add(-delta, suffix)
    }

    /// Orders `self` against `other` under the process-wide configuration.
    pub fn compares(&self, other: &Self, ignore_suffix: bool) -> Result<Ordering> {
        with_global_config(|config| comparator::compare_meta(config, self, other, ignore_suffix))
    }

    /// Checks `min <= self <= max` under the process-wide configuration.
    pub fn in_range(&self, min: &Self, max: &Self, ignore_suffix: bool) -> Result<bool> {
        with_global_config(|config| comparator::range_contains(config, self, min, max, ignore_suffix))
    }
}

fn parse_error(version: &str, message: &str) -> FlexVersionError {
    FlexVersionError::ParseError {
        version: version.to_string(),
        message: message.to_string(),
    }
}

fn trimmed(captures: &Captures<'_>, name: &str) -> Option<String> {
    captures
        .name(name)
        .map(|m| m.as_str().trim_matches(TRIM_CHARS).to_string())
}

fn parse_number(
    version: &str,
    captures: &Captures<'_>,
    name: &str,
    component: Component,
) -> Result<Option<u64>> {
    let Some(text) = trimmed(captures, name) else {
        return Ok(None);
    };

    text.parse::<u64>()
        .ok()
        .filter(|n| i64::try_from(*n).is_ok())
        .map(Some)
        .ok_or_else(|| parse_error(version, &format!("{component} component out of range")))
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn difference(a: Option<u64>, b: Option<u64>) -> Option<i64> {
    Some(signed(a?).saturating_sub(signed(b?)))
}

fn apply(value: Option<u64>, delta: Option<i64>, component: Component) -> Result<Option<u64>> {
    let sum = match (value, delta) {
        (None, None) => return Ok(None),
        (Some(value), None) => return Ok(Some(value)),
        (None, Some(delta)) => delta,
        (Some(value), Some(delta)) => signed(value)
            .checked_add(delta)
            .ok_or(FlexVersionError::ComponentOverflow { component })?,
    };

    u64::try_from(sum)
        .map(Some)
        .map_err(|_| FlexVersionError::NegativeResult {
            component,
            value: sum,
        })
}

impl fmt::Display for VersionMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix.as_deref().filter(|p| !p.is_empty()) {
            write!(f, "{prefix}-")?;
        }
        write!(f, "{}", self.major)?;
        for value in [self.minor, self.maintenance, self.build].into_iter().flatten() {
            write!(f, ".{value}")?;
        }
        match (self.suffix.as_deref(), self.suffix_version) {
            (suffix, Some(n)) => write!(f, "-{}{n}", suffix.unwrap_or_default()),
            (Some(suffix), None) if !suffix.is_empty() => write!(f, "-{suffix}"),
            _ => Ok(()),
        }
    }
}

impl FromStr for VersionMeta {
    type Err = FlexVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for VersionMeta {
    type Error = FlexVersionError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for VersionMeta {
    type Error = FlexVersionError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

/// Equal when [`VersionMeta::compares`] reports equality; incomparable
/// versions are never equal.
///
/// Not reflexive: under a suffix order that leaves out a version's suffix,
/// that version does not even equal itself. Use [`VersionMeta::compares`] to
/// tell the failure apart.
impl PartialEq for VersionMeta {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compares(other, false), Ok(Ordering::Equal))
    }
}

impl PartialOrd for VersionMeta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compares(other, false).ok()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VersionWire {
    Text(String),
    Fields {
        raw: Option<String>,
        prefix: Option<String>,
        major: u64,
        minor: Option<u64>,
        maintenance: Option<u64>,
        build: Option<u64>,
        suffix: Option<String>,
        suffix_version: Option<u64>,
    },
}

impl TryFrom<VersionWire> for VersionMeta {
    type Error = FlexVersionError;

    fn try_from(wire: VersionWire) -> Result<Self> {
        let (raw, mut meta) = match wire {
            VersionWire::Text(raw) => return Self::parse(&raw),
            VersionWire::Fields {
                raw,
                prefix,
                major,
                minor,
                maintenance,
                build,
                suffix,
                suffix_version,
            } => (
                raw,
                Self {
                    raw: String::new(),
                    prefix,
                    major,
                    minor,
                    maintenance,
                    build,
                    suffix,
                    suffix_version,
                },
            ),
        };
        meta.raw = raw.unwrap_or_else(|| meta.to_string());

        for component in Component::ALL {
            if meta.get(component).is_some_and(|n| i64::try_from(n).is_err()) {
                return Err(parse_error(
                    &meta.raw,
                    &format!("{component} component out of range"),
                ));
            }
        }
        if meta.suffix_version.is_some() && meta.suffix.is_none() {
            return Err(FlexVersionError::MissingSuffix { version: meta.raw });
        }

        Ok(meta)
    }
}
