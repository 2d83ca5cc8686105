//! Algebraic difference between two versions.
//!
//! A [`VersionDelta`] holds one signed, possibly absent value per numeric
//! component. Absence propagates through the arithmetic operators and only
//! collapses to zero when deltas are ordered, compared or hashed.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Field-wise difference between two [`VersionMeta`](crate::VersionMeta) values.
///
/// # Examples
///
/// ```
/// use flex_version::VersionDelta;
///
/// let bump = VersionDelta::default().with_minor(1);
/// assert!(bump > VersionDelta::ZERO);
/// assert_eq!(bump + (-bump), VersionDelta::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VersionDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    major: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minor: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maintenance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    build: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suffix_version: Option<i64>,
}

impl VersionDelta {
    /// Magnitude of every field of [`Self::MIN`] and [`Self::MAX`].
    pub const BOUND: i64 = 999_999_999;

    pub const ZERO: Self = Self::new(Some(0), Some(0), Some(0), Some(0), Some(0));

    pub const MIN: Self = Self::new(
        Some(-Self::BOUND),
        Some(-Self::BOUND),
        Some(-Self::BOUND),
        Some(-Self::BOUND),
        Some(-Self::BOUND),
    );

    pub const MAX: Self = Self::new(
        Some(Self::BOUND),
        Some(Self::BOUND),
        Some(Self::BOUND),
        Some(Self::BOUND),
        Some(Self::BOUND),
    );

    pub const fn new(
        major: Option<i64>,
        minor: Option<i64>,
        maintenance: Option<i64>,
        build: Option<i64>,
        suffix_version: Option<i64>,
    ) -> Self {
        Self {
            major,
            minor,
            maintenance,
            build,
            suffix_version,
        }
    }

    pub const fn with_major(mut self, value: i64) -> Self {
        self.major = Some(value);
        self
    }

    pub const fn with_minor(mut self, value: i64) -> Self {
        self.minor = Some(value);
        self
    }

    pub const fn with_maintenance(mut self, value: i64) -> Self {
        self.maintenance = Some(value);
        self
    }

    pub const fn with_build(mut self, value: i64) -> Self {
        self.build = Some(value);
        self
    }

    pub const fn with_suffix_version(mut self, value: i64) -> Self {
        self.suffix_version = Some(value);
        self
    }

    pub const fn major(&self) -> Option<i64> {
        self.major
    }

    pub const fn minor(&self) -> Option<i64> {
        self.minor
    }

    pub const fn maintenance(&self) -> Option<i64> {
        self.maintenance
    }

    pub const fn build(&self) -> Option<i64> {
        self.build
    }

    pub const fn suffix_version(&self) -> Option<i64> {
        self.suffix_version
    }

    pub const fn get(&self, component: Component) -> Option<i64> {
        match component {
            Component::Major => self.major,
            Component::Minor => self.minor,
            Component::Maintenance => self.maintenance,
            Component::Build => self.build,
            Component::SuffixVersion => self.suffix_version,
        }
    }

    /// Fields in ordering priority, absent fields kept as `None`.
    pub const fn fields(&self) -> [Option<i64>; 5] {
        [
            self.major,
            self.minor,
            self.maintenance,
            self.build,
            self.suffix_version,
        ]
    }

    const fn from_fields(fields: [Option<i64>; 5]) -> Self {
        let [major, minor, maintenance, build, suffix_version] = fields;
        Self::new(major, minor, maintenance, build, suffix_version)
    }

    /// Fields with absent values read as zero, as used by ordering and hashing.
    pub fn ordering_key(&self) -> [i64; 5] {
        self.fields().map(|f| f.unwrap_or(0))
    }

    /// True when every field is zero or absent.
    pub fn is_zero(&self) -> bool {
        self.ordering_key() == [0; 5]
    }

    /// Returns the sign of the delta under the total order.
    pub fn signum(&self) -> Ordering {
        self.cmp(&Self::ZERO)
    }

    pub fn abs(self) -> Self {
        self.map(i64::saturating_abs)
    }

    /// Clamps every present field into `-BOUND..=BOUND`.
    pub fn saturate(self) -> Self {
        self.map(|v| v.clamp(-Self::BOUND, Self::BOUND))
    }

    fn map(self, f: impl Fn(i64) -> i64) -> Self {
        Self::from_fields(self.fields().map(|field| field.map(&f)))
    }

    fn zip_with(self, other: Self, f: impl Fn(i64, i64) -> i64) -> Self {
        let lhs = self.fields();
        let rhs = other.fields();
        let mut out = [None; 5];
        for (slot, (a, b)) in out.iter_mut().zip(lhs.into_iter().zip(rhs)) {
            *slot = match (a, b) {
                (Some(a), Some(b)) => Some(f(a, b)),
                (Some(v), None) | (None, Some(v)) => Some(v),
                (None, None) => None,
            };
        }
        Self::from_fields(out)
    }
}

impl Neg for VersionDelta {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(i64::saturating_neg)
    }
}

impl Add for VersionDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, i64::saturating_add)
    }
}

impl Sub for VersionDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul<i64> for VersionDelta {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        self.map(|v| v.saturating_mul(rhs))
    }
}

impl Mul<VersionDelta> for i64 {
    type Output = VersionDelta;

    fn mul(self, rhs: VersionDelta) -> VersionDelta {
        rhs * self
    }
}

impl Sum for VersionDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl PartialEq for VersionDelta {
    fn eq(&self, other: &Self) -> bool {
        self.ordering_key() == other.ordering_key()
    }
}

impl Eq for VersionDelta {}

impl PartialOrd for VersionDelta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionDelta {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering_key().cmp(&other.ordering_key())
    }
}

impl Hash for VersionDelta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordering_key().hash(state);
    }
}

impl fmt::Display for VersionDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["major", "minor", "maintenance", "build", "sver"];
        let parts: Vec<String> = names
            .iter()
            .zip(self.fields())
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();

        if parts.is_empty() {
            write!(f, "VersionDelta(0)")
        } else {
            write!(f, "VersionDelta({})", parts.join(", "))
        }
    }
}
