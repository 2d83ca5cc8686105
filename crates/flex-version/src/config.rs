//! Comparison configuration.
//!
//! A [`ComparatorConfig`] controls how suffix labels are ranked and how
//! versions with different prefixes are treated. Each
//! [`VersionComparator`](crate::VersionComparator) owns one; the free
//! functions of this crate and the comparison operators on
//! [`VersionMeta`](crate::VersionMeta) read the process-wide instance kept
//! here instead.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{FlexVersionError, Result};

/// Explicit total order over suffix labels, lowest first.
///
/// A `None` entry is the slot for versions without a suffix, so a release
/// can be placed before or after its pre-releases.
///
/// # Examples
///
/// ```
/// use flex_version::SuffixOrder;
///
/// let order: SuffixOrder = "alpha,beta,rc,".parse().unwrap();
/// assert_eq!(order.position(Some("beta")).unwrap(), 1);
/// assert_eq!(order.position(None).unwrap(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixOrder {
    labels: Vec<Option<String>>,
}

impl SuffixOrder {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(|l| l.map(Into::into)).collect(),
        }
    }

    /// Builds an order from labels only; versions without a suffix are unranked.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(Some))
    }

    /// Inserts the no-suffix slot at `index`, or at the end if out of bounds.
    #[must_use]
    pub fn with_unlabeled_at(mut self, index: usize) -> Self {
        let index = index.min(self.labels.len());
        self.labels.insert(index, None);
        self
    }

    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rank of `suffix` in this order.
    pub fn position(&self, suffix: Option<&str>) -> Result<usize> {
        self.labels
            .iter()
            .position(|label| label.as_deref() == suffix)
            .ok_or_else(|| {
                tracing::debug!("suffix {:?} missing from configured order", suffix);
                FlexVersionError::UnknownSuffix {
                    suffix: suffix.map(str::to_string),
                }
            })
    }

    pub fn compare(&self, a: Option<&str>, b: Option<&str>) -> Result<Ordering> {
        Ok(self.position(a)?.cmp(&self.position(b)?))
    }
}

/// Parses a comma-separated list; an empty entry is the no-suffix slot.
impl FromStr for SuffixOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(Self::new(s.split(',').map(|entry| {
            let entry = entry.trim();
            (!entry.is_empty()).then_some(entry)
        })))
    }
}

/// How versions with different prefixes compare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixPolicy {
    /// Refuse to compare, returning a prefix mismatch error.
    #[default]
    Strict,
    /// Order by prefix string first, reading an absent prefix as `""`.
    Lexicographic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Ranking of suffix labels; plain string order is used when unset.
    pub ordered_suffix: Option<SuffixOrder>,
    pub prefix_policy: PrefixPolicy,
}

impl ComparatorConfig {
    pub const DEFAULT: Self = Self {
        ordered_suffix: None,
        prefix_policy: PrefixPolicy::Strict,
    };

    #[must_use]
    pub fn with_ordered_suffix(mut self, order: SuffixOrder) -> Self {
        self.ordered_suffix = Some(order);
        self
    }

    #[must_use]
    pub const fn with_prefix_policy(mut self, policy: PrefixPolicy) -> Self {
        self.prefix_policy = policy;
        self
    }

    /// Orders two suffix labels, falling back to string order with absent as `""`.
    pub(crate) fn compare_suffix(&self, a: Option<&str>, b: Option<&str>) -> Result<Ordering> {
        match &self.ordered_suffix {
            Some(order) => order.compare(a, b),
            None => Ok(a.unwrap_or_default().cmp(b.unwrap_or_default())),
        }
    }

    /// Orders two prefixes according to the prefix policy.
    pub(crate) fn compare_prefix(&self, a: Option<&str>, b: Option<&str>) -> Result<Ordering> {
        if a == b {
            return Ok(Ordering::Equal);
        }

        match self.prefix_policy {
            PrefixPolicy::Strict => Err(FlexVersionError::PrefixMismatch {
                left: a.map(str::to_string),
                right: b.map(str::to_string),
            }),
            PrefixPolicy::Lexicographic => Ok(a.unwrap_or_default().cmp(b.unwrap_or_default())),
        }
    }
}

// Process-wide configuration. Shared by every caller in the process; callers
// needing isolation should own a `VersionComparator` instead.
static GLOBAL_CONFIG: RwLock<ComparatorConfig> = RwLock::new(ComparatorConfig::DEFAULT);

pub(crate) fn with_global_config<T>(f: impl FnOnce(&ComparatorConfig) -> T) -> T {
    let guard = GLOBAL_CONFIG.read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Snapshot of the process-wide configuration.
pub fn global_config() -> ComparatorConfig {
    with_global_config(ComparatorConfig::clone)
}

/// Replaces the process-wide configuration, returning the previous one.
pub fn set_global_config(config: ComparatorConfig) -> ComparatorConfig {
    let mut guard = GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!("replacing global comparator config: {:?}", config);
    std::mem::replace(&mut *guard, config)
}

pub fn ordered_suffix() -> Option<SuffixOrder> {
    with_global_config(|config| config.ordered_suffix.clone())
}

/// Sets the process-wide suffix order, returning the previous one.
pub fn set_ordered_suffix(order: Option<SuffixOrder>) -> Option<SuffixOrder> {
    let mut guard = GLOBAL_CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!("setting global suffix order: {:?}", order);
    std::mem::replace(&mut guard.ordered_suffix, order)
}
