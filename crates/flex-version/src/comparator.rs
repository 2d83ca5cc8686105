//! Version ordering and range checks.
//!
//! Ordering is layered: prefix (per [`PrefixPolicy`](crate::PrefixPolicy)),
//! then the numeric components, then the suffix label (string order or the
//! configured [`SuffixOrder`](crate::SuffixOrder)), and finally the suffix
//! version. Absent numeric components never decide an ordering on their own.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::config::ComparatorConfig;
use crate::delta::VersionDelta;
use crate::error::{FlexVersionError, Result};
use crate::meta::VersionMeta;

/// Values accepted wherever a version is expected: raw strings are parsed,
/// parsed versions are borrowed or moved as-is.
pub trait IntoVersionMeta<'a> {
    fn into_version_meta(self) -> Result<Cow<'a, VersionMeta>>;
}

impl<'a> IntoVersionMeta<'a> for &'a str {
    fn into_version_meta(self) -> Result<Cow<'a, VersionMeta>> {
        VersionMeta::parse(self).map(Cow::Owned)
    }
}

impl<'a> IntoVersionMeta<'a> for &'a String {
    fn into_version_meta(self) -> Result<Cow<'a, VersionMeta>> {
        VersionMeta::parse(self).map(Cow::Owned)
    }
}

impl<'a> IntoVersionMeta<'a> for String {
    fn into_version_meta(self) -> Result<Cow<'a, VersionMeta>> {
        VersionMeta::parse(&self).map(Cow::Owned)
    }
}

impl<'a> IntoVersionMeta<'a> for &'a VersionMeta {
    fn into_version_meta(self) -> Result<Cow<'a, VersionMeta>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'a> IntoVersionMeta<'a> for VersionMeta {
    fn into_version_meta(self) -> Result<Cow<'a, VersionMeta>> {
        Ok(Cow::Owned(self))
    }
}

pub(crate) fn compare_meta(
    config: &ComparatorConfig,
    a: &VersionMeta,
    b: &VersionMeta,
    ignore_suffix: bool,
) -> Result<Ordering> {
    let prefix_order = config.compare_prefix(a.prefix(), b.prefix())?;
    if prefix_order != Ordering::Equal {
        return Ok(prefix_order);
    }

    // Prefixes were settled above, and suffix labels are ranked separately.
    let numeric = a.subtract(b, true, true)?.signum();
    if numeric != Ordering::Equal || ignore_suffix {
        tracing::trace!("{} vs {}: {:?} by numeric components", a, b, numeric);
        return Ok(numeric);
    }

    let suffix_order = config.compare_suffix(a.suffix(), b.suffix())?;
    if suffix_order != Ordering::Equal {
        return Ok(suffix_order);
    }

    let suffix_version = match (a.suffix_version(), b.suffix_version()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    };
    tracing::trace!("{} vs {}: {:?} by suffix", a, b, suffix_version);
    Ok(suffix_version)
}

pub(crate) fn range_contains(
    config: &ComparatorConfig,
    version: &VersionMeta,
    min: &VersionMeta,
    max: &VersionMeta,
    ignore_suffix: bool,
) -> Result<bool> {
    if !(version.shares_prefix(min) && version.shares_prefix(max)) {
        return Ok(false);
    }

    if compare_meta(config, min, max, ignore_suffix)? == Ordering::Greater {
        tracing::debug!("rejecting inverted range {} .. {}", min, max);
        return Err(FlexVersionError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    Ok(
        compare_meta(config, version, max, ignore_suffix)? != Ordering::Greater
            && compare_meta(config, version, min, ignore_suffix)? != Ordering::Less,
    )
}

/// Entry point for comparing, diffing and range-checking versions under one
/// configuration.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use flex_version::{ComparatorConfig, SuffixOrder, VersionComparator};
///
/// let comparator = VersionComparator::new(
///     ComparatorConfig::default()
///         .with_ordered_suffix(SuffixOrder::from_labels(["alpha", "beta", "rc", "final"])),
/// );
/// assert_eq!(
///     comparator.compares("prev-1.0.0-beta", "prev-1.0.0-alpha", false).unwrap(),
///     Ordering::Greater
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct VersionComparator {
    config: ComparatorConfig,
}

impl VersionComparator {
    pub const fn new(config: ComparatorConfig) -> Self {
        Self { config }
    }

    /// Comparator using a snapshot of the process-wide configuration.
    pub fn global() -> Self {
        Self::new(crate::config::global_config())
    }

    pub const fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    pub fn parse(&self, version: &str) -> Result<VersionMeta> {
        VersionMeta::parse(version)
    }

    pub fn compares<'a, 'b>(
        &self,
        a: impl IntoVersionMeta<'a>,
        b: impl IntoVersionMeta<'b>,
        ignore_suffix: bool,
    ) -> Result<Ordering> {
        let a = a.into_version_meta()?;
        let b = b.into_version_meta()?;
        compare_meta(&self.config, &a, &b, ignore_suffix)
    }

    /// Checks `min <= version <= max`.
    ///
    /// Versions whose prefix differs from either bound are never in range.
    /// Fails with [`FlexVersionError::InvalidRange`] when `min > max`.
    pub fn in_range<'a, 'b, 'c>(
        &self,
        version: impl IntoVersionMeta<'a>,
        min: impl IntoVersionMeta<'b>,
        max: impl IntoVersionMeta<'c>,
        ignore_suffix: bool,
    ) -> Result<bool> {
        let version = version.into_version_meta()?;
        let min = min.into_version_meta()?;
        let max = max.into_version_meta()?;
        range_contains(&self.config, &version, &min, &max, ignore_suffix)
    }

    pub fn shares_prefix<'a, 'b>(
        &self,
        a: impl IntoVersionMeta<'a>,
        b: impl IntoVersionMeta<'b>,
    ) -> Result<bool> {
        let a = a.into_version_meta()?;
        let b = b.into_version_meta()?;
        Ok(a.shares_prefix(&b))
    }

    pub fn shares_suffix<'a, 'b>(
        &self,
        a: impl IntoVersionMeta<'a>,
        b: impl IntoVersionMeta<'b>,
    ) -> Result<bool> {
        let a = a.into_version_meta()?;
        let b = b.into_version_meta()?;
        Ok(a.shares_suffix(&b))
    }

    pub fn subtract<'a, 'b>(
        &self,
        a: impl IntoVersionMeta<'a>,
        b: impl IntoVersionMeta<'b>,
        ignore_prefix: bool,
        ignore_suffix: bool,
    ) -> Result<VersionDelta> {
        let a = a.into_version_meta()?;
        let b = b.into_version_meta()?;
        a.subtract(&b, ignore_prefix, ignore_suffix)
    }

    pub fn add<'a>(
        &self,
        version: impl IntoVersionMeta<'a>,
        delta: VersionDelta,
        suffix: Option<&str>,
    ) -> Result<VersionMeta> {
        version.into_version_meta()?.add(delta, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PrefixPolicy, SuffixOrder};

    fn plain() -> VersionComparator {
        VersionComparator::default()
    }

    fn channels() -> VersionComparator {
        VersionComparator::new(
            ComparatorConfig::default()
                .with_ordered_suffix(SuffixOrder::from_labels(["alpha", "beta", "rc", "final"])),
        )
    }

    #[test]
    fn test_numeric_ordering() {
        let c = plain();
        assert_eq!(
            c.compares("prev-1.0.0", "prev-1.1.0", false).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            c.compares("prev-2.0.0", "prev-1.0.0", false).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            c.compares("1.10.0", "1.9.9", false).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_absent_components_do_not_decide() {
        let c = plain();
        assert_eq!(c.compares("1.0", "1.0.5", false).unwrap(), Ordering::Equal);
        assert_eq!(c.compares("1.1", "1.0.5", false).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_suffix_string_order_without_config() {
        let c = plain();
        assert_eq!(
            c.compares("1.0-beta", "1.0-alpha", false).unwrap(),
            Ordering::Greater
        );
        assert_eq!(c.compares("1.0", "1.0-rc1", false).unwrap(), Ordering::Less);
        assert_eq!(c.compares("1.0-rc1", "1.0-beta", true).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_configured_suffix_order() {
        let c = channels();
        assert_eq!(
            c.compares("prev-1.0.0-beta", "prev-1.0.0-alpha", false).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            c.compares("prev-1.0.0-final", "prev-1.0.0-rc", false).unwrap(),
            Ordering::Greater
        );
        // Numeric components dominate the suffix.
        assert_eq!(
            c.compares("prev-1.0.1-alpha", "prev-1.0.0-final", false).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_unknown_suffix_in_configured_order() {
        let c = channels();
        assert!(matches!(
            c.compares("1.0-gamma", "1.0-alpha", false),
            Err(FlexVersionError::UnknownSuffix { .. })
        ));
        assert!(matches!(
            c.compares("1.0", "1.0-alpha", false),
            Err(FlexVersionError::UnknownSuffix { suffix: None })
        ));
        // Suffixes are not consulted when ignored.
        assert_eq!(c.compares("1.0-gamma", "1.0-alpha", true).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_release_slot_in_configured_order() {
        let c = VersionComparator::new(ComparatorConfig::default().with_ordered_suffix(
            SuffixOrder::from_labels(["alpha", "beta", "rc"]).with_unlabeled_at(3),
        ));
        assert_eq!(c.compares("1.0", "1.0-rc3", false).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_suffix_version_breaks_ties() {
        let c = plain();
        assert_eq!(c.compares("1.0-rc2", "1.0-rc10", false).unwrap(), Ordering::Less);
        assert_eq!(c.compares("1.0-rc", "1.0-rc3", false).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_prefix_policy() {
        assert!(matches!(
            plain().compares("a-1.0", "b-1.0", false),
            Err(FlexVersionError::PrefixMismatch { .. })
        ));

        let lexicographic = VersionComparator::new(
            ComparatorConfig::default().with_prefix_policy(PrefixPolicy::Lexicographic),
        );
        assert_eq!(
            lexicographic.compares("a-9.0", "b-1.0", false).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            lexicographic.compares("a-1.0", "1.0", false).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_in_range() {
        let c = plain();
        assert!(c.in_range("prev-1.0.1-rc5", "prev-1.0.0-rc5", "prev-1.0.2-rc5", false).unwrap());
        assert!(!c.in_range("prev-1.0.3-rc5", "prev-1.0.0-rc5", "prev-1.0.2-rc5", false).unwrap());
        assert!(c.in_range("prev-1.0.0-rc5", "prev-1.0.0-rc5", "prev-1.0.2-rc5", false).unwrap());
        assert!(c.in_range("prev-1.0.2-rc5", "prev-1.0.0-rc5", "prev-1.0.2-rc5", false).unwrap());
    }

    #[test]
    fn test_in_range_degenerate() {
        let v = VersionMeta::parse("prev-3.1-rc2").unwrap();
        assert!(plain().in_range(&v, &v, &v, false).unwrap());
    }

    #[test]
    fn test_in_range_prefix_mismatch_is_false() {
        let c = plain();
        assert!(!c.in_range("other-1.0.1", "prev-1.0.0", "prev-1.0.2", false).unwrap());
        assert!(!c.in_range("1.0.1", "prev-1.0.0", "prev-1.0.2", false).unwrap());
    }

    #[test]
    fn test_in_range_rejects_inverted_bounds() {
        let err = plain()
            .in_range("prev-1.0.1", "prev-1.0.2", "prev-1.0.0", false)
            .unwrap_err();
        assert_eq!(
            err,
            FlexVersionError::InvalidRange {
                min: "prev-1.0.2".into(),
                max: "prev-1.0.0".into()
            }
        );
    }

    #[test]
    fn test_in_range_ignoring_suffix() {
        let c = plain();
        assert!(c.in_range("1.0.2-rc1", "1.0.0-final", "1.0.2-final", true).unwrap());
        assert!(!c.in_range("1.0.2-rc1", "1.0.0-final", "1.0.2-final", false).unwrap());
    }

    #[test]
    fn test_mixed_inputs() {
        let c = plain();
        let parsed = VersionMeta::parse("1.2.0").unwrap();
        assert_eq!(c.compares(&parsed, "1.1.0", false).unwrap(), Ordering::Greater);
        assert_eq!(
            c.compares(String::from("1.1.0"), parsed.clone(), false).unwrap(),
            Ordering::Less
        );
        assert!(matches!(
            c.compares("garbage", &parsed, false),
            Err(FlexVersionError::ParseError { .. })
        ));
    }

    #[test]
    fn test_shares_passthrough() {
        let c = plain();
        assert!(c.shares_prefix("prev-1.0", "prev-2.0").unwrap());
        assert!(!c.shares_prefix("prev-1.0", "2.0").unwrap());
        assert!(c.shares_suffix("1.0-rc1", "2.0-rc2").unwrap());
        assert!(!c.shares_suffix("1.0-rc1", "1.0").unwrap());
    }

    #[test]
    fn test_subtract_and_add_passthrough() {
        let c = plain();
        let delta = c.subtract("prev-1.4.0", "prev-1.1.0", false, false).unwrap();
        assert_eq!(delta.minor(), Some(3));

        let bumped = c.add("prev-1.1.0", delta, None).unwrap();
        assert_eq!(bumped.to_string(), "prev-1.4.0");
    }

    #[test]
    fn test_shares_and_subtract_mixed_inputs() {
        let c = plain();
        let parsed = VersionMeta::parse("prev-1.4.0-rc2").unwrap();
        assert!(c.shares_prefix(&parsed, String::from("prev-2.0")).unwrap());
        assert!(c.shares_suffix("1.0-rc1", parsed.clone()).unwrap());

        let delta = c.subtract(&parsed, "prev-1.1.0-rc1", false, false).unwrap();
        assert_eq!(delta.minor(), Some(3));
        assert_eq!(delta.suffix_version(), Some(1));
        assert!(c.subtract(&parsed, "garbage", false, false).is_err());
    }

    fn unlabeled_first() -> VersionComparator {
        VersionComparator::new(ComparatorConfig::default().with_ordered_suffix(SuffixOrder::new([
            None,
            Some("alpha"),
            Some("beta"),
            Some("rc"),
            Some("final"),
        ])))
    }

    #[test]
    fn test_unlabeled_release_ranks_before_channels() {
        let c = unlabeled_first();
        assert_eq!(
            c.compares("prev-1.0", "prev-1.0.0-final", false).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            c.compares("prev-1.0.0-alpha", "prev-1.0", false).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_unlabeled_release_outside_channel_range() {
        let c = unlabeled_first();
        assert!(!c
            .in_range("prev-1.1", "prev-1.1.0-rc0", "prev-1.1.0-final", false)
            .unwrap());
        assert!(c
            .in_range("prev-1.1", "prev-1.1.0-rc0", "prev-1.1.0-final", true)
            .unwrap());
    }
}
