//! Parsing, ordering and arithmetic for loosely structured version strings.
//!
//! Versions such as `prev-1.0.0-rc1` carry an optional textual prefix, up to
//! four numeric components and an optional suffix with its own embedded
//! number. This crate parses them into [`VersionMeta`], orders them with a
//! configurable suffix ranking, and computes [`VersionDelta`] differences that
//! can be scaled, combined and applied back to a version.
//!
//! The free functions below use the process-wide [`ComparatorConfig`]; use a
//! [`VersionComparator`] to compare under a configuration of your own.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//!
//! assert_eq!(flex_version::compare("prev-1.0.0", "prev-1.1.0", false).unwrap(), Ordering::Less);
//! assert!(flex_version::in_range("prev-1.0.1-rc5", "prev-1.0.0-rc5", "prev-1.0.2-rc5", false).unwrap());
//! ```

pub mod comparator;
pub mod component;
pub mod config;
pub mod delta;
pub mod error;
pub mod meta;
pub mod semver_compat;

use std::cmp::Ordering;

pub use comparator::{IntoVersionMeta, VersionComparator};
pub use component::Component;
pub use config::{
    ComparatorConfig, PrefixPolicy, SuffixOrder, global_config, ordered_suffix, set_global_config,
    set_ordered_suffix,
};
pub use delta::VersionDelta;
pub use error::{FlexVersionError, Result};
pub use meta::VersionMeta;

pub fn parse(version: &str) -> Result<VersionMeta> {
    VersionMeta::parse(version)
}

pub fn compare<'a, 'b>(
    a: impl IntoVersionMeta<'a>,
    b: impl IntoVersionMeta<'b>,
    ignore_suffix: bool,
) -> Result<Ordering> {
    let a = a.into_version_meta()?;
    let b = b.into_version_meta()?;
    a.compares(&b, ignore_suffix)
}

pub fn in_range<'a, 'b, 'c>(
    version: impl IntoVersionMeta<'a>,
    min: impl IntoVersionMeta<'b>,
    max: impl IntoVersionMeta<'c>,
    ignore_suffix: bool,
) -> Result<bool> {
    let version = version.into_version_meta()?;
    let min = min.into_version_meta()?;
    let max = max.into_version_meta()?;
    version.in_range(&min, &max, ignore_suffix)
}

pub fn shares_prefix<'a, 'b>(a: impl IntoVersionMeta<'a>, b: impl IntoVersionMeta<'b>) -> Result<bool> {
    let a = a.into_version_meta()?;
    let b = b.into_version_meta()?;
    Ok(a.shares_prefix(&b))
}

pub fn shares_suffix<'a, 'b>(a: impl IntoVersionMeta<'a>, b: impl IntoVersionMeta<'b>) -> Result<bool> {
    let a = a.into_version_meta()?;
    let b = b.into_version_meta()?;
    Ok(a.shares_suffix(&b))
}

pub fn subtract<'a, 'b>(
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
    version: impl IntoVersionMeta<'a>,
    delta: VersionDelta,
    suffix: Option<&str>,
) -> Result<VersionMeta> {
    version.into_version_meta()?.add(delta, suffix)
}
