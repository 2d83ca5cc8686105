//! Interop with the `semver` crate.

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{FlexVersionError, Result};
use crate::meta::VersionMeta;

impl VersionMeta {
    /// Converts to a strict semantic version.
    ///
    /// Absent components become `0`, the suffix and its version become the
    /// pre-release identifier and the build component becomes build metadata.
    /// Versions carrying a prefix have no semver equivalent.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_version::VersionMeta;
    ///
    /// let v = VersionMeta::parse("1.4-rc2").unwrap();
    /// assert_eq!(v.to_semver().unwrap().to_string(), "1.4.0-rc2");
    /// ```
    pub fn to_semver(&self) -> Result<Version> {
        if let Some(prefix) = self.prefix() {
            return Err(FlexVersionError::ParseError {
                version: self.raw_str().to_string(),
                message: format!("no semver equivalent: version has prefix '{prefix}'"),
            });
        }

        let mut version = Version::new(
            self.major(),
            self.minor().unwrap_or(0),
            self.maintenance().unwrap_or(0),
        );

        let pre = match (self.suffix(), self.suffix_version()) {
            (None | Some(""), None) => String::new(),
            (suffix, Some(n)) => format!("{}{n}", suffix.unwrap_or_default()),
            (Some(suffix), None) => suffix.to_string(),
        };
        if !pre.is_empty() {
            version.pre = Prerelease::new(&pre).map_err(|e| self.semver_error(&e))?;
        }

        if let Some(build) = self.build() {
            version.build =
                BuildMetadata::new(&build.to_string()).map_err(|e| self.semver_error(&e))?;
        }

        Ok(version)
    }

    fn semver_error(&self, err: &semver::Error) -> FlexVersionError {
        FlexVersionError::ParseError {
            version: self.raw_str().to_string(),
            message: format!("no semver equivalent: {err}"),
        }
    }
}

/// Parses the rendered semantic version; build metadata is dropped.
///
/// The pre-release maps onto one suffix: its label runs up to the first digit
/// and only that first run of digits becomes the suffix version, so
/// `1.0.0-alpha.1.2` reads as suffix `alpha` with suffix version `1`.
impl TryFrom<&Version> for VersionMeta {
    type Error = FlexVersionError;

    fn try_from(version: &Version) -> Result<Self> {
        let mut rendered = format!("{}.{}.{}", version.major, version.minor, version.patch);
        if !version.pre.is_empty() {
            rendered.push('-');
            rendered.push_str(version.pre.as_str());
        }
        Self::parse(&rendered)
    }
}
