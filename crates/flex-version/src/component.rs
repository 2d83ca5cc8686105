//! Names of the numeric version components.

use std::fmt;

/// One of the numeric fields shared by [`VersionMeta`](crate::VersionMeta)
/// and [`VersionDelta`](crate::VersionDelta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Major,
    Minor,
    Maintenance,
    Build,
    /// Trailing digits of the suffix, e.g. `1` in `rc1`
    SuffixVersion,
}

impl Component {
    /// All components in ordering priority.
    pub const ALL: [Self; 5] = [
        Self::Major,
        Self::Minor,
        Self::Maintenance,
        Self::Build,
        Self::SuffixVersion,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Maintenance => "maintenance",
            Self::Build => "build",
            Self::SuffixVersion => "suffix version",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
