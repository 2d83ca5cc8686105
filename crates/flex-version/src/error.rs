//! Errors produced while parsing, comparing and diffing versions.

use thiserror::Error;

use crate::component::Component;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlexVersionError {
    #[error("Could not parse the given version '{version}': {message}")]
    ParseError { version: String, message: String },

    #[error(
        "Versions do not share the same prefix: {} vs. {}",
        label(.left.as_deref()),
        label(.right.as_deref())
    )]
    PrefixMismatch {
        left: Option<String>,
        right: Option<String>,
    },

    #[error(
        "Versions do not share the same suffix: {} vs. {}",
        label(.left.as_deref()),
        label(.right.as_deref())
    )]
    SuffixMismatch {
        left: Option<String>,
        right: Option<String>,
    },

    #[error("The min version ({min}) should be lower than or equal to the max version ({max})")]
    InvalidRange { min: String, max: String },

    #[error("Suffix is required when adding a suffix version to '{version}'")]
    MissingSuffix { version: String },

    #[error("Version addition produced a negative {component}: {value}")]
    NegativeResult { component: Component, value: i64 },

    #[error("Suffix {} is not part of the configured suffix order", label(.suffix.as_deref()))]
    UnknownSuffix { suffix: Option<String> },

    #[error("Version addition overflowed the {component} component")]
    ComponentOverflow { component: Component },
}

pub type Result<T> = std::result::Result<T, FlexVersionError>;

fn label(value: Option<&str>) -> String {
    value.map_or_else(|| "<none>".to_string(), |v| format!("'{v}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = FlexVersionError::ParseError {
            version: "abc".into(),
            message: "missing major version".into(),
        };
        assert_eq!(
            err.to_string(),
            "Could not parse the given version 'abc': missing major version"
        );
    }

    #[test]
    fn test_mismatch_display_with_absent_side() {
        let err = FlexVersionError::PrefixMismatch {
            left: Some("prev".into()),
            right: None,
        };
        assert_eq!(
            err.to_string(),
            "Versions do not share the same prefix: 'prev' vs. <none>"
        );

        let err = FlexVersionError::SuffixMismatch {
            left: Some("rc".into()),
            right: Some("final".into()),
        };
        assert!(err.to_string().contains("'rc' vs. 'final'"));
    }

    #[test]
    fn test_negative_result_display() {
        let err = FlexVersionError::NegativeResult {
            component: Component::SuffixVersion,
            value: -1,
        };
        assert_eq!(
            err.to_string(),
            "Version addition produced a negative suffix version: -1"
        );
    }

    #[test]
    fn test_unknown_suffix_display() {
        let err = FlexVersionError::UnknownSuffix {
            suffix: Some("gamma".into()),
        };
        assert!(err.to_string().contains("'gamma'"));

        let err = FlexVersionError::UnknownSuffix { suffix: None };
        assert!(err.to_string().contains("<none>"));
    }

    #[test]
    fn test_invalid_range_display() {
        let err = FlexVersionError::InvalidRange {
            min: "prev-2.0".into(),
            max: "prev-1.0".into(),
        };
        assert!(err.to_string().contains("(prev-2.0)"));
        assert!(err.to_string().contains("(prev-1.0)"));
    }
}
