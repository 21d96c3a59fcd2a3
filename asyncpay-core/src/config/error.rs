//! Configuration errors

use std::fmt;
use thiserror::Error;

/// Failure to read, parse or validate a payments config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config from '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Environment variable '{var}' not found")]
    EnvVarNotFound { var: String },

    #[error("No credentials configured for provider '{provider}'")]
    ProviderNotConfigured { provider: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// A single rejected field, addressed as `section.field`
#[derive(Debug, Error)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `aaio.shop_id`
    pub field_path: String,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed at '{}': {}", self.field_path, self.kind)
    }
}

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("required field is missing")]
    RequiredFieldMissing,

    #[error("invalid value: expected {expected}, got {actual}")]
    InvalidValue { expected: String, actual: String },

    #[error("invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("unresolved environment placeholder '{placeholder}'")]
    UnresolvedPlaceholder { placeholder: String },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
        }
    }

    /// Empty or blank credential field
    pub fn required(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::RequiredFieldMissing)
    }

    pub fn invalid_value(
        field_path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::InvalidValue {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    /// Base URL override that does not parse or is not http(s)
    pub fn invalid_url(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::InvalidUrl {
                message: message.into(),
            },
        )
    }

    /// `${VAR}` left in a value after interpolation
    pub fn unresolved(field_path: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::UnresolvedPlaceholder {
                placeholder: placeholder.into(),
            },
        )
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field_path() {
        let err = ConfigError::from(ValidationError::required("payok.api_id"));
        assert_eq!(
            err.to_string(),
            "Validation error: Validation failed at 'payok.api_id': required field is missing"
        );
    }
}
