//! Configuration validation

use super::env::find_placeholder;
use super::error::{ConfigError, ValidationError};
use super::schema::PaymentsConfig;

/// Validates a loaded [`PaymentsConfig`]
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Allow a config with no provider section at all
    allow_empty: bool,
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept configs that only carry transport settings
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn validate(&self, config: &PaymentsConfig) -> Result<(), ConfigError> {
        let sections = config.sections();
        if sections.is_empty() && !self.allow_empty {
            return Err(ConfigError::Invalid {
                message: "no provider credentials configured".to_string(),
            });
        }

        if config.transport.user_agent.trim().is_empty() {
            return Err(ValidationError::required("transport.user_agent").into());
        }
        if config.transport.timeout_secs == Some(0) {
            return Err(ValidationError::invalid_value(
                "transport.timeout_secs",
                "a positive number of seconds",
                "0",
            )
            .into());
        }

        for (name, credentials) in sections {
            credentials.validate(name)?;
            if let Some(base_url) = credentials.base_url() {
                let field = format!("{name}.base_url");
                if let Some(placeholder) = find_placeholder(base_url) {
                    return Err(ValidationError::unresolved(field, placeholder).into());
                }
                let parsed = url::Url::parse(base_url)
                    .map_err(|e| ValidationError::invalid_url(&field, e.to_string()))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ValidationError::invalid_url(
                        field,
                        format!("unsupported scheme '{}'", parsed.scheme()),
                    )
                    .into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ValidationErrorKind;

    fn parse(yaml: &str) -> PaymentsConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_empty_config_rejected_by_default() {
        let config = PaymentsConfig::default();
        assert!(ConfigValidator::new().validate(&config).is_err());
        assert!(ConfigValidator::new().allow_empty(true).validate(&config).is_ok());
    }

    #[test]
    fn test_missing_credential_field() {
        let config = parse(
            r#"
platega:
  merchant_id: ""
  secret_key: "s"
"#,
        );
        match ConfigValidator::new().validate(&config) {
            Err(ConfigError::ValidationError(err)) => {
                assert_eq!(err.field_path, "platega.merchant_id");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_base_url() {
        let config = parse(
            r#"
xrocket:
  api_key: "k"
  base_url: "ftp://example.com"
"#,
        );
        match ConfigValidator::new().validate(&config) {
            Err(ConfigError::ValidationError(err)) => {
                assert!(matches!(err.kind, ValidationErrorKind::InvalidUrl { .. }));
            }
            other => panic!("expected invalid url, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_placeholder() {
        let config = parse(
            r#"
xrocket:
  api_key: "k"
  base_url: "${lower_case_var}"
"#,
        );
        match ConfigValidator::new().validate(&config) {
            Err(ConfigError::ValidationError(err)) => {
                assert!(matches!(
                    err.kind,
                    ValidationErrorKind::UnresolvedPlaceholder { .. }
                ));
            }
            other => panic!("expected unresolved placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = parse(
            r#"
transport:
  timeout_secs: 0
xrocket:
  api_key: "k"
"#,
        );
        assert!(ConfigValidator::new().validate(&config).is_err());
    }
}
