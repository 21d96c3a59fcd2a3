//! Configuration module
//!
//! Credentials for each gateway and shared transport settings, loadable from
//! YAML or JSON with `${VAR}` environment interpolation.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{interpolate_env_vars, interpolate_with};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{
    AaioCredentials, APaysCredentials, Credentials, CryptoBotCredentials, CryptomusCredentials,
    CrystalPayCredentials, FreeKassaCredentials, LolzCredentials, PaymentsConfig,
    PayokCredentials, PlategaCredentials, RuKassaCredentials, TransportConfig,
    XrocketCredentials, YoomoneyCredentials,
};
pub use secrets::{is_sensitive_field, redact_by_field_name, RedactionPolicy, SecretString};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

fn read(path: &Path) -> Result<String, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    // Interpolate environment variables before parsing
    env::interpolate_env_vars(&content)
}

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> Result<PaymentsConfig, ConfigError> {
    let path = path.as_ref();
    let interpolated = read(path)?;

    let config: PaymentsConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<PaymentsConfig, ConfigError> {
    let path = path.as_ref();
    let interpolated = read(path)?;

    let config: PaymentsConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load by file extension (`.yaml`/`.yml` or `.json`)
pub fn load<P: AsRef<Path>>(path: P) -> Result<PaymentsConfig, ConfigError> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(path),
        Some("json") => load_from_json(path),
        other => Err(ConfigError::Invalid {
            message: format!(
                "unsupported config extension '{}' for {}",
                other.unwrap_or(""),
                path.display()
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
transport:
  user_agent: shop/1.0
  timeout_secs: 20
  log_redaction: partial
aaio:
  api_key: key
  shop_id: "42"
  secret_key: secret
cryptobot:
  token: "1:AA"
  testnet: true
"#;
        let config: PaymentsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.transport.user_agent, "shop/1.0");
        assert_eq!(config.transport.log_redaction, RedactionPolicy::Partial);
        assert_eq!(config.aaio.as_ref().unwrap().shop_id, "42");
        assert!(config.cryptobot.as_ref().unwrap().testnet);
        assert!(ConfigValidator::new().validate(&config).is_ok());
    }
}
