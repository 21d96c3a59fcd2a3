//! Configuration schema
//!
//! One optional credentials section per provider plus transport settings:
//!
//! ```yaml
//! transport:
//!   user_agent: my-shop/1.0
//!   timeout_secs: 30
//! aaio:
//!   api_key: ${AAIO_API_KEY}
//!   shop_id: "42"
//!   secret_key: ${AAIO_SECRET}
//! cryptobot:
//!   token: ${CRYPTOBOT_TOKEN}
//!   testnet: true
//! ```

use super::error::ValidationError;
use super::secrets::{RedactionPolicy, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aaio: Option<AaioCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apays: Option<APaysCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cryptobot: Option<CryptoBotCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cryptomus: Option<CryptomusCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crystalpay: Option<CrystalPayCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freekassa: Option<FreeKassaCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lolz: Option<LolzCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payok: Option<PayokCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platega: Option<PlategaCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rukassa: Option<RuKassaCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xrocket: Option<XrocketCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoomoney: Option<YoomoneyCredentials>,
}

impl PaymentsConfig {
    /// Every configured section as `(section name, credentials)`
    pub fn sections(&self) -> Vec<(&'static str, &dyn Credentials)> {
        let mut sections: Vec<(&'static str, &dyn Credentials)> = Vec::new();
        macro_rules! push {
            ($($field:ident),*) => {
                $(if let Some(creds) = &self.$field {
                    sections.push((stringify!($field), creds));
                })*
            };
        }
        push!(
            aaio, apays, cryptobot, cryptomus, crystalpay, freekassa, lolz, payok, platega,
            rukassa, xrocket, yoomoney
        );
        sections
    }
}

/// HTTP transport settings shared by every facade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout; none by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Redaction applied to credential headers in debug logs
    #[serde(default)]
    pub log_redaction: RedactionPolicy,
}

fn default_user_agent() -> String {
    concat!("asyncpay/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
            log_redaction: RedactionPolicy::default(),
        }
    }
}

impl TransportConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Common behaviour of every credentials section
pub trait Credentials: std::fmt::Debug {
    /// Check every required field; `section` prefixes the reported field path
    fn validate(&self, section: &str) -> Result<(), ValidationError>;

    /// Base URL override, mostly for tests and sandboxes
    fn base_url(&self) -> Option<&str>;
}

fn require(section: &str, field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(format!("{section}.{field}")));
    }
    Ok(())
}

fn require_secret(section: &str, field: &str, value: &SecretString) -> Result<(), ValidationError> {
    if value.is_blank() {
        return Err(ValidationError::required(format!("{section}.{field}")));
    }
    Ok(())
}

macro_rules! credentials {
    (@check text, $section:expr, $field:expr, $value:expr) => {
        require($section, $field, $value)
    };
    (@check secret, $section:expr, $field:expr, $value:expr) => {
        require_secret($section, $field, $value)
    };
    (@check none, $section:expr, $field:expr, $value:expr) => {
        Ok::<(), ValidationError>(())
    };
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty => $check:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub base_url: Option<String>,
        }

        impl Credentials for $name {
            fn validate(&self, section: &str) -> Result<(), ValidationError> {
                $( credentials!(@check $check, section, stringify!($field), &self.$field)?; )*
                Ok(())
            }

            fn base_url(&self) -> Option<&str> {
                self.base_url.as_deref()
            }
        }
    };
}

credentials!(
    /// aaio merchant credentials
    AaioCredentials {
        api_key: SecretString => secret,
        shop_id: String => text,
        secret_key: SecretString => secret,
    }
);

credentials!(
    /// apays client credentials
    APaysCredentials {
        client_id: String => text,
        secret_key: SecretString => secret,
    }
);

credentials!(
    /// Crypto Pay API token
    CryptoBotCredentials {
        token: SecretString => secret,
        #[serde(default)]
        testnet: bool => none,
    }
);

credentials!(
    /// cryptomus merchant credentials; payouts sign with their own key
    CryptomusCredentials {
        merchant_id: String => text,
        payment_api_key: SecretString => secret,
        payout_api_key: SecretString => secret,
    }
);

credentials!(
    /// crystalPay cash register credentials
    CrystalPayCredentials {
        login: String => text,
        secret: SecretString => secret,
        salt: SecretString => secret,
    }
);

credentials!(
    /// freeKassa shop credentials
    FreeKassaCredentials {
        shop_id: String => text,
        api_key: SecretString => secret,
    }
);

credentials!(
    /// Lolzteam Market bearer token (a JWT)
    LolzCredentials {
        token: SecretString => secret,
    }
);

credentials!(
    /// payok API and shop credentials
    PayokCredentials {
        api_id: String => text,
        api_key: SecretString => secret,
        shop_id: String => text,
        secret_key: SecretString => secret,
    }
);

credentials!(
    /// platega merchant credentials
    PlategaCredentials {
        merchant_id: String => text,
        secret_key: SecretString => secret,
    }
);

credentials!(
    /// ruKassa shop token plus the account login used for balance queries
    RuKassaCredentials {
        shop_id: String => text,
        token: SecretString => secret,
        email: String => text,
        password: SecretString => secret,
    }
);

credentials!(
    /// xRocket Pay API key
    XrocketCredentials {
        api_key: SecretString => secret,
    }
);

credentials!(
    /// YooMoney OAuth access token
    YoomoneyCredentials {
        access_token: SecretString => secret,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ValidationErrorKind;

    #[test]
    fn test_empty_field_reports_path() {
        let creds = AaioCredentials {
            api_key: "key".into(),
            shop_id: String::new(),
            secret_key: "secret".into(),
            base_url: None,
        };
        let err = creds.validate("aaio").unwrap_err();
        assert_eq!(err.field_path, "aaio.shop_id");
        assert!(matches!(err.kind, ValidationErrorKind::RequiredFieldMissing));
    }

    #[test]
    fn test_blank_secret_rejected() {
        let creds = XrocketCredentials {
            api_key: "   ".into(),
            base_url: None,
        };
        assert_eq!(creds.validate("xrocket").unwrap_err().field_path, "xrocket.api_key");
    }

    #[test]
    fn test_unchecked_flag_never_fails() {
        let creds = CryptoBotCredentials {
            token: "123:AA".into(),
            testnet: false,
            base_url: None,
        };
        assert!(creds.validate("cryptobot").is_ok());
    }

    #[test]
    fn test_sections_lists_configured_providers() {
        let yaml = r#"
cryptobot:
  token: "1:AA"
yoomoney:
  access_token: "t"
"#;
        let config: PaymentsConfig = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<_> = config.sections().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["cryptobot", "yoomoney"]);
        assert!(config.transport.user_agent.starts_with("asyncpay/"));
        assert!(config.transport.timeout().is_none());
    }
}
