//! Provider tags and their per-provider transport rules
//!
//! Every gateway this crate talks to is one variant of [`ProviderKind`]. The
//! variant carries the rules the shared transport needs: the label used in
//! error messages, how the response body is decoded, how booleans are written
//! into form/query bodies, and (see `dispatch.rs`) the provider's failure
//! predicate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of supported payment gateways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Aaio,
    #[serde(rename = "apays")]
    APays,
    #[serde(rename = "cryptobot")]
    CryptoBot,
    Cryptomus,
    #[serde(rename = "crystalpay")]
    CrystalPay,
    #[serde(rename = "freekassa")]
    FreeKassa,
    Lolz,
    Payok,
    Platega,
    #[serde(rename = "rukassa")]
    RuKassa,
    Xrocket,
    Yoomoney,
}

/// How the transport treats the declared response content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTypePolicy {
    /// Reject bodies that are not declared as JSON
    RequireJson,
    /// Parse the body as JSON whatever the header says
    ForceJson,
}

/// How booleans are rendered into form and query bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolEncoding {
    /// `"true"` / `"false"`
    Lowercase,
    /// `"1"` / `"0"`
    Numeric,
}

impl ProviderKind {
    /// All supported providers
    pub const ALL: [ProviderKind; 12] = [
        ProviderKind::Aaio,
        ProviderKind::APays,
        ProviderKind::CryptoBot,
        ProviderKind::Cryptomus,
        ProviderKind::CrystalPay,
        ProviderKind::FreeKassa,
        ProviderKind::Lolz,
        ProviderKind::Payok,
        ProviderKind::Platega,
        ProviderKind::RuKassa,
        ProviderKind::Xrocket,
        ProviderKind::Yoomoney,
    ];

    /// Stable identifier, also used as the config section name
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Aaio => "aaio",
            ProviderKind::APays => "apays",
            ProviderKind::CryptoBot => "cryptobot",
            ProviderKind::Cryptomus => "cryptomus",
            ProviderKind::CrystalPay => "crystalpay",
            ProviderKind::FreeKassa => "freekassa",
            ProviderKind::Lolz => "lolz",
            ProviderKind::Payok => "payok",
            ProviderKind::Platega => "platega",
            ProviderKind::RuKassa => "rukassa",
            ProviderKind::Xrocket => "xrocket",
            ProviderKind::Yoomoney => "yoomoney",
        }
    }

    /// Human-readable label used as error prefix
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Aaio => "AAIO",
            ProviderKind::APays => "APays",
            ProviderKind::CryptoBot => "CryptoBot",
            ProviderKind::Cryptomus => "Cryptomus",
            ProviderKind::CrystalPay => "CrystalPay",
            ProviderKind::FreeKassa => "FreeKassa",
            ProviderKind::Lolz => "Lolzteam Market",
            ProviderKind::Payok => "Payok",
            ProviderKind::Platega => "Platega",
            ProviderKind::RuKassa => "RuKassa",
            ProviderKind::Xrocket => "xRocket",
            ProviderKind::Yoomoney => "YooMoney",
        }
    }

    /// Payok serves JSON as `text/html`, Platega as `text/plain`
    pub fn content_type_policy(&self) -> ContentTypePolicy {
        match self {
            ProviderKind::Payok | ProviderKind::Platega => ContentTypePolicy::ForceJson,
            _ => ContentTypePolicy::RequireJson,
        }
    }

    pub fn bool_encoding(&self) -> BoolEncoding {
        match self {
            ProviderKind::Lolz => BoolEncoding::Numeric,
            _ => BoolEncoding::Lowercase,
        }
    }

    /// Look a provider up by its [`name`](Self::name)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
