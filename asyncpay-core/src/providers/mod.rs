//! Payment gateway facades
//!
//! One module per gateway, each exposing a client that composes parameters,
//! signs them and hands the request to the shared transport. The plumbing
//! they share lives next to them:
//!
//! - [`adapter`]: the closed [`ProviderKind`] set and per-provider rules
//! - [`dispatch`]: per-provider failure predicates
//! - [`params`]: ordered parameters with absent values elided
//! - [`signature`]: request signature templates
//! - [`context`]: base URL and transport held by every client

pub mod adapter;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod params;
pub mod signature;

pub mod aaio;
pub mod apays;
pub mod cryptobot;
pub mod cryptomus;
pub mod crystalpay;
pub mod freekassa;
pub mod lolz;
pub mod payok;
pub mod platega;
pub mod rukassa;
pub mod xrocket;
pub mod yoomoney;

pub use adapter::{BoolEncoding, ContentTypePolicy, ProviderKind};
pub use context::ApiContext;
pub use error::{AuthorizationErrorKind, PaymentError, PaymentResult};
pub use params::{ParamValue, ParameterSet};

// Re-export concrete clients
pub use aaio::AaioClient;
pub use apays::APaysClient;
pub use cryptobot::CryptoBotClient;
pub use cryptomus::CryptomusClient;
pub use crystalpay::CrystalPayClient;
pub use freekassa::FreeKassaClient;
pub use lolz::LolzClient;
pub use payok::PayokClient;
pub use platega::PlategaClient;
pub use rukassa::RuKassaClient;
pub use xrocket::XrocketClient;
pub use yoomoney::YoomoneyClient;
