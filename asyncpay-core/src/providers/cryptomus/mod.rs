//! cryptomus payment gateway
//!
//! JSON bodies signed with `MD5(base64(body) + key)`; payout calls use the
//! payout key, everything else the payment key.

mod client;
pub mod types;

pub use client::{
    CryptomusClient, CurrencyNetwork, PaymentOptions, PayoutOptions, RecurrenceOptions,
    Reference, WebhookKind,
};
