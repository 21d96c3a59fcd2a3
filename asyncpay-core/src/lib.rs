//! Asyncpay Core Library
//!
//! Async client wrappers for payment-gateway REST APIs: aaio, apays,
//! Crypto Pay, cryptomus, crystalPay, freeKassa, Lolzteam Market, payok,
//! platega, ruKassa, xRocket Pay and YooMoney.
//!
//! ```no_run
//! use asyncpay_core::providers::CryptoBotClient;
//!
//! # async fn run() -> asyncpay_core::PaymentResult<()> {
//! let client = CryptoBotClient::new("1234:AAAA", false)?;
//! let app = client.get_me().await?;
//! println!("{:?}", app.name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod protocol;
pub mod providers;

pub use config::{ConfigError, PaymentsConfig, SecretString};
pub use protocol::Envelope;
pub use providers::{PaymentError, PaymentResult, ProviderKind};

/// Returns the version of the Asyncpay Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
