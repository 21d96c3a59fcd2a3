//! Crypto Pay (@CryptoBot)
//!
//! Every method is a POST with query parameters; the payload sits under
//! `result`.

mod client;
pub mod types;

pub use client::{CryptoBotClient, InvoiceOptions, ListFilter};
