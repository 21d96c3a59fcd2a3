//! platega payment gateway
//!
//! Authenticated by `X-MerchantId`/`X-Secret` headers. Responses are JSON
//! served as `text/plain`.

mod client;
pub mod types;

pub use client::{OrderOptions, PlategaClient};
