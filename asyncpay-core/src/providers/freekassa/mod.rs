//! freeKassa payment gateway (API v1)
//!
//! JSON bodies carry `shopId`, a nanosecond `nonce` and an HMAC-SHA256
//! `signature` over every other value sorted by key.

mod client;
pub mod types;

pub use client::{FreeKassaClient, ListFilter, OrderOptions};
