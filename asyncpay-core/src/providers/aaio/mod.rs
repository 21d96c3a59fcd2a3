//! aaio payment gateway
//!
//! Form-encoded POSTs authenticated with `X-Api-Key`; payment links are
//! signed with SHA-256.

mod client;
pub mod types;

pub use client::{AaioClient, PaymentUrlOptions};
