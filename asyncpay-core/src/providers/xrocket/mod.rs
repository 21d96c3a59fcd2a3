//! xRocket Pay
//!
//! JSON API authenticated by the `Rocket-Pay-Key` header; payloads are
//! wrapped in `{"success": true, "data": ...}`.

mod client;
pub mod types;

pub use client::{
    InvoiceOptions, MultiChequeEdit, MultiChequeOptions, SubscriptionOptions, XrocketClient,
};
