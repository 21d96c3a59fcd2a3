//! Lolzteam Market payments
//!
//! Authenticated with a bearer JWT whose `sub` claim is the account id.

mod client;
pub mod types;

pub use client::{HistoryFilter, InvoiceFilter, InvoiceOptions, LolzClient, MARKET_URL};
