//! crystalPay payment gateway (API v2)
//!
//! Every call is a JSON POST carrying `auth_login` and `auth_secret`.
//! Payoff and swap confirmations are signed with SHA-1 and the salt.

mod client;
pub mod types;

pub use client::{CrystalPayClient, InvoiceOptions, PayoffOptions, SubtractFrom};
