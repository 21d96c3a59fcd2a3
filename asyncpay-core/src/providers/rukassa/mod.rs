//! ruKassa payment gateway (API v1)

mod client;
pub mod types;

pub use client::{PaymentOptions, RuKassaClient, WithdrawOptions};
