//! apays payment gateway

mod client;
pub mod types;

pub use client::APaysClient;
