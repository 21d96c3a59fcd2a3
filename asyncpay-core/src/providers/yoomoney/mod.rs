//! YooMoney wallet API and OAuth helper

mod authorize;
mod client;
pub mod types;

pub use authorize::Authorizer;
pub use client::{HistoryFilter, ProcessOptions, QuickPayOptions, TransferOptions, YoomoneyClient};
