//! payok payment gateway
//!
//! Form bodies authenticated by `API_ID`/`API_KEY`. Responses are JSON
//! served as `text/html`.

mod client;
pub mod types;

pub use client::{CommissionType, PayFormOptions, PayokClient, PAY_FORM_URL};
