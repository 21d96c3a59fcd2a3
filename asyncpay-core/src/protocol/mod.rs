//! Response envelope and shared model helpers
//!
//! Provider models live next to their facades; this module holds what every
//! provider shares: the decoded [`Envelope`] and lenient field deserializers.

pub mod de;
pub mod types;

pub use types::{Envelope, NumberOrString};
