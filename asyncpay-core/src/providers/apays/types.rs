//! apays response models

use serde::{Deserialize, Serialize};

/// Lifecycle of an apays order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approve,
    Decline,
    Expired,
    #[serde(other)]
    Unknown,
}

/// Answer of `create_order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub status: Option<bool>,
    /// Payment page for the buyer
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
}
