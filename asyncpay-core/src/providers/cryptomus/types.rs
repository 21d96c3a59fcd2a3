//! cryptomus response models

use crate::protocol::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invoice lifecycle (`payment_status`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Process,
    Check,
    ConfirmCheck,
    Paid,
    PaidOver,
    Fail,
    WrongAmount,
    WrongAmountWaiting,
    Cancel,
    SystemFail,
    RefundProcess,
    RefundFail,
    RefundPaid,
    Locked,
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    /// Whether the merchant has been credited
    pub fn is_paid(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::PaidOver)
    }
}

/// Payout lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Process,
    Check,
    Paid,
    Fail,
    Cancel,
    SystemFail,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub balance: f64,
    pub currency_code: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub balance_usd: Option<f64>,
}

/// Merchant and personal wallet balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    #[serde(default)]
    pub merchant: Vec<Balance>,
    #[serde(default)]
    pub user: Vec<Balance>,
}

/// Invoice as returned by creation, info and history calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub uuid: String,
    pub order_id: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payment_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payment_amount_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payer_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payer_amount_exchange_rate: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub discount_percent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub discount: Option<f64>,
    #[serde(default)]
    pub payer_currency: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub comments: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub merchant_amount: Option<f64>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "from", default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    pub payment_status: InvoiceStatus,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expired_at: Option<i64>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    pub is_final: Option<bool>,
    #[serde(default)]
    pub additional_data: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(default)]
    pub address_qr_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticWallet {
    pub wallet_uuid: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Base64 `data:` URI of a QR image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedWallet {
    pub uuid: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedAddressRefund {
    #[serde(default, deserialize_with = "de::opt_number")]
    pub commission: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLimit {
    #[serde(default, deserialize_with = "de::opt_number")]
    pub min_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub max_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCommission {
    #[serde(default, deserialize_with = "de::opt_number")]
    pub fee_amount: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub percent: Option<f64>,
}

/// A currency/network pair available for payments or payouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub network: String,
    pub currency: String,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub limit: Option<ServiceLimit>,
    #[serde(default)]
    pub commission: Option<ServiceCommission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginate {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub has_pages: Option<bool>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub previous_cursor: Option<String>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistory {
    #[serde(default)]
    pub items: Vec<Payment>,
    #[serde(default)]
    pub paginate: Option<Paginate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub uuid: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    pub status: PayoutStatus,
    #[serde(default)]
    pub is_final: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub payer_currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payer_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutHistory {
    #[serde(default)]
    pub merchant_uuid: Option<String>,
    #[serde(default)]
    pub items: Vec<Payout>,
    #[serde(default)]
    pub paginate: Option<Paginate>,
}

/// Result of a transfer between personal and business wallets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransfer {
    pub user_wallet_transaction_uuid: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub user_wallet_balance: Option<f64>,
    pub merchant_transaction_uuid: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub merchant_balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payer_currency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payer_amount_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub payer_amount: Option<f64>,
    #[serde(default)]
    pub url_callback: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub last_pay_off: Option<String>,
    #[serde(default)]
    pub additional_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceList {
    #[serde(default)]
    pub merchant_uuid: Option<String>,
    #[serde(default)]
    pub items: Vec<Recurrence>,
    #[serde(default)]
    pub paginate: Option<Paginate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    #[serde(deserialize_with = "de::number")]
    pub course: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub currency: String,
    pub network: String,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub discount: Option<f64>,
}
