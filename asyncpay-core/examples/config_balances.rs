//! Load a payments config and print the balance of every configured shop
//!
//! Run with: cargo run --example config_balances -- payments.yaml

use anyhow::Result;
use asyncpay_core::config::{self, PaymentsConfig};
use asyncpay_core::providers::{
    AaioClient, CryptoBotClient, CrystalPayClient, FreeKassaClient, PayokClient, RuKassaClient,
    XrocketClient, YoomoneyClient,
};
use asyncpay_core::{PaymentError, PaymentResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn balances(config: &PaymentsConfig) -> Vec<(&'static str, PaymentResult<String>)> {
    let mut out = Vec::new();

    if config.aaio.is_some() {
        let result = async {
            let balance = AaioClient::from_config(config)?.get_balance().await?;
            Ok::<_, PaymentError>(format!("{} RUB", balance.balance))
        };
        out.push(("aaio", result.await));
    }
    if config.cryptobot.is_some() {
        let result = async {
            let balances = CryptoBotClient::from_config(config)?.get_balance().await?;
            Ok::<_, PaymentError>(balances
                .iter()
                .map(|b| format!("{} {}", b.available.unwrap_or_default(), b.currency_code))
                .collect::<Vec<_>>()
                .join(", "))
        };
        out.push(("cryptobot", result.await));
    }
    if config.crystalpay.is_some() {
        let result = async {
            let balances = CrystalPayClient::from_config(config)?.get_balance().await?;
            Ok::<_, PaymentError>(balances
                .iter()
                .map(|(method, b)| format!("{method}: {} {}", b.amount, b.currency))
                .collect::<Vec<_>>()
                .join(", "))
        };
        out.push(("crystalpay", result.await));
    }
    if config.freekassa.is_some() {
        let result = async {
            let balances = FreeKassaClient::from_config(config)?.get_balance().await?;
            Ok::<_, PaymentError>(
                balances
                    .iter()
                    .map(|b| format!("{} {}", b.value, b.currency))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };
        out.push(("freekassa", result.await));
    }
    if config.payok.is_some() {
        let result = async {
            let balance = PayokClient::from_config(config)?.get_balance().await?;
            Ok::<_, PaymentError>(format!("{} RUB", balance.balance))
        };
        out.push(("payok", result.await));
    }
    if config.rukassa.is_some() {
        let result = async {
            let balance = RuKassaClient::from_config(config)?.get_balance().await?;
            Ok::<_, PaymentError>(format!("{} RUB", balance.balance_rub))
        };
        out.push(("rukassa", result.await));
    }
    if config.xrocket.is_some() {
        let result = async {
            let info = XrocketClient::from_config(config)?.get_app_info().await?;
            Ok::<_, PaymentError>(info
                .balances
                .iter()
                .map(|b| format!("{} {}", b.balance, b.currency))
                .collect::<Vec<_>>()
                .join(", "))
        };
        out.push(("xrocket", result.await));
    }
    if config.yoomoney.is_some() {
        let result = async {
            let account = YoomoneyClient::from_config(config)?.account_info().await?;
            Ok::<_, PaymentError>(format!(
                "{} ({})",
                account.balance,
                account.currency.unwrap_or_default()
            ))
        };
        out.push(("yoomoney", result.await));
    }

    out
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "payments.yaml".to_string());
    let config = config::load(&path)?;
    info!(
        "Loaded {} provider section(s) from {}",
        config.sections().len(),
        path
    );

    for (name, result) in balances(&config).await {
        match result {
            Ok(summary) => println!("{name:>10}: {summary}"),
            Err(err) => warn!("{name}: {err}"),
        }
    }

    Ok(())
}
