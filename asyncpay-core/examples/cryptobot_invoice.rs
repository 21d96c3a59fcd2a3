//! Create a Crypto Pay invoice and poll it until it is paid or expires
//!
//! Run with:
//!   CRYPTOBOT_TOKEN=1234:AAAA RUST_LOG=asyncpay_core=debug \
//!     cargo run --example cryptobot_invoice -- 1.5 USDT

use anyhow::{Context, Result};
use asyncpay_core::providers::cryptobot::{InvoiceOptions, ListFilter};
use asyncpay_core::providers::CryptoBotClient;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("CRYPTOBOT_TOKEN").context("CRYPTOBOT_TOKEN is not set")?;
    let testnet = std::env::var("CRYPTOBOT_TESTNET").is_ok_and(|v| v == "1");
    let mut args = std::env::args().skip(1);
    let amount: f64 = args
        .next()
        .unwrap_or_else(|| "1".to_string())
        .parse()
        .context("amount must be a number")?;
    let asset = args.next().unwrap_or_else(|| "USDT".to_string());

    let client = CryptoBotClient::new(token, testnet)?;
    let app = client.get_me().await?;
    println!("App #{} {}", app.app_id, app.name.unwrap_or_default());

    for balance in client.get_balance().await? {
        println!(
            "  {:>6}: {}",
            balance.currency_code,
            balance.available.unwrap_or_default()
        );
    }

    let invoice = client
        .create_invoice(
            amount,
            InvoiceOptions {
                asset: Some(asset),
                description: Some("asyncpay demo".to_string()),
                expires_in: Some(600),
                ..InvoiceOptions::default()
            },
        )
        .await?;
    println!(
        "Invoice {} created, pay at {}",
        invoice.invoice_id,
        invoice.bot_invoice_url.as_deref().unwrap_or("-")
    );

    for _ in 0..60 {
        tokio::time::sleep(Duration::from_secs(10)).await;
        let current = client
            .get_invoices(ListFilter {
                ids: vec![invoice.invoice_id],
                ..ListFilter::default()
            })
            .await?;
        let Some(current) = current.into_iter().next() else {
            continue;
        };
        println!("Invoice {} is {}", current.invoice_id, current.status);
        if current.status != "active" {
            break;
        }
    }

    Ok(())
}
