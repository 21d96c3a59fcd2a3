//! Request signature templates
//!
//! Pure functions, one per provider template. Field order inside every
//! template is fixed by the provider; all digests are lower-case hex.

use crate::providers::adapter::BoolEncoding;
use crate::providers::params::ParameterSet;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

fn sha1_hex(input: &str) -> String {
    hex::encode(Sha1::digest(input.as_bytes()))
}

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// aaio: `SHA256(shopId:amount:currency:secret:orderId)`
pub fn aaio(shop_id: &str, amount: &str, currency: &str, secret: &str, order_id: &str) -> String {
    sha256_hex(&[shop_id, amount, currency, secret, order_id].join(":"))
}

/// apays: `MD5(orderId:amount:secret)`, or `MD5(orderId:secret)` without an amount
pub fn apays(order_id: &str, amount: Option<&str>, secret: &str) -> String {
    match amount {
        Some(amount) => md5_hex(&format!("{order_id}:{amount}:{secret}")),
        None => md5_hex(&format!("{order_id}:{secret}")),
    }
}

/// cryptomus: `MD5(base64(body) + key)`; an empty body signs as the key alone
pub fn cryptomus(body: &str, key: &str) -> String {
    let encoded = if body.is_empty() {
        String::new()
    } else {
        STANDARD.encode(body.as_bytes())
    };
    md5_hex(&format!("{encoded}{key}"))
}

/// crystalPay payoff creation: `SHA1(amount:method:wallet:salt)`
pub fn crystalpay_payoff(amount: &str, method: &str, wallet: &str, salt: &str) -> String {
    sha1_hex(&format!("{amount}:{method}:{wallet}:{salt}"))
}

/// crystalPay payoff submit/cancel and swap submit: `SHA1(id:salt)`
pub fn crystalpay_id(id: &str, salt: &str) -> String {
    sha1_hex(&format!("{id}:{salt}"))
}

/// freeKassa: `HMAC-SHA256(apiKey, values sorted by key joined with '|')`
pub fn freekassa(params: &ParameterSet, api_key: &str) -> String {
    let message = params
        .sorted()
        .into_iter()
        .map(|(_, value)| value.render(BoolEncoding::Lowercase))
        .collect::<Vec<_>>()
        .join("|");
    let mut mac = match HmacSha256::new_from_slice(api_key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any length"),
    };
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// payok pay link: `MD5(amount|payment|shopId|currency|desc|secretKey)`
pub fn payok(
    amount: &str,
    payment: &str,
    shop_id: &str,
    currency: &str,
    desc: &str,
    secret: &str,
) -> String {
    md5_hex(&[amount, payment, shop_id, currency, desc, secret].join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aaio_vector() {
        assert_eq!(
            aaio("shop1", "10.5", "RUB", "secret1", "order123"),
            "ec2f89d4a0d6d15b4ae311f975e91e5369e904ad8e5cd5d5095165d36a7f2c31"
        );
    }

    #[test]
    fn test_aaio_single_byte_change() {
        assert_eq!(
            aaio("shop1", "10.5", "RUB", "secret1", "order124"),
            "859b70782b8ad2c3f35720a9f9be0232148d95a80d4eafc75e8b7baf5e383ca4"
        );
    }

    #[test]
    fn test_apays_vectors() {
        assert_eq!(
            apays("order1", Some("1000"), "secret"),
            "02126733f8a581ab7a353641a6321387"
        );
        assert_eq!(apays("order1", None, "secret"), "f47c6a976ee2f4292a1f0c1fa8d63491");
    }

    #[test]
    fn test_cryptomus_vectors() {
        let body = r#"{"amount":"10","currency":"USDT"}"#;
        assert_eq!(cryptomus(body, "paykey"), "d862abf271c96c32b54d9555f9d41d37");
        assert_eq!(cryptomus(body, "payoutkey"), "a7cbba81061dea380bbd71ebc6983d6d");
        assert_eq!(cryptomus("", "paykey"), "c387bfee685058b13dd97c15d150a44e");
    }

    #[test]
    fn test_crystalpay_vectors() {
        assert_eq!(
            crystalpay_payoff("10.5", "BITCOIN", "wallet1", "salt"),
            "b27bc36cc99e758c7296bf4abfdc89954ea7ad0d"
        );
        assert_eq!(
            crystalpay_id("payoff1", "salt"),
            "ab49ebedfd994ae724f8493386120b1abb147dd0"
        );
    }

    #[test]
    fn test_freekassa_sorts_by_key() {
        let params = ParameterSet::new()
            .with("shopId", 1)
            .with("nonce", 1700000000i64)
            .with("currency", "RUB");
        assert_eq!(
            freekassa(&params, "apikey"),
            "b437183ea799387476dce83bed7de3deb1c5bb62d5e38ab7b26a6d779db4ec54"
        );
    }

    #[test]
    fn test_freekassa_ignores_insertion_order() {
        let a = ParameterSet::new().with("b", "2").with("a", "1");
        let b = ParameterSet::new().with("a", "1").with("b", "2");
        assert_eq!(freekassa(&a, "k"), freekassa(&b, "k"));
    }

    #[test]
    fn test_payok_vector() {
        assert_eq!(
            payok("100.0", "order1", "42", "RUB", "Description", "secret"),
            "acefb285998913676131035163cb9f0c"
        );
    }
}
