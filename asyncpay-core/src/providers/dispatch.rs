//! Per-provider failure predicates
//!
//! Each gateway reports failures with its own envelope shape. [`ProviderKind::check`]
//! turns a matching envelope into [`PaymentError::Provider`] and lets every
//! other envelope through untouched.

use crate::providers::adapter::ProviderKind;
use crate::providers::error::{PaymentError, PaymentResult};
use reqwest::StatusCode;
use serde_json::Value;

impl ProviderKind {
    /// Inspect a decoded envelope for the provider's documented error shape
    pub fn check(&self, status: StatusCode, envelope: &Value) -> PaymentResult<()> {
        let failure = match self {
            ProviderKind::Aaio => check_aaio(envelope),
            ProviderKind::CrystalPay => check_crystalpay(envelope),
            ProviderKind::CryptoBot => check_cryptobot(envelope),
            ProviderKind::Lolz => check_lolz(envelope),
            ProviderKind::RuKassa => check_rukassa(envelope),
            ProviderKind::FreeKassa => check_freekassa(envelope),
            ProviderKind::Cryptomus => check_cryptomus(status, envelope),
            ProviderKind::Xrocket => check_xrocket(status, envelope),
            ProviderKind::Payok
            | ProviderKind::APays
            | ProviderKind::Platega
            | ProviderKind::Yoomoney => check_status_error(envelope),
        };

        match failure {
            Some(message) => Err(PaymentError::provider_reported(*self, message)),
            None => Ok(()),
        }
    }
}

fn check_aaio(envelope: &Value) -> Option<String> {
    (str_field(envelope, "type") == Some("error")).then(|| message_of(envelope, "message"))
}

fn check_crystalpay(envelope: &Value) -> Option<String> {
    if !is_truthy(envelope.get("error")) {
        return None;
    }
    Some(
        envelope
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .map(render)
            .unwrap_or_else(|| "unknown error".to_string()),
    )
}

fn check_cryptobot(envelope: &Value) -> Option<String> {
    if envelope.get("ok").and_then(Value::as_bool) != Some(false) {
        return None;
    }
    let error = envelope.get("error");
    Some(
        error
            .and_then(|e| e.get("name"))
            .map(render)
            .or_else(|| error.map(render))
            .unwrap_or_else(|| "unknown error".to_string()),
    )
}

fn check_lolz(envelope: &Value) -> Option<String> {
    if let Some(error) = envelope.get("error").filter(|v| !v.is_null()) {
        return Some(
            envelope
                .get("error_description")
                .filter(|v| !v.is_null())
                .map(render)
                .unwrap_or_else(|| render(error)),
        );
    }
    envelope
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .map(render)
}

fn check_rukassa(envelope: &Value) -> Option<String> {
    envelope
        .get("error")
        .filter(|v| !v.is_null())
        .map(|error| {
            envelope
                .get("message")
                .filter(|v| !v.is_null())
                .map(render)
                .unwrap_or_else(|| render(error))
        })
}

fn check_freekassa(envelope: &Value) -> Option<String> {
    let described = envelope.get("description").is_some_and(|v| !v.is_null());
    (str_field(envelope, "type") == Some("error") && !described)
        .then(|| message_of(envelope, "message"))
}

fn check_cryptomus(status: StatusCode, envelope: &Value) -> Option<String> {
    let state = envelope.get("state").and_then(Value::as_i64);
    match state {
        Some(0) if status.is_success() => None,
        Some(0) => Some(message_of(envelope, "message")),
        Some(_) => Some(
            envelope
                .get("errors")
                .filter(|v| !v.is_null())
                .map(render_errors)
                .unwrap_or_else(|| message_of(envelope, "message")),
        ),
        None if !status.is_success() && envelope.get("message").is_some() => {
            Some(message_of(envelope, "message"))
        }
        None => None,
    }
}

fn check_xrocket(status: StatusCode, envelope: &Value) -> Option<String> {
    match envelope.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let mut message = message_of(envelope, "message");
            let details: Vec<String> = envelope
                .get("errors")
                .and_then(Value::as_array)
                .map(|errors| {
                    errors
                        .iter()
                        .map(|e| {
                            format!(
                                "{}: {}",
                                e.get("property").map(render).unwrap_or_default(),
                                e.get("error").map(render).unwrap_or_default()
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();
            if !details.is_empty() {
                message = format!("{message} ({})", details.join("; "));
            }
            Some(message)
        }
        Some(true) if !status.is_success() => {
            let code = envelope
                .get("statusCode")
                .map(render)
                .unwrap_or_else(|| status.as_u16().to_string());
            Some(format!("{code}: {}", message_of(envelope, "message")))
        }
        _ => None,
    }
}

fn check_status_error(envelope: &Value) -> Option<String> {
    if str_field(envelope, "status") != Some("error") {
        return None;
    }
    let text = envelope
        .get("text")
        .or_else(|| envelope.get("error_text"))
        .filter(|v| !v.is_null())
        .map(render)
        .unwrap_or_else(|| "unknown error".to_string());
    Some(match envelope.get("error_code").filter(|v| !v.is_null()) {
        Some(code) => format!("{text} (code {})", render(code)),
        None => text,
    })
}

fn str_field<'a>(envelope: &'a Value, key: &str) -> Option<&'a str> {
    envelope.get(key).and_then(Value::as_str)
}

fn message_of(envelope: &Value, key: &str) -> String {
    envelope
        .get(key)
        .filter(|v| !v.is_null())
        .map(render)
        .unwrap_or_else(|| "unknown error".to_string())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Strings without quotes, everything else as compact JSON
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cryptomus validation errors come as `{field: [messages]}`
fn render_errors(errors: &Value) -> String {
    match errors {
        Value::Object(map) => map
            .iter()
            .map(|(field, messages)| {
                let text = match messages {
                    Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
                    other => render(other),
                };
                format!("{field}: {text}")
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join("; "),
        other => render(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn message(result: PaymentResult<()>) -> String {
        match result {
            Err(PaymentError::Provider { message, .. }) => message,
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_aaio_error_shape() {
        let envelope = json!({"type": "error", "message": "bad signature"});
        let err = ProviderKind::Aaio.check(StatusCode::OK, &envelope);
        assert!(message(err).contains("bad signature"));
    }

    #[test]
    fn test_aaio_success_passes() {
        let envelope = json!({"type": "success", "balance": 10.0});
        assert!(ProviderKind::Aaio.check(StatusCode::OK, &envelope).is_ok());
    }

    #[test]
    fn test_cryptomus_nonzero_state() {
        let envelope = json!({"state": 1, "message": "Invalid API key"});
        let err = ProviderKind::Cryptomus.check(StatusCode::OK, &envelope);
        assert!(message(err).contains("Invalid API key"));
    }

    #[test]
    fn test_cryptomus_zero_state_passes() {
        let envelope = json!({"state": 0, "result": {"uuid": "abc"}});
        assert!(ProviderKind::Cryptomus.check(StatusCode::OK, &envelope).is_ok());
    }

    #[test]
    fn test_cryptomus_validation_errors_preferred() {
        let envelope = json!({
            "state": 1,
            "message": "Validation failed",
            "errors": {"amount": ["The amount field is required."]}
        });
        let err = ProviderKind::Cryptomus.check(StatusCode::UNPROCESSABLE_ENTITY, &envelope);
        assert_eq!(message(err), "amount: The amount field is required.");
    }

    #[test]
    fn test_cryptomus_zero_state_with_failed_status() {
        let envelope = json!({"state": 0, "message": "Not found"});
        let err = ProviderKind::Cryptomus.check(StatusCode::NOT_FOUND, &envelope);
        assert_eq!(message(err), "Not found");
    }

    #[test]
    fn test_xrocket_error_list_is_formatted() {
        let envelope = json!({
            "success": false,
            "message": "Bad request",
            "errors": [{"property": "amount", "error": "must be positive"}]
        });
        let err = ProviderKind::Xrocket.check(StatusCode::BAD_REQUEST, &envelope);
        assert_eq!(message(err), "Bad request (amount: must be positive)");
    }

    #[test]
    fn test_xrocket_success_with_failed_status() {
        let envelope = json!({"success": true, "statusCode": 404, "message": "Cheque not found"});
        let err = ProviderKind::Xrocket.check(StatusCode::NOT_FOUND, &envelope);
        assert_eq!(message(err), "404: Cheque not found");
    }

    #[test]
    fn test_payok_error_with_code() {
        let envelope = json!({"status": "error", "text": "Wrong API key", "error_code": 3});
        let err = ProviderKind::Payok.check(StatusCode::OK, &envelope);
        assert_eq!(message(err), "Wrong API key (code 3)");
    }

    #[test]
    fn test_freekassa_error_with_description_passes() {
        let envelope = json!({"type": "error", "description": "Currency disabled"});
        assert!(ProviderKind::FreeKassa.check(StatusCode::OK, &envelope).is_ok());
    }

    #[test]
    fn test_lolz_falls_back_to_error_code() {
        let envelope = json!({"error": "invalid_token"});
        let err = ProviderKind::Lolz.check(StatusCode::UNAUTHORIZED, &envelope);
        assert_eq!(message(err), "invalid_token");
    }

    #[test_case(ProviderKind::CrystalPay, json!({"error": true, "errors": ["Wrong signature"]}), "Wrong signature" ; "crystalpay")]
    #[test_case(ProviderKind::CryptoBot, json!({"ok": false, "error": {"code": 400, "name": "AMOUNT_TOO_SMALL"}}), "AMOUNT_TOO_SMALL" ; "cryptobot")]
    #[test_case(ProviderKind::Lolz, json!({"error": "invalid_token", "error_description": "Token expired"}), "Token expired" ; "lolz error description")]
    #[test_case(ProviderKind::Lolz, json!({"errors": ["Insufficient funds"]}), "Insufficient funds" ; "lolz errors list")]
    #[test_case(ProviderKind::RuKassa, json!({"error": 300, "message": "Shop not found"}), "Shop not found" ; "rukassa")]
    #[test_case(ProviderKind::FreeKassa, json!({"type": "error", "message": "Wrong signature"}), "Wrong signature" ; "freekassa")]
    #[test_case(ProviderKind::APays, json!({"status": "error", "error_text": "Bad sign"}), "Bad sign" ; "apays")]
    fn test_failure_predicates(kind: ProviderKind, envelope: Value, expected: &str) {
        let err = kind.check(StatusCode::OK, &envelope);
        assert_eq!(message(err), expected);
    }

    #[test_case(ProviderKind::CrystalPay, json!({"error": false, "errors": []}) ; "crystalpay")]
    #[test_case(ProviderKind::CryptoBot, json!({"ok": true, "result": {}}) ; "cryptobot")]
    #[test_case(ProviderKind::Lolz, json!({"errors": [], "user": {}}) ; "lolz")]
    #[test_case(ProviderKind::RuKassa, json!({"id": 1, "url": "https://pay"}) ; "rukassa")]
    #[test_case(ProviderKind::Xrocket, json!({"success": true, "data": {}}) ; "xrocket")]
    #[test_case(ProviderKind::Yoomoney, json!({"status": "success"}) ; "yoomoney")]
    #[test_case(ProviderKind::Platega, json!({"status": "PENDING"}) ; "platega")]
    fn test_success_envelopes_pass(kind: ProviderKind, envelope: Value) {
        assert!(kind.check(StatusCode::OK, &envelope).is_ok());
    }
}
