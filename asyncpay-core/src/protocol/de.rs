//! Lenient deserializers for fields providers send as numbers or strings

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

fn value_to_f64<E: de::Error>(value: Value) -> Result<Option<f64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| E::custom("number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| E::custom(format!("expected a numeric string, got '{s}'"))),
        other => Err(E::custom(format!("expected a number, got {other}"))),
    }
}

fn value_to_string<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected a string, got {other}"))),
    }
}

/// Number or numeric string into `f64`
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    value_to_f64::<D::Error>(Value::deserialize(deserializer)?)?
        .ok_or_else(|| de::Error::custom("expected a number, got null"))
}

/// Number, numeric string or null into `Option<f64>`
pub fn opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    value_to_f64::<D::Error>(Value::deserialize(deserializer)?)
}

/// String or number into `String`
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    value_to_string::<D::Error>(Value::deserialize(deserializer)?)?
        .ok_or_else(|| de::Error::custom("expected a string, got null"))
}

/// String, number or null into `Option<String>`
pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    value_to_string::<D::Error>(Value::deserialize(deserializer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "number")]
        amount: f64,
        #[serde(default, deserialize_with = "opt_number")]
        fee: Option<f64>,
        #[serde(deserialize_with = "string")]
        id: String,
        #[serde(default, deserialize_with = "opt_string")]
        label: Option<String>,
    }

    #[test]
    fn test_accepts_strings_and_numbers() {
        let a: Amounts =
            serde_json::from_value(json!({"amount": "10.50", "fee": 1, "id": 42})).unwrap();
        assert_eq!(a.amount, 10.5);
        assert_eq!(a.fee, Some(1.0));
        assert_eq!(a.id, "42");
        assert!(a.label.is_none());
    }

    #[test]
    fn test_null_optional() {
        let a: Amounts =
            serde_json::from_value(json!({"amount": 3, "fee": null, "id": "x", "label": null}))
                .unwrap();
        assert!(a.fee.is_none());
        assert!(a.label.is_none());
    }

    #[test]
    fn test_rejects_garbage() {
        let result: Result<Amounts, _> =
            serde_json::from_value(json!({"amount": "ten", "id": "x"}));
        assert!(result.is_err());
    }
}
