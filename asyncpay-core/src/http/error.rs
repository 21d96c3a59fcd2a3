//! HTTP error mapping utilities

use crate::providers::adapter::ProviderKind;
use crate::providers::error::PaymentError;
use reqwest::StatusCode;
use tracing::{error, warn};
use uuid::Uuid;

/// Longest body excerpt shown when a transport error is displayed
pub(crate) const MAX_BODY_EXCERPT: usize = 2048;

/// Map a reqwest failure (connect, timeout, builder) to a PaymentError
pub fn map_transport_error(
    provider: ProviderKind,
    request_id: Uuid,
    err: reqwest::Error,
) -> PaymentError {
    if err.is_timeout() {
        warn!("Request timeout for {} [request_id: {}]", provider.name(), request_id);
        PaymentError::Timeout { provider }
    } else if err.is_builder() {
        error!(
            "Invalid request for {} [request_id: {}]: {}",
            provider.name(),
            request_id,
            err
        );
        PaymentError::InvalidRequest {
            provider,
            message: format!("{} [request_id: {}]", err, request_id),
        }
    } else if err.is_connect() {
        error!(
            "Connection error for {} [request_id: {}]: {}",
            provider.name(),
            request_id,
            err
        );
        PaymentError::Network {
            provider,
            message: format!("Connection failed: {} [request_id: {}]", err, request_id),
        }
    } else {
        error!(
            "Request error for {} [request_id: {}]: {}",
            provider.name(),
            request_id,
            err
        );
        PaymentError::Network {
            provider,
            message: format!("{} [request_id: {}]", err, request_id),
        }
    }
}

/// Generic failure for a non-2xx response without a provider error body
///
/// The whole trimmed body is kept so callers can still parse it.
pub fn map_status_error(provider: ProviderKind, status: StatusCode, body: &str) -> PaymentError {
    PaymentError::Request {
        provider,
        status: status.as_u16(),
        body: body.trim().to_string(),
    }
}

/// Body cut to [`MAX_BODY_EXCERPT`] bytes on a char boundary
pub(crate) fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= MAX_BODY_EXCERPT {
        return trimmed.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_body() {
        let err = map_status_error(ProviderKind::Aaio, StatusCode::BAD_GATEWAY, " <html>502</html> ");
        match err {
            PaymentError::Request {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, ProviderKind::Aaio);
                assert_eq!(status, 502);
                assert_eq!(body, "<html>502</html>");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_long_body_is_kept_whole() {
        let body = format!("{{\"error\": \"{}\"}}", "x".repeat(MAX_BODY_EXCERPT * 2));
        let err = map_status_error(ProviderKind::Yoomoney, StatusCode::BAD_REQUEST, &body);
        match err {
            PaymentError::Request { body: kept, .. } => assert_eq!(kept, body),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_display_truncates_on_char_boundary() {
        let body = "ж".repeat(MAX_BODY_EXCERPT);
        let err = map_status_error(ProviderKind::Yoomoney, StatusCode::INTERNAL_SERVER_ERROR, &body);
        let shown = err.to_string();
        assert!(shown.ends_with("..."));
        let prefix = "[YooMoney] request failed with HTTP 500: ";
        assert!(shown.starts_with(prefix));
        assert!(shown.len() <= prefix.len() + MAX_BODY_EXCERPT + 3);
    }

    #[test]
    fn test_short_body_is_displayed_unchanged() {
        assert_eq!(excerpt("  {\"error\": \"x\"} "), "{\"error\": \"x\"}");
    }
}
