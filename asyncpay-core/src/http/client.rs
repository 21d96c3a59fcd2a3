//! HTTP client implementation using reqwest

use crate::config::{redact_by_field_name, TransportConfig};
use crate::http::error::{map_status_error, map_transport_error};
use crate::http::{HttpExecutor, RequestBody, RequestDescriptor};
use crate::protocol::Envelope;
use crate::providers::adapter::{ContentTypePolicy, ProviderKind};
use crate::providers::error::{PaymentError, PaymentResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Transport that opens a fresh session for every call
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: TransportConfig,
}

/// One HTTP session, released when dropped
struct Session {
    client: Client,
    provider: ProviderKind,
    request_id: Uuid,
}

impl Session {
    fn open(config: &TransportConfig, provider: ProviderKind, request_id: Uuid) -> PaymentResult<Self> {
        let mut builder = ClientBuilder::new()
            .pool_max_idle_per_host(0)
            .user_agent(config.user_agent.as_str())
            .gzip(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| PaymentError::InvalidRequest {
            provider,
            message: format!("Failed to create HTTP client: {}", e),
        })?;
        debug!("Opened {} session [request_id: {}]", provider.name(), request_id);
        Ok(Self {
            client,
            provider,
            request_id,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(
            "Closed {} session [request_id: {}]",
            self.provider.name(),
            self.request_id
        );
    }
}

/// Raw response captured before the session is released
struct RawResponse {
    status: StatusCode,
    content_type: Option<String>,
    final_url: String,
    text: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    async fn send(
        &self,
        provider: ProviderKind,
        request: RequestDescriptor,
    ) -> PaymentResult<RawResponse> {
        let RequestDescriptor {
            method,
            url,
            headers,
            query,
            body,
            request_id,
        } = request;

        let session = Session::open(&self.config, provider, request_id)?;

        info!(
            "Executing {} {} for {} [request_id: {}]",
            method,
            url,
            provider.name(),
            request_id
        );

        let mut req_builder = session.client.request(method, &url);
        for (name, value) in &headers {
            debug!(
                "Header {}: {} [request_id: {}]",
                name,
                redact_by_field_name(self.config.log_redaction, name, value),
                request_id
            );
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }
        if !query.is_empty() {
            req_builder = req_builder.query(&query);
        }
        req_builder = match body {
            RequestBody::Empty => req_builder,
            RequestBody::Form(pairs) => req_builder.form(&pairs),
            RequestBody::Json(text) => req_builder
                .header(CONTENT_TYPE, "application/json")
                .body(text),
        };

        let response = req_builder
            .send()
            .await
            .map_err(|e| map_transport_error(provider, request_id, e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_lowercase);
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(provider, request_id, e))?;

        debug!(
            "Response status: {} ({} bytes) [request_id: {}]",
            status,
            text.len(),
            request_id
        );
        if !status.is_success() {
            warn!(
                "Request failed with status {} for {} [request_id: {}]",
                status,
                provider.name(),
                request_id
            );
        }

        Ok(RawResponse {
            status,
            content_type,
            final_url,
            text,
        })
    }
}

/// Decode a response body and run the provider's error check
///
/// Non-2xx responses always fail: with the provider's structured error when
/// the body carries one, otherwise with [`PaymentError::Request`].
pub fn decode_response(
    provider: ProviderKind,
    status: StatusCode,
    content_type: Option<&str>,
    text: &str,
) -> PaymentResult<Envelope> {
    let declared_json = content_type.is_none_or(|ct| ct.contains("json"));
    let parse_json = declared_json || provider.content_type_policy() == ContentTypePolicy::ForceJson;
    let parsed = parse_json.then(|| serde_json::from_str::<Value>(text));

    if !status.is_success() {
        if let Some(Ok(body)) = &parsed {
            provider.check(status, body)?;
        }
        return Err(map_status_error(provider, status, text));
    }

    let body = match parsed {
        Some(Ok(body)) => body,
        Some(Err(e)) => {
            return Err(PaymentError::decode(
                provider,
                format!("Invalid JSON response: {}", e),
            ))
        }
        None => {
            return Err(PaymentError::decode(
                provider,
                format!(
                    "Expected application/json, got: {}",
                    content_type.unwrap_or_default()
                ),
            ))
        }
    };

    provider.check(status, &body)?;
    Ok(Envelope::new(provider, status.as_u16(), body))
}

#[async_trait]
impl HttpExecutor for HttpClient {
    async fn execute_json(
        &self,
        provider: ProviderKind,
        request: RequestDescriptor,
    ) -> PaymentResult<Envelope> {
        let request_id = request.request_id;
        let raw = self.send(provider, request).await?;
        let envelope = decode_response(
            provider,
            raw.status,
            raw.content_type.as_deref(),
            &raw.text,
        )?;
        info!(
            "Request completed successfully for {} [request_id: {}]",
            provider.name(),
            request_id
        );
        Ok(envelope)
    }

    async fn execute_redirect(
        &self,
        provider: ProviderKind,
        request: RequestDescriptor,
    ) -> PaymentResult<String> {
        let request_id = request.request_id;
        let raw = self.send(provider, request).await?;
        if !raw.status.is_success() {
            decode_response(provider, raw.status, raw.content_type.as_deref(), &raw.text)?;
        }
        info!(
            "Redirect resolved for {} [request_id: {}]",
            provider.name(),
            request_id
        );
        Ok(raw.final_url)
    }
}
