//! HTTP layer shared by every provider facade
//!
//! This module implements the transport for asyncpay, handling:
//! - One short-lived HTTP session per call
//! - Form, JSON and query encodings
//! - Response decoding and provider error dispatch
//! - Request ID generation and correlation

pub mod client;
pub mod error;

use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::error::PaymentResult;
use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

/// Request body encoding
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// Pre-serialized JSON text, sent byte for byte
    Json(String),
}

/// Everything needed to issue one HTTP call
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Unique request ID for log correlation
    pub request_id: Uuid,
}

impl RequestDescriptor {
    /// Create a descriptor with a generated request ID
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            request_id: Uuid::new_v4(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.headers.extend(headers);
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }

    pub fn json(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Json(body.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for HTTP executors
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Execute a request and decode the JSON envelope
    async fn execute_json(
        &self,
        provider: ProviderKind,
        request: RequestDescriptor,
    ) -> PaymentResult<Envelope>;

    /// Execute a request, follow redirects and return the final URL
    async fn execute_redirect(
        &self,
        provider: ProviderKind,
        request: RequestDescriptor,
    ) -> PaymentResult<String>;
}
