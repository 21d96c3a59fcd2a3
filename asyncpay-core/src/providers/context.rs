//! Shared plumbing behind every provider facade
//!
//! An [`ApiContext`] pins a provider tag, its base URL and the transport.
//! Facades compose parameters and signatures, then hand the finished
//! [`RequestDescriptor`] to [`ApiContext::send`].

use crate::config::{ConfigError, Credentials, TransportConfig};
use crate::http::client::HttpClient;
use crate::http::{HttpExecutor, RequestDescriptor};
use crate::protocol::Envelope;
use crate::providers::adapter::ProviderKind;
use crate::providers::error::PaymentResult;
use crate::providers::params::ParameterSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Provider tag, base URL and transport shared by one facade
#[derive(Clone)]
pub struct ApiContext {
    kind: ProviderKind,
    base_url: String,
    transport: Arc<dyn HttpExecutor>,
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiContext {
    /// Context using the default reqwest transport
    pub fn new(kind: ProviderKind, base_url: impl Into<String>) -> Self {
        Self {
            kind,
            base_url: base_url.into(),
            transport: Arc::new(HttpClient::new()),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn set_transport(&mut self, transport: Arc<dyn HttpExecutor>) {
        self.transport = transport;
    }

    /// Apply the transport section and a credentials base URL override
    pub fn configure(&mut self, transport: &TransportConfig, credentials: &dyn Credentials) {
        self.transport = Arc::new(HttpClient::with_config(transport.clone()));
        if let Some(base_url) = credentials.base_url() {
            self.base_url = base_url.to_string();
        }
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Form/query pairs with this provider's boolean encoding
    pub fn pairs(&self, params: &ParameterSet) -> Vec<(String, String)> {
        params.to_pairs(self.kind.bool_encoding())
    }

    /// Issue a request expecting a JSON envelope
    pub async fn send(&self, request: RequestDescriptor) -> PaymentResult<Envelope> {
        debug!(
            "{} {} {} [request_id: {}]",
            self.kind.name(),
            request.method,
            request.url,
            request.request_id
        );
        self.transport.execute_json(self.kind, request).await
    }

    /// Issue a request and return the URL reached after redirects
    pub async fn redirect(&self, request: RequestDescriptor) -> PaymentResult<String> {
        self.transport.execute_redirect(self.kind, request).await
    }
}

/// Validate a credentials section the way facades do at construction
pub(crate) fn validate_credentials(
    kind: ProviderKind,
    credentials: &dyn Credentials,
) -> PaymentResult<()> {
    credentials
        .validate(kind.name())
        .map_err(ConfigError::from)?;
    Ok(())
}

/// Section missing from a [`crate::config::PaymentsConfig`]
pub(crate) fn not_configured(kind: ProviderKind) -> ConfigError {
    ConfigError::ProviderNotConfigured {
        provider: kind.name().to_string(),
    }
}

/// Constructors and overrides every facade shares
///
/// The facade must keep its [`ApiContext`] in a field named `api` and provide
/// `from_credentials`.
macro_rules! facade_common {
    ($client:ty, $section:ident, $kind:expr) => {
        impl $client {
            /// Build from the matching section of a loaded config
            pub fn from_config(
                config: &$crate::config::PaymentsConfig,
            ) -> $crate::providers::error::PaymentResult<Self> {
                let credentials = config
                    .$section
                    .as_ref()
                    .ok_or_else(|| $crate::providers::context::not_configured($kind))?;
                let mut client = Self::from_credentials(credentials.clone())?;
                client.api.configure(&config.transport, credentials);
                Ok(client)
            }

            /// Point the facade at another host (sandboxes, mock servers)
            pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
                self.api.set_base_url(base_url);
                self
            }

            pub fn with_transport(
                mut self,
                transport: std::sync::Arc<dyn $crate::http::HttpExecutor>,
            ) -> Self {
                self.api.set_transport(transport);
                self
            }

            pub fn base_url(&self) -> &str {
                self.api.base_url()
            }
        }
    };
}

pub(crate) use facade_common;
