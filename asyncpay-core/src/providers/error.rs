//! Payment error types and handling

use crate::config::ConfigError;
use crate::http::error::excerpt;
use crate::providers::adapter::ProviderKind;
use std::fmt;
use thiserror::Error;

/// Result type for provider operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Errors that can occur when talking to a payment gateway
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider answered with its documented error shape
    #[error("[{provider}] {message}")]
    Provider {
        provider: ProviderKind,
        message: String,
    },

    /// Non-2xx response whose body is not a recognized provider error
    ///
    /// `body` holds the full response; only the displayed text is shortened.
    #[error("[{provider}] request failed with HTTP {status}: {}", excerpt(.body))]
    Request {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    /// Network or connection error
    #[error("[{provider}] network error: {message}")]
    Network {
        provider: ProviderKind,
        message: String,
    },

    /// Timeout configured by the caller elapsed
    #[error("[{provider}] request timed out")]
    Timeout { provider: ProviderKind },

    /// Response body could not be decoded into the expected shape
    #[error("[{provider}] failed to decode response: {message}")]
    Decode {
        provider: ProviderKind,
        message: String,
    },

    /// The request could not be assembled (bad header value, bad URL)
    #[error("[{provider}] invalid request: {message}")]
    InvalidRequest {
        provider: ProviderKind,
        message: String,
    },

    /// Well-formed response that lacks what the operation asked for
    #[error("[{provider}] unexpected response: {message}")]
    UnexpectedResponse {
        provider: ProviderKind,
        message: String,
    },

    /// Credentials rejected at construction time
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Access token does not grant a required scope
    #[error("[{provider}] token is missing the '{scope}' scope")]
    MissingScope {
        provider: ProviderKind,
        scope: String,
    },

    /// Access token could not be decoded
    #[error("[{provider}] incorrect token: {message}")]
    IncorrectToken {
        provider: ProviderKind,
        message: String,
    },

    /// OAuth token exchange failed
    #[error("[{provider}] authorization failed ({kind}): {message}")]
    Authorization {
        provider: ProviderKind,
        kind: AuthorizationErrorKind,
        message: String,
    },
}

/// OAuth failure reasons reported by the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationErrorKind {
    InvalidRequest,
    UnauthorizedClient,
    InvalidGrant,
    EmptyToken,
    Other,
}

impl AuthorizationErrorKind {
    /// Map the `error` code of a token response
    pub fn from_code(code: &str) -> Self {
        match code {
            "invalid_request" => Self::InvalidRequest,
            "unauthorized_client" => Self::UnauthorizedClient,
            "invalid_grant" => Self::InvalidGrant,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for AuthorizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::InvalidRequest => "invalid_request",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::InvalidGrant => "invalid_grant",
            Self::EmptyToken => "empty_token",
            Self::Other => "other",
        };
        f.write_str(code)
    }
}

impl PaymentError {
    /// Provider the error originated from, if any
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::Provider { provider, .. }
            | Self::Request { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider }
            | Self::Decode { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::UnexpectedResponse { provider, .. }
            | Self::MissingScope { provider, .. }
            | Self::IncorrectToken { provider, .. }
            | Self::Authorization { provider, .. } => Some(*provider),
            Self::Config(_) => None,
        }
    }

    /// Whether the provider itself reported the failure
    pub fn is_provider_reported(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Authorization { .. })
    }

    /// HTTP status for transport failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn provider_reported(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    pub(crate) fn decode(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Decode {
            provider,
            message: message.into(),
        }
    }

    pub(crate) fn unexpected(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            provider,
            message: message.into(),
        }
    }
}
