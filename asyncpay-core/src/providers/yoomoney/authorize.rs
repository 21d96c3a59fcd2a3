//! YooMoney OAuth flow
//!
//! 1. Send the user to [`Authorizer::authorize_url`] (or resolve it with
//!    [`Authorizer::authorize`]).
//! 2. YooMoney redirects back to `redirect_uri?code=...`.
//! 3. Trade the code for a token with [`Authorizer::request_token`].

use crate::config::SecretString;
use crate::http::RequestDescriptor;
use crate::providers::adapter::ProviderKind;
use crate::providers::context::ApiContext;
use crate::providers::error::{AuthorizationErrorKind, PaymentError, PaymentResult};
use crate::providers::params::ParameterSet;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// OAuth application registered on YooMoney
#[derive(Debug, Clone)]
pub struct Authorizer {
    api: ApiContext,
    client_id: String,
    redirect_uri: String,
    client_secret: Option<SecretString>,
    scope: Vec<String>,
}

impl Authorizer {
    pub const BASE_URL: &'static str = "https://yoomoney.ru";

    pub fn new(
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        client_secret: Option<SecretString>,
        scope: Vec<String>,
    ) -> Self {
        Self {
            api: ApiContext::new(ProviderKind::Yoomoney, Self::BASE_URL),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            client_secret,
            scope,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.set_base_url(base_url);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn crate::http::HttpExecutor>) -> Self {
        self.api.set_transport(transport);
        self
    }

    fn authorize_params(&self) -> ParameterSet {
        ParameterSet::new()
            .with("client_id", &self.client_id)
            .with("response_type", "code")
            .with("redirect_uri", &self.redirect_uri)
            .with("scope", self.scope.join(" "))
    }

    /// Consent page for the configured scopes
    pub fn authorize_url(&self) -> String {
        let query = self
            .authorize_params()
            .to_query_string(ProviderKind::Yoomoney.bool_encoding())
            .replace('+', "%20");
        format!("{}?{query}", self.api.url("/oauth/authorize"))
    }

    /// Open the authorization request and return the consent page it lands on
    pub async fn authorize(&self) -> PaymentResult<String> {
        let request = RequestDescriptor::post(self.api.url("/oauth/authorize"))
            .form(self.api.pairs(&self.authorize_params()));
        let url = self.api.redirect(request).await?;
        info!("YooMoney consent page ready");
        Ok(url)
    }

    /// Exchange a temporary code for an access token
    ///
    /// Accepts the bare code or the whole redirect URL containing `code=`.
    pub async fn request_token(&self, code_or_url: &str) -> PaymentResult<SecretString> {
        let code = extract_code(code_or_url);
        let params = ParameterSet::new()
            .with("code", code)
            .with("client_id", &self.client_id)
            .with("grant_type", "authorization_code")
            .with("redirect_uri", &self.redirect_uri)
            .with_opt(
                "client_secret",
                self.client_secret.as_ref().map(|s| s.expose_secret().to_string()),
            );
        let request =
            RequestDescriptor::post(self.api.url("/oauth/token")).form(self.api.pairs(&params));

        let body = match self.api.send(request).await {
            Ok(envelope) => envelope.into_value(),
            // The token endpoint answers 400 with an `error` code
            Err(PaymentError::Request { body, status, provider }) => {
                match serde_json::from_str::<Value>(&body) {
                    Ok(value) if value.get("error").is_some() => value,
                    _ => return Err(PaymentError::Request { provider, status, body }),
                }
            }
            Err(e) => return Err(e),
        };
        token_from(&body)
    }
}

fn extract_code(code_or_url: &str) -> String {
    let code = match code_or_url.find("code=") {
        Some(start) => &code_or_url[start + "code=".len()..],
        None => code_or_url,
    };
    code.split('&')
        .next()
        .unwrap_or_default()
        .replace(' ', "")
}

fn token_from(body: &Value) -> PaymentResult<SecretString> {
    if let Some(code) = body.get("error").and_then(Value::as_str) {
        let kind = AuthorizationErrorKind::from_code(code);
        let message = match kind {
            AuthorizationErrorKind::InvalidRequest => {
                "required query parameters are missing or invalid".to_string()
            }
            AuthorizationErrorKind::UnauthorizedClient => {
                "invalid client_id or client_secret, or the application is blocked".to_string()
            }
            AuthorizationErrorKind::InvalidGrant => {
                "the temporary code is expired or was already exchanged".to_string()
            }
            _ => code.to_string(),
        };
        return Err(PaymentError::Authorization {
            provider: ProviderKind::Yoomoney,
            kind,
            message,
        });
    }
    match body.get("access_token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(SecretString::from(token)),
        _ => Err(PaymentError::Authorization {
            provider: ProviderKind::Yoomoney,
            kind: AuthorizationErrorKind::EmptyToken,
            message: "token response is empty; request a new code".to_string(),
        }),
    }
}
