//! Thin JSON-over-HTTP client for the admin backend.

use std::time::Duration;

use reqwest::{header, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use console_core::error::DomainError;
use console_shared::config::ApiSettings;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| DomainError::NetworkError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base_url}{path}` with the bearer token, decoded as JSON.
    pub async fn get_json(&self, path: &str) -> Result<Value, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url).header(header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected credentials for {}", path);
            return Err(DomainError::Unauthorized);
        }
        if !status.is_success() {
            return Err(DomainError::BackendError(format!("HTTP {} for {}", status.as_u16(), path)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DomainError::MalformedPayload(e.to_string()))
    }
}
