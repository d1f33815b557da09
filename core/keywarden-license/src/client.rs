//! HTTP client for the licensing endpoint.

use crate::error::{LicenseError, LicenseResult};
use crate::protocol::{Action, LicenseResponse};
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One licensing request. The form encoding handles URL-escaping of the
/// item name and site URL.
#[derive(Debug, Clone)]
pub struct LicenseRequest<'a> {
    pub action: Action,
    pub license: &'a str,
    pub item_id: &'a str,
    pub item_name: &'a str,
    pub site_url: &'a str,
    pub environment: &'a str,
}

/// A thin wrapper over [`reqwest::Client`] bound to one endpoint.
///
/// No retries and no cancellation: a request runs to completion or to the
/// configured timeout, then the outcome surfaces immediately.
#[derive(Debug, Clone)]
pub struct ActivationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ActivationClient {
    /// Builds a client for `endpoint` with the given per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> LicenseResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LicenseError::Config(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Sends one licensing request and decodes the reply envelope.
    ///
    /// # Errors
    ///
    /// `Transient` on connect/timeout failures and non-success HTTP
    /// statuses; `MalformedResponse` when the body is not a JSON envelope.
    pub async fn send(&self, req: &LicenseRequest<'_>) -> LicenseResult<LicenseResponse> {
        let form = [
            ("edd_action", req.action.as_str()),
            ("license", req.license),
            ("item_id", req.item_id),
            ("item_name", req.item_name),
            ("url", req.site_url),
            ("environment", req.environment),
        ];

        let response = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| LicenseError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LicenseError::Transient(format!("server replied {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LicenseError::Transient(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| LicenseError::MalformedResponse(e.to_string()))
    }
}
