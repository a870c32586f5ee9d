//! REST API client for the Home Assistant HTTP endpoints.
//!
//! Wraps the two endpoints the widget needs (API check and the full
//! state list) using [`reqwest`], presenting the pre-issued long-lived
//! access token as a bearer token.

use gaugesync_core::entity::in_domain;
use url::Url;

use crate::error::HubError;
use crate::messages::EntityState;

/// HTTP client for a single Home Assistant instance.
pub struct HassApi {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl HassApi {
    /// Create a new API client.
    ///
    /// * `base_url` - hub base URL, e.g. `http://homeassistant.local:8123`.
    /// * `token`    - long-lived access token.
    pub fn new(base_url: Url, token: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: Url, token: String) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    /// Hub base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check the API is running and the token is accepted.
    ///
    /// Sends `GET /api/`; any 2xx response counts as success.
    pub async fn check_api(&self) -> Result<(), HubError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "api/")?)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Retrieve the state of every entity.
    ///
    /// Sends `GET /api/states`.
    pub async fn states(&self) -> Result<Vec<EntityState>, HubError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "api/states")?)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Retrieve the state of every entity in `domain`.
    pub async fn filter_states(&self, domain: &str) -> Result<Vec<EntityState>, HubError> {
        let mut states = self.states().await?;
        states.retain(|s| in_domain(&s.entity_id, domain));
        Ok(states)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, HubError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HubError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HubError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), HubError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Join `path` onto the hub base URL, keeping any base path prefix.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, HubError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
        .map_err(|e| HubError::InvalidUrl(format!("{base}{path}: {e}")))
}

/// Derive the WebSocket API URL from the hub base URL.
///
/// `http` becomes `ws` and `https` becomes `wss`.
pub fn websocket_url(base: &Url) -> Result<Url, HubError> {
    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(HubError::InvalidUrl(format!(
                "unsupported scheme {other:?} in {base}"
            )))
        }
    };

    let mut url = endpoint(base, "api/websocket")?;
    url.set_scheme(scheme)
        .map_err(|()| HubError::InvalidUrl(format!("cannot use {scheme} for {base}")))?;
    Ok(url)
}
