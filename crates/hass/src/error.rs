//! Error type shared by every hub operation.

/// Errors from talking to the hub, over REST or WebSocket.
///
/// Any of these ends the current sync cycle.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The configured hub URL cannot be turned into an endpoint.
    #[error("Invalid hub URL: {0}")]
    InvalidUrl(String),

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The hub returned a non-2xx status code.
    #[error("Hub API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// WebSocket transport failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The hub rejected the access token.
    #[error("Authentication rejected: {0}")]
    Auth(String),

    /// The hub sent something the client did not expect.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The event connection was closed by the hub or ran dry.
    #[error("Event stream closed")]
    StreamClosed,
}
