//! Home Assistant WebSocket and REST message types.
//!
//! WebSocket frames are JSON objects tagged by a `"type"` field. This
//! module deserializes server frames into a strongly-typed
//! [`ServerMessage`] enum and serializes the two client commands the
//! widget needs.

use serde::{Deserialize, Serialize};

/// Entity state as returned by `GET /api/states` and embedded in
/// `state_changed` events.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityState {
    #[serde(default)]
    pub entity_id: String,
    pub state: String,
}

/// Server-to-client WebSocket messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First frame on a new connection; the client must authenticate.
    AuthRequired {
        #[serde(default)]
        ha_version: Option<String>,
    },

    /// The access token was accepted.
    AuthOk {
        #[serde(default)]
        ha_version: Option<String>,
    },

    /// The access token was rejected.
    AuthInvalid {
        #[serde(default)]
        message: Option<String>,
    },

    /// Reply to a numbered command.
    Result {
        id: u64,
        success: bool,
        #[serde(default)]
        error: Option<ResultError>,
    },

    /// An event for an active subscription.
    Event { id: u64, event: EventEnvelope },

    /// Message types the widget does not use (`pong`, ...).
    #[serde(other)]
    Other,
}

/// Error detail attached to a failed command result.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultError {
    pub code: String,
    pub message: String,
}

/// Event payload of an `event` message.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    pub event_type: String,
    #[serde(default)]
    pub data: StateChangedData,
}

/// Data of a `state_changed` event. Other event types leave it empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateChangedData {
    #[serde(default)]
    pub entity_id: String,
    /// `None` when the entity was removed.
    #[serde(default)]
    pub new_state: Option<EntityState>,
}

/// Client-to-server WebSocket commands.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage<'a> {
    /// Answer to `auth_required`.
    Auth { access_token: &'a str },

    /// Subscribe to one event type on the bus.
    SubscribeEvents { id: u64, event_type: &'a str },
}

/// Parse a WebSocket text frame from the hub.
pub fn parse_message(text: &str) -> Result<ServerMessage, serde_json::Error> {
    serde_json::from_str(text)
}
