//! Home Assistant hub client.
//!
//! [`HassClient`] holds the REST client and WebSocket endpoint for one
//! hub. [`HassClient::open_event_stream`](HubClient::open_event_stream)
//! performs the WebSocket auth handshake, subscribes to `state_changed`
//! and returns a live [`HassEventStream`].

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::api::{websocket_url, HassApi};
use crate::error::HubError;
use crate::hub::{ChangeEvent, EventStream, HubClient, SensorReading, STATE_CHANGED};
use crate::messages::{parse_message, ClientMessage, ServerMessage};

/// Command id of the single event subscription per connection.
const SUBSCRIPTION_ID: u64 = 1;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connection handle for one Home Assistant instance.
pub struct HassClient {
    api: HassApi,
    ws_url: Url,
    token: String,
}

impl HassClient {
    /// Create a client for the hub at `base_url` using `token`.
    ///
    /// Fails only if the URL cannot be parsed or has no WebSocket
    /// equivalent; no request is made.
    pub fn new(base_url: &str, token: String) -> Result<Self, HubError> {
        let base = Url::parse(base_url)
            .map_err(|e| HubError::InvalidUrl(format!("{base_url}: {e}")))?;
        let ws_url = websocket_url(&base)?;

        Ok(Self {
            api: HassApi::new(base, token.clone()),
            ws_url,
            token,
        })
    }

    /// WebSocket API URL (e.g. `ws://host:8123/api/websocket`).
    pub fn ws_url(&self) -> &Url {
        &self.ws_url
    }

    /// Underlying REST client.
    pub fn api(&self) -> &HassApi {
        &self.api
    }

    async fn authenticate(&self, ws: &mut WsStream) -> Result<(), HubError> {
        match next_message(ws).await? {
            ServerMessage::AuthRequired { ha_version } => {
                tracing::debug!(ha_version = ?ha_version, "Hub requested authentication");
            }
            other => {
                return Err(HubError::Protocol(format!(
                    "expected auth_required, got {other:?}"
                )))
            }
        }

        send(
            ws,
            &ClientMessage::Auth {
                access_token: &self.token,
            },
        )
        .await?;

        match next_message(ws).await? {
            ServerMessage::AuthOk { ha_version } => {
                tracing::debug!(ha_version = ?ha_version, "Hub accepted token");
                Ok(())
            }
            ServerMessage::AuthInvalid { message } => Err(HubError::Auth(
                message.unwrap_or_else(|| "invalid access token".to_string()),
            )),
            other => Err(HubError::Protocol(format!(
                "expected auth_ok, got {other:?}"
            ))),
        }
    }

    async fn subscribe(&self, ws: &mut WsStream) -> Result<(), HubError> {
        send(
            ws,
            &ClientMessage::SubscribeEvents {
                id: SUBSCRIPTION_ID,
                event_type: STATE_CHANGED,
            },
        )
        .await?;

        loop {
            match next_message(ws).await? {
                ServerMessage::Result { id, success, error } if id == SUBSCRIPTION_ID => {
                    if success {
                        return Ok(());
                    }
                    let detail = error
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .unwrap_or_else(|| "no detail".to_string());
                    return Err(HubError::Protocol(format!("subscribe_events failed: {detail}")));
                }
                other => {
                    tracing::trace!(message = ?other, "Skipping message while subscribing");
                }
            }
        }
    }
}

impl HubClient for HassClient {
    type Stream = HassEventStream;

    async fn check_api(&self) -> Result<(), HubError> {
        self.api.check_api().await
    }

    async fn fetch_readings(&self, domain: &str) -> Result<Vec<SensorReading>, HubError> {
        let states = self.api.filter_states(domain).await?;
        Ok(states
            .into_iter()
            .map(|s| SensorReading {
                id: s.entity_id,
                value: s.state,
            })
            .collect())
    }

    async fn open_event_stream(&self) -> Result<HassEventStream, HubError> {
        let (mut ws, _response) = connect_async(self.ws_url.as_str()).await?;

        self.authenticate(&mut ws).await?;
        self.subscribe(&mut ws).await?;

        tracing::info!(
            url = %self.ws_url,
            event_type = STATE_CHANGED,
            "Subscribed to hub events",
        );

        Ok(HassEventStream { ws })
    }
}

/// A live, authenticated, subscribed WebSocket connection.
pub struct HassEventStream {
    ws: WsStream,
}

impl EventStream for HassEventStream {
    async fn next_changed_state(&mut self) -> Result<ChangeEvent, HubError> {
        loop {
            match next_message(&mut self.ws).await? {
                ServerMessage::Event { id, event } if id == SUBSCRIPTION_ID => {
                    let new_value = event.data.new_state.map(|s| s.state).unwrap_or_default();
                    return Ok(ChangeEvent {
                        event_type: event.event_type,
                        entity_id: event.data.entity_id,
                        new_value,
                    });
                }
                other => {
                    tracing::trace!(message = ?other, "Skipping non-event message");
                }
            }
        }
    }

    /// Close the connection. A connection the hub already closed counts
    /// as closed.
    async fn close(mut self) -> Result<(), HubError> {
        match self.ws.close(None).await {
            Ok(()) => Ok(()),
            Err(
                tungstenite::Error::ConnectionClosed
                | tungstenite::Error::AlreadyClosed
                | tungstenite::Error::Protocol(ProtocolError::SendAfterClosing),
            ) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Read frames until a parseable text message arrives.
///
/// Ping/pong is answered by tungstenite; binary frames are ignored. A
/// close frame or the end of the stream is [`HubError::StreamClosed`].
async fn next_message(ws: &mut WsStream) -> Result<ServerMessage, HubError> {
    while let Some(frame) = ws.next().await {
        match frame? {
            Message::Text(text) => {
                return parse_message(&text)
                    .map_err(|e| HubError::Protocol(format!("malformed message: {e}")));
            }
            Message::Close(frame) => {
                tracing::info!(?frame, "Hub closed WebSocket");
                return Err(HubError::StreamClosed);
            }
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
    Err(HubError::StreamClosed)
}

async fn send(ws: &mut WsStream, message: &ClientMessage<'_>) -> Result<(), HubError> {
    let json = serde_json::to_string(message)
        .map_err(|e| HubError::Protocol(format!("cannot encode command: {e}")))?;
    ws.send(Message::Text(json)).await?;
    Ok(())
}
