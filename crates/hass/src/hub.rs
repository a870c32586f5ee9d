//! The hub seam consumed by the sync engine.
//!
//! [`HubClient`] and [`EventStream`] are implemented by
//! [`HassClient`](crate::client::HassClient) for a live hub and by
//! in-memory fakes in tests.

use std::future::Future;

use crate::error::HubError;

/// Event type carried by every entity state change.
pub const STATE_CHANGED: &str = "state_changed";

/// Current state of one entity as reported by a full state pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Entity id, e.g. `sensor.geyser_charge`.
    pub id: String,
    /// Raw state string; numeric sensors report a decimal number.
    pub value: String,
}

/// One event delivered on the live event connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub event_type: String,
    pub entity_id: String,
    /// New raw state, empty when the entity was removed.
    pub new_value: String,
}

/// Request/response side of the hub.
pub trait HubClient: Send + Sync {
    /// Live event connection type returned by [`open_event_stream`](Self::open_event_stream).
    type Stream: EventStream;

    /// Verify the hub is reachable and accepts the token.
    fn check_api(&self) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Fetch the current state of every entity in `domain`.
    fn fetch_readings(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<SensorReading>, HubError>> + Send;

    /// Open a live connection subscribed to state changes.
    fn open_event_stream(&self) -> impl Future<Output = Result<Self::Stream, HubError>> + Send;
}

/// An open live-event connection.
///
/// [`close`](Self::close) consumes the handle so it can only be released once.
pub trait EventStream: Send {
    /// Wait for the next event.
    fn next_changed_state(&mut self) -> impl Future<Output = Result<ChangeEvent, HubError>> + Send;

    /// Close the connection.
    fn close(self) -> impl Future<Output = Result<(), HubError>> + Send;
}
