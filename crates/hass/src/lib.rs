//! Home Assistant REST and WebSocket client library.
//!
//! Provides the [`HubClient`](hub::HubClient) / [`EventStream`](hub::EventStream)
//! seam used by the sync engine, typed WebSocket message parsing, and the
//! concrete [`HassClient`](client::HassClient) that talks to a real hub.

pub mod api;
pub mod client;
pub mod error;
pub mod hub;
pub mod messages;

pub use client::{HassClient, HassEventStream};
pub use error::HubError;
pub use hub::{ChangeEvent, EventStream, HubClient, SensorReading, STATE_CHANGED};
