//! Scripted hub and sleeper fakes shared by the engine and supervisor tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gaugesync_core::reading::Thresholds;
use gaugesync_hass::{ChangeEvent, EventStream, HubClient, HubError, SensorReading};
use gaugesync_monitor::engine::SyncEngine;
use gaugesync_monitor::supervisor::Sleeper;
use gaugesync_widget::{assets, Document, StateProjector, WidgetBinding};

pub const HEATER_ID: &str = "sensor.geyser_charge";
pub const TANK_ID: &str = "sensor.tank_level";

/// Events delivered by one opened stream, in order.
pub type StreamScript = Vec<Result<ChangeEvent, HubError>>;

#[derive(Default)]
struct HubState {
    check_error: Option<HubError>,
    baselines: VecDeque<Result<Vec<SensorReading>, HubError>>,
    streams: VecDeque<Result<StreamScript, HubError>>,
    calls: Vec<String>,
    closes: usize,
}

/// Hub fake driven by per-cycle scripts.
///
/// Unscripted baselines return no readings; an unscripted stream open
/// fails; a stream that runs out of events reports `StreamClosed`.
#[derive(Clone, Default)]
pub struct FakeHub {
    state: Arc<Mutex<HubState>>,
}

impl FakeHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_check(self, error: HubError) -> Self {
        self.state.lock().unwrap().check_error = Some(error);
        self
    }

    pub fn baseline(self, readings: Result<Vec<SensorReading>, HubError>) -> Self {
        self.state.lock().unwrap().baselines.push_back(readings);
        self
    }

    pub fn stream(self, events: Result<StreamScript, HubError>) -> Self {
        self.state.lock().unwrap().streams.push_back(events);
        self
    }

    /// Every hub call in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn closes(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    fn record(&self, call: impl Into<String>) {
        self.state.lock().unwrap().calls.push(call.into());
    }
}

impl HubClient for FakeHub {
    type Stream = FakeStream;

    async fn check_api(&self) -> Result<(), HubError> {
        self.record("check_api");
        match self.state.lock().unwrap().check_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn fetch_readings(&self, domain: &str) -> Result<Vec<SensorReading>, HubError> {
        self.record(format!("fetch_readings:{domain}"));
        self.state
            .lock()
            .unwrap()
            .baselines
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn open_event_stream(&self) -> Result<FakeStream, HubError> {
        self.record("open_event_stream");
        let script = self
            .state
            .lock()
            .unwrap()
            .streams
            .pop_front()
            .unwrap_or_else(|| Err(HubError::Protocol("no stream scripted".into())))?;

        Ok(FakeStream {
            events: script.into(),
            hub: self.clone(),
        })
    }
}

pub struct FakeStream {
    events: VecDeque<Result<ChangeEvent, HubError>>,
    hub: FakeHub,
}

impl EventStream for FakeStream {
    async fn next_changed_state(&mut self) -> Result<ChangeEvent, HubError> {
        self.hub.record("next_changed_state");
        self.events
            .pop_front()
            .unwrap_or(Err(HubError::StreamClosed))
    }

    async fn close(self) -> Result<(), HubError> {
        self.hub.record("close");
        self.hub.state.lock().unwrap().closes += 1;
        Ok(())
    }
}

/// Sleeper that returns immediately and remembers what it was asked.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub fn reading(id: &str, value: &str) -> SensorReading {
    SensorReading {
        id: id.to_string(),
        value: value.to_string(),
    }
}

pub fn state_changed(id: &str, value: &str) -> Result<ChangeEvent, HubError> {
    event("state_changed", id, value)
}

pub fn event(event_type: &str, id: &str, value: &str) -> Result<ChangeEvent, HubError> {
    Ok(ChangeEvent {
        event_type: event_type.to_string(),
        entity_id: id.to_string(),
        new_value: value.to_string(),
    })
}

pub fn bindings() -> Vec<WidgetBinding> {
    vec![
        WidgetBinding::heater(HEATER_ID, Thresholds::new(30.0, 15.0)),
        WidgetBinding::tank(TANK_ID, Thresholds::new(40.0, 20.0)),
    ]
}

/// Engine over `hub` projecting onto the embedded widget document.
pub fn engine_with(hub: FakeHub, bindings: Vec<WidgetBinding>) -> SyncEngine<FakeHub, Document> {
    let document = assets::mount().expect("embedded assets mount");
    SyncEngine::new(hub, StateProjector::new(bindings, document))
}

pub fn engine(hub: FakeHub) -> SyncEngine<FakeHub, Document> {
    engine_with(hub, bindings())
}
