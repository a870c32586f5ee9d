//! Reconciliation engine.
//!
//! One [`SyncEngine::run_cycle`] call is one full pass: a baseline pull
//! of every sensor state, then an indefinite stream of state changes.
//! The pass ends only when the hub fails, and the error is handed back
//! to the caller. The engine never retries on its own.

use gaugesync_core::entity::{in_domain, SENSOR_DOMAIN};
use gaugesync_hass::{ChangeEvent, EventStream, HubClient, STATE_CHANGED};
use gaugesync_widget::{StateProjector, UiSink};

use crate::error::CycleError;

/// Where the engine is within the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Pulling the full sensor state.
    Baseline,
    /// Consuming live change events.
    Streaming,
    /// The cycle has ended with an error.
    Failed,
}

/// Keeps the widget in step with the hub.
pub struct SyncEngine<H, S> {
    hub: H,
    projector: StateProjector<S>,
    phase: SyncPhase,
}

impl<H, S> SyncEngine<H, S>
where
    H: HubClient,
    S: UiSink,
{
    pub fn new(hub: H, projector: StateProjector<S>) -> Self {
        Self {
            hub,
            projector,
            phase: SyncPhase::Baseline,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn hub(&self) -> &H {
        &self.hub
    }

    pub fn projector(&self) -> &StateProjector<S> {
        &self.projector
    }

    /// Run one cycle: baseline, then streaming until the hub fails.
    ///
    /// Always returns the error that ended the cycle; the event
    /// connection, if one was opened, is closed before returning.
    pub async fn run_cycle(&mut self) -> CycleError {
        self.phase = SyncPhase::Baseline;
        if let Err(e) = self.sync_states().await {
            self.phase = SyncPhase::Failed;
            return e;
        }

        self.phase = SyncPhase::Streaming;
        let err = self.listen_states().await;
        self.phase = SyncPhase::Failed;
        err
    }

    async fn sync_states(&mut self) -> Result<(), CycleError> {
        let readings = self
            .hub
            .fetch_readings(SENSOR_DOMAIN)
            .await
            .map_err(CycleError::Baseline)?;

        tracing::info!(count = readings.len(), "Baseline sync");

        for reading in &readings {
            self.projector.apply(&reading.id, &reading.value);
        }
        Ok(())
    }

    async fn listen_states(&mut self) -> CycleError {
        let mut stream = match self.hub.open_event_stream().await {
            Ok(stream) => stream,
            Err(e) => return CycleError::Connect(e),
        };

        let err = loop {
            match stream.next_changed_state().await {
                Ok(event) => self.handle_event(&event),
                Err(e) => break CycleError::Stream(e),
            }
        };

        if let Err(e) = stream.close().await {
            tracing::debug!(error = %e, "Error closing event stream");
        }
        err
    }

    fn handle_event(&mut self, event: &ChangeEvent) {
        if event.event_type != STATE_CHANGED {
            tracing::trace!(event_type = %event.event_type, "Ignoring event");
            return;
        }
        if !in_domain(&event.entity_id, SENSOR_DOMAIN) {
            tracing::trace!(entity_id = %event.entity_id, "Ignoring non-sensor entity");
            return;
        }

        self.projector.apply(&event.entity_id, &event.new_value);
    }
}
