//! Process setup: config, assets, hub client, reachability check.
//!
//! Every failure here is a [`SetupError`] and ends the process.

use gaugesync_hass::HassClient;
use gaugesync_widget::{assets, Document, StateProjector};

use crate::config::MonitorConfig;
use crate::engine::SyncEngine;
use crate::error::SetupError;
use crate::supervisor::{Supervisor, TokioSleeper};

/// Supervisor wired to a live hub and the embedded widget document.
pub type LiveSupervisor = Supervisor<HassClient, Document, TokioSleeper>;

/// Load config from the environment and build a ready supervisor.
pub async fn setup() -> Result<LiveSupervisor, SetupError> {
    let config = MonitorConfig::from_env()?;
    setup_with(&config).await
}

/// Build a ready supervisor from an already loaded config.
pub async fn setup_with(config: &MonitorConfig) -> Result<LiveSupervisor, SetupError> {
    tracing::info!(
        module = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "Loading module",
    );

    let document = assets::mount()?;
    let projector = StateProjector::new(config.bindings(), document);

    let hub = HassClient::new(&config.hub_url, config.auth_token.clone())
        .map_err(SetupError::Client)?;

    tracing::info!(
        hub_url = %config.hub_url,
        heater = %config.heater_sensor_id,
        tank = %config.tank_sensor_id,
        "Connecting to hub",
    );

    Supervisor::start(
        SyncEngine::new(hub, projector),
        TokioSleeper,
        config.retry.clone(),
    )
    .await
}
