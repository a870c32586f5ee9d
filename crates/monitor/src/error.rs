use gaugesync_hass::HubError;
use gaugesync_widget::document::AssetError;

use crate::config::ConfigError;

/// Unrecoverable startup failures. The process logs one and exits.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Could not parse config: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not load widget assets: {0}")]
    Assets(#[from] AssetError),

    #[error("Could not create hub client: {0}")]
    Client(#[source] HubError),

    #[error("Could not connect to home assistant: {0}")]
    Unreachable(#[source] HubError),
}

/// A failed sync cycle. The supervisor logs it and starts over.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// The baseline state pull failed.
    #[error("getting states: {0}")]
    Baseline(#[source] HubError),

    /// The event connection could not be opened.
    #[error("calling listen: {0}")]
    Connect(#[source] HubError),

    /// The event connection failed while streaming.
    #[error("listening for event: {0}")]
    Stream(#[source] HubError),
}

impl CycleError {
    /// Short name of the operation that failed, for log fields.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Baseline(_) => "sync_states",
            Self::Connect(_) => "open_event_stream",
            Self::Stream(_) => "next_changed_state",
        }
    }
}
