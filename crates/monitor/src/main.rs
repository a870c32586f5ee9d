//! `gaugesync` -- geyser and tank gauge widget.
//!
//! Mirrors two Home Assistant sensors (water-heater charge and tank
//! level) onto the widget gauges, re-syncing from scratch whenever the
//! hub connection breaks.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default | Description                         |
//! |-------------------------|----------|---------|-------------------------------------|
//! | `HASS_URL`              | yes      | --      | Hub base URL, e.g. `http://host:8123` |
//! | `HASS_TOKEN`            | yes      | --      | Long-lived access token             |
//! | `HEATER_SENSOR_ID`      | yes      | --      | Heater charge entity id             |
//! | `TANK_SENSOR_ID`        | yes      | --      | Tank level entity id                |
//! | `HEATER_WARNING`        | no       | `0`     | Heater warning threshold            |
//! | `HEATER_LOW`            | no       | `0`     | Heater low threshold                |
//! | `TANK_WARNING`          | no       | `0`     | Tank warning threshold              |
//! | `TANK_LOW`              | no       | `0`     | Tank low threshold                  |
//! | `SYNC_RETRY_DELAY_SECS` | no       | `10`    | Seconds between sync cycles         |
//! | `SYNC_RETRY_JITTER_MS`  | no       | `0`     | Max random extra wait               |

use gaugesync_monitor::bootstrap;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gaugesync_monitor=info,gaugesync_hass=info,gaugesync_widget=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let supervisor = match bootstrap::setup().await {
        Ok(supervisor) => supervisor,
        Err(e) => {
            tracing::error!(error = %e, "Could not setup module");
            std::process::exit(1);
        }
    };

    supervisor.run().await;
}
