use std::time::Duration;

use gaugesync_core::reading::Thresholds;
use gaugesync_widget::WidgetBinding;

use crate::supervisor::RetryPolicy;

/// Default seconds between a failed sync cycle and the next one.
const DEFAULT_RETRY_DELAY_SECS: u64 = 10;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Widget configuration loaded from environment variables.
///
/// Static for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Hub base URL, e.g. `http://homeassistant.local:8123`.
    pub hub_url: String,
    /// Long-lived access token presented as a bearer token.
    pub auth_token: String,
    pub heater_sensor_id: String,
    pub tank_sensor_id: String,
    pub heater: Thresholds,
    pub tank: Thresholds,
    pub retry: RetryPolicy,
}

impl MonitorConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `HASS_URL`              | --      |
    /// | `HASS_TOKEN`            | --      |
    /// | `HEATER_SENSOR_ID`      | --      |
    /// | `TANK_SENSOR_ID`        | --      |
    /// | `HEATER_WARNING`        | `0`     |
    /// | `HEATER_LOW`            | `0`     |
    /// | `TANK_WARNING`          | `0`     |
    /// | `TANK_LOW`              | `0`     |
    /// | `SYNC_RETRY_DELAY_SECS` | `10`    |
    /// | `SYNC_RETRY_JITTER_MS`  | `0`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let heater = Thresholds::new(
            parse_or(&lookup, "HEATER_WARNING", 0.0)?,
            parse_or(&lookup, "HEATER_LOW", 0.0)?,
        );
        let tank = Thresholds::new(
            parse_or(&lookup, "TANK_WARNING", 0.0)?,
            parse_or(&lookup, "TANK_LOW", 0.0)?,
        );

        let retry = RetryPolicy {
            delay: Duration::from_secs(parse_or(
                &lookup,
                "SYNC_RETRY_DELAY_SECS",
                DEFAULT_RETRY_DELAY_SECS,
            )?),
            jitter: Duration::from_millis(parse_or(&lookup, "SYNC_RETRY_JITTER_MS", 0)?),
        };

        Ok(Self {
            hub_url: required("HASS_URL")?,
            auth_token: required("HASS_TOKEN")?,
            heater_sensor_id: required("HEATER_SENSOR_ID")?,
            tank_sensor_id: required("TANK_SENSOR_ID")?,
            heater,
            tank,
            retry,
        })
    }

    /// Widget bindings for the two configured sensors.
    pub fn bindings(&self) -> Vec<WidgetBinding> {
        vec![
            WidgetBinding::heater(self.heater_sensor_id.clone(), self.heater),
            WidgetBinding::tank(self.tank_sensor_id.clone(), self.tank),
        ]
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
