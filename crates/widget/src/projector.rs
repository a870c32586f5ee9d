//! Projects sensor readings onto the widget.
//!
//! [`StateProjector::apply`] is called for every reading the hub
//! delivers. Most of them belong to sensors the widget does not show and
//! are ignored; a bound reading is classified and written to its gauge
//! element (and, for the heater, its text readout).

use gaugesync_core::reading::{
    classify_reading, Quantity, ReadingFormatError, SeverityBand, Thresholds,
};

use crate::sink::UiSink;

/// Heater gauge element.
pub const HEATER_GAUGE: &str = "#heat";
/// Heater percentage readout.
pub const HEATER_TEXT: &str = "#geyserText .super";
/// Tank gauge element.
pub const TANK_GAUGE: &str = "#water";

/// Style variable driving the gauge fill height.
pub const PERCENTAGE_VAR: &str = "--percentage";

/// Every class the projector may set; all are cleared before each update.
const SEVERITY_CLASSES: [&str; 2] = ["low", "warning"];

/// Static mapping from a configured sensor id to its UI targets.
#[derive(Debug, Clone)]
pub struct WidgetBinding {
    pub sensor_id: String,
    pub quantity: Quantity,
    pub thresholds: Thresholds,
    pub gauge_selector: &'static str,
    pub text_selector: Option<&'static str>,
}

impl WidgetBinding {
    /// Heater charge binding: `#heat` gauge plus the text readout.
    pub fn heater(sensor_id: impl Into<String>, thresholds: Thresholds) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            quantity: Quantity::Heater,
            thresholds,
            gauge_selector: HEATER_GAUGE,
            text_selector: Some(HEATER_TEXT),
        }
    }

    /// Tank level binding: `#water` gauge only.
    pub fn tank(sensor_id: impl Into<String>, thresholds: Thresholds) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            quantity: Quantity::Tank,
            thresholds,
            gauge_selector: TANK_GAUGE,
            text_selector: None,
        }
    }
}

/// What [`StateProjector::apply`] did with a reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// No binding for this sensor id.
    Unbound,
    /// Bound, but the value was not numeric; nothing was touched.
    Rejected(ReadingFormatError),
    /// Bound elements were updated.
    Applied {
        band: SeverityBand,
        display: String,
        /// Selectors that could not be located and were skipped.
        missed: Vec<&'static str>,
    },
}

/// Applies classified readings to a [`UiSink`].
pub struct StateProjector<S> {
    bindings: Vec<WidgetBinding>,
    sink: S,
}

impl<S: UiSink> StateProjector<S> {
    pub fn new(bindings: Vec<WidgetBinding>, sink: S) -> Self {
        Self { bindings, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one raw reading. Never fails.
    pub fn apply(&mut self, sensor_id: &str, raw_value: &str) -> Projection {
        let Some(binding) = self.bindings.iter().find(|b| b.sensor_id == sensor_id) else {
            return Projection::Unbound;
        };

        let reading = match classify_reading(binding.quantity, raw_value, &binding.thresholds) {
            Ok(reading) => reading,
            Err(e) => {
                tracing::trace!(sensor_id, error = %e, "Dropping reading");
                return Projection::Rejected(e);
            }
        };

        let mut missed = Vec::new();

        match self.sink.query_selector(binding.gauge_selector) {
            Some(gauge) => {
                gauge.set_style_property(PERCENTAGE_VAR, &reading.gauge);
                for class in SEVERITY_CLASSES {
                    gauge.remove_class(class);
                }
                if let Some(class) = reading.band.css_class() {
                    gauge.add_class(class);
                }
            }
            None => missed.push(binding.gauge_selector),
        }

        if let Some(selector) = binding.text_selector {
            match self.sink.query_selector(selector) {
                Some(text) => text.set_text_content(&reading.display),
                None => missed.push(selector),
            }
        }

        if !missed.is_empty() {
            tracing::trace!(sensor_id, ?missed, "Skipped unrendered elements");
        }
        tracing::debug!(
            sensor_id,
            band = ?reading.band,
            value = %reading.display,
            "Reading applied",
        );

        Projection::Applied {
            band: reading.band,
            display: reading.display,
            missed,
        }
    }
}
