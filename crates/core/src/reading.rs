//! Reading classification.
//!
//! Pure logic, modelled on threshold evaluation: the caller passes in the
//! raw hub state string and the configured thresholds and gets back a
//! severity band plus the strings the widget renders.

/// Upper bound applied to heater readings before classification.
pub const HEATER_CEILING: f64 = 100.0;

/// Severity band of a reading, lowest-value band wins ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    /// Above the warning threshold.
    Normal,
    /// At or below the warning threshold but above the low threshold.
    Warning,
    /// At or below the low threshold.
    Low,
}

impl SeverityBand {
    /// CSS class toggled on the gauge element, `None` for [`Normal`](Self::Normal).
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Warning => Some("warning"),
            Self::Low => Some("low"),
        }
    }
}

/// Warning and low thresholds for one monitored quantity.
///
/// `low <= warning` is assumed but not checked; when it does not hold
/// the low band simply takes priority.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    pub warning: f64,
    pub low: f64,
}

impl Thresholds {
    pub fn new(warning: f64, low: f64) -> Self {
        Self { warning, low }
    }
}

/// The two quantities shown by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Water-heater charge, a percentage clamped to 100.
    Heater,
    /// Tank fill level, never clamped.
    Tank,
}

impl Quantity {
    /// Ceiling applied before classification, if any.
    pub fn ceiling(self) -> Option<f64> {
        match self {
            Self::Heater => Some(HEATER_CEILING),
            Self::Tank => None,
        }
    }

    fn clamp(self, value: f64) -> f64 {
        match self.ceiling() {
            Some(max) if value > max => max,
            _ => value,
        }
    }

    /// Value written to the gauge's `--percentage` style variable.
    fn gauge_value(self, value: f64) -> String {
        match self {
            Self::Heater => format!("{value:.0}"),
            Self::Tank => format!("{value:.2}"),
        }
    }

    /// Human-readable value. Heater readings are truncated toward zero;
    /// the integer cast saturates, so `NaN` shows as `0` and `-inf` as
    /// `i64::MIN`.
    fn display_value(self, value: f64) -> String {
        match self {
            Self::Heater => (value.trunc() as i64).to_string(),
            Self::Tank => format!("{value:.2}"),
        }
    }
}

/// A hub state string that is not a number (`unavailable`, `unknown`, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Reading is not numeric: {raw:?}")]
pub struct ReadingFormatError {
    pub raw: String,
}

/// Result of classifying a single reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedReading {
    pub quantity: Quantity,
    /// Parsed value after clamping.
    pub value: f64,
    pub band: SeverityBand,
    /// Formatted value for the gauge style variable.
    pub gauge: String,
    /// Formatted value for text display.
    pub display: String,
}

/// Classify a numeric value against a pair of thresholds.
///
/// `value <= low` is [`SeverityBand::Low`], otherwise `value <= warning`
/// is [`SeverityBand::Warning`], otherwise [`SeverityBand::Normal`].
pub fn classify(value: f64, low: f64, warning: f64) -> SeverityBand {
    if value <= low {
        SeverityBand::Low
    } else if value <= warning {
        SeverityBand::Warning
    } else {
        SeverityBand::Normal
    }
}

/// Parse, clamp and classify a raw hub state for `quantity`.
pub fn classify_reading(
    quantity: Quantity,
    raw: &str,
    thresholds: &Thresholds,
) -> Result<ClassifiedReading, ReadingFormatError> {
    let parsed: f64 = raw.parse().map_err(|_| ReadingFormatError {
        raw: raw.to_string(),
    })?;
    let value = quantity.clamp(parsed);

    Ok(ClassifiedReading {
        quantity,
        value,
        band: classify(value, thresholds.low, thresholds.warning),
        gauge: quantity.gauge_value(value),
        display: quantity.display_value(value),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
