//! Core types for weather-station data.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sample of temperature and humidity from the sensor API.
///
/// Both fields are independently nullable: the station reports `null` for a
/// sensor channel that has no recent data, and anything the API sends that is
/// not a usable number is normalized to `None` rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
}

impl Reading {
    /// A reading with both channels missing.
    pub const EMPTY: Self = Self {
        temperature: None,
        humidity: None,
    };

    /// Create a reading with both channels present.
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature: Some(temperature),
            humidity: Some(humidity),
        }
    }

    /// Normalize a live-endpoint body into a reading.
    ///
    /// The API promises `{temp, hum}` but the contract here is deliberately
    /// lenient: each field is coerced to a finite number, and a missing,
    /// null, non-numeric, or NaN value becomes `None`. A body that is not a
    /// JSON object at all yields [`Reading::EMPTY`] instead of an error.
    pub fn from_wire(body: &Value) -> Self {
        let Some(map) = body.as_object() else {
            return Self::EMPTY;
        };
        Self {
            temperature: coerce_number(map.get("temp")),
            humidity: coerce_number(map.get("hum")),
        }
    }

    /// True when neither channel has a value.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }
}

/// Coerce a JSON value to a finite f64.
///
/// Numbers pass through; numeric strings parse; everything else is `None`.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Averaging window supported by the `/data/average/{days}` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AverageWindow {
    /// Rolling 7-day average.
    Seven,
    /// Rolling 30-day average.
    Thirty,
}

impl AverageWindow {
    /// Window length in days, as used in the request path.
    pub fn days(self) -> u16 {
        match self {
            Self::Seven => 7,
            Self::Thirty => 30,
        }
    }
}

impl fmt::Display for AverageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days())
    }
}

/// A single point of the historical temperature series.
///
/// The API preformats timestamps (`"14/03 16h"` style); they are carried as
/// opaque labels and never reparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub label: String,
    pub temperature: f64,
}

/// Ordered historical temperature series for one day window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub points: Vec<HistoryPoint>,
}

impl HistorySeries {
    /// Normalize a history-endpoint body.
    ///
    /// `{timestamps: string[], temperatures: number[]}` is zipped pairwise;
    /// trailing unmatched entries and non-numeric temperatures are dropped.
    /// A malformed body yields an empty series.
    pub fn from_wire(body: &Value) -> Self {
        let timestamps = body
            .get("timestamps")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let temperatures = body
            .get("temperatures")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let points = timestamps
            .iter()
            .zip(temperatures)
            .filter_map(|(ts, temp)| {
                let label = ts.as_str()?.to_string();
                let temperature = coerce_number(Some(temp))?;
                Some(HistoryPoint { label, temperature })
            })
            .collect();

        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Minimum and maximum temperature over the series, if non-empty.
    pub fn temperature_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|p| p.temperature);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), t| {
            (min.min(t), max.max(t))
        }))
    }
}

/// Connection state shown by the status indicator.
///
/// `Connected` and `Error` are mutually exclusive visual states;
/// `Connecting` is the default and the fallback for anything unrecognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    /// Short lowercase label, matching the wire/status vocabulary.
    pub fn label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        }
    }
}
