//! Temperature bands and threshold configuration.
//!
//! The dashboard colors itself by temperature band. Bands are a pure, total
//! function of a (non-null) temperature with closed-left boundaries:
//! `t < 18` is Cold, `18 <= t < 25` Comfort, `25 <= t < 30` Warm, `t >= 30`
//! Hot. Callers must guard null temperatures; a missing sample leaves the
//! current band untouched.
//!
//! # Example
//!
//! ```
//! use meteo_client::{TempBand, Thresholds};
//!
//! let thresholds = Thresholds::default();
//! assert_eq!(thresholds.evaluate(21.3), TempBand::Comfort);
//! assert_eq!(thresholds.evaluate(30.0), TempBand::Hot);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Temperature band driving the color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempBand {
    /// Below the cold boundary (blue palette).
    Cold,
    /// Comfortable range (green palette).
    Comfort,
    /// Warm range (orange palette).
    Warm,
    /// At or above the hot boundary (red palette).
    Hot,
}

impl TempBand {
    /// Short lowercase name, used as the visual marker on the
    /// temperature region.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Comfort => "comfort",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }
}

/// Boundaries between temperature bands, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Upper bound (exclusive) for Cold.
    pub cold_max: f64,
    /// Upper bound (exclusive) for Comfort.
    pub comfort_max: f64,
    /// Upper bound (exclusive) for Warm. At or above is Hot.
    pub warm_max: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cold_max: 18.0,
            comfort_max: 25.0,
            warm_max: 30.0,
        }
    }
}

impl ThresholdConfig {
    /// Check that the boundaries are strictly increasing.
    pub fn validate(&self) -> Result<()> {
        if self.cold_max < self.comfort_max && self.comfort_max < self.warm_max {
            Ok(())
        } else {
            Err(Error::invalid_config(format!(
                "temperature thresholds must be strictly increasing: {} / {} / {}",
                self.cold_max, self.comfort_max, self.warm_max
            )))
        }
    }
}

/// Humidity comfort boundaries, in percent.
///
/// Recognized configuration, currently informational only: nothing in the
/// dashboard renders humidity bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityThresholds {
    pub low: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub high: f64,
}

impl Default for HumidityThresholds {
    fn default() -> Self {
        Self {
            low: 30.0,
            optimal_min: 40.0,
            optimal_max: 60.0,
            high: 70.0,
        }
    }
}

impl HumidityThresholds {
    /// Check that the boundaries are strictly increasing.
    pub fn validate(&self) -> Result<()> {
        if self.low < self.optimal_min
            && self.optimal_min < self.optimal_max
            && self.optimal_max < self.high
        {
            Ok(())
        } else {
            Err(Error::invalid_config(
                "humidity thresholds must be strictly increasing".to_string(),
            ))
        }
    }
}

/// Band evaluator for temperature readings.
#[derive(Debug, Clone, Default)]
pub struct Thresholds {
    config: ThresholdConfig,
}

impl Thresholds {
    /// Create an evaluator with the given boundaries.
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Evaluate the band for a temperature.
    pub fn evaluate(&self, temperature: f64) -> TempBand {
        if temperature < self.config.cold_max {
            TempBand::Cold
        } else if temperature < self.config.comfort_max {
            TempBand::Comfort
        } else if temperature < self.config.warm_max {
            TempBand::Warm
        } else {
            TempBand::Hot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_bands() {
        let t = Thresholds::default();
        assert_eq!(t.evaluate(5.0), TempBand::Cold);
        assert_eq!(t.evaluate(21.3), TempBand::Comfort);
        assert_eq!(t.evaluate(27.0), TempBand::Warm);
        assert_eq!(t.evaluate(35.0), TempBand::Hot);
    }

    #[test]
    fn test_boundaries_closed_left() {
        let t = Thresholds::default();
        assert_eq!(t.evaluate(17.999), TempBand::Cold);
        assert_eq!(t.evaluate(18.0), TempBand::Comfort);
        assert_eq!(t.evaluate(24.999), TempBand::Comfort);
        assert_eq!(t.evaluate(25.0), TempBand::Warm);
        assert_eq!(t.evaluate(29.999), TempBand::Warm);
        assert_eq!(t.evaluate(30.0), TempBand::Hot);
    }

    #[test]
    fn test_extreme_values() {
        let t = Thresholds::default();
        assert_eq!(t.evaluate(-40.0), TempBand::Cold);
        assert_eq!(t.evaluate(85.0), TempBand::Hot);
    }

    #[test]
    fn test_config_validation() {
        assert!(ThresholdConfig::default().validate().is_ok());

        let bad = ThresholdConfig {
            cold_max: 25.0,
            comfort_max: 18.0,
            warm_max: 30.0,
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let equal = ThresholdConfig {
            cold_max: 18.0,
            comfort_max: 18.0,
            warm_max: 30.0,
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_humidity_validation() {
        assert!(HumidityThresholds::default().validate().is_ok());

        let bad = HumidityThresholds {
            low: 50.0,
            optimal_min: 40.0,
            optimal_max: 60.0,
            high: 70.0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_band_names() {
        assert_eq!(TempBand::Cold.name(), "cold");
        assert_eq!(TempBand::Hot.name(), "hot");
    }

    proptest! {
        /// Every finite temperature maps to exactly one band.
        #[test]
        fn prop_bands_total(temp in -100.0f64..100.0) {
            let t = Thresholds::default();
            let band = t.evaluate(temp);
            let expected = if temp < 18.0 {
                TempBand::Cold
            } else if temp < 25.0 {
                TempBand::Comfort
            } else if temp < 30.0 {
                TempBand::Warm
            } else {
                TempBand::Hot
            };
            prop_assert_eq!(band, expected);
        }
    }
}
