//! Tunable constants for axis classification and domain calculation.
//!
//! Every threshold here is an empirical default. They live in plain structs so callers
//! (and tests) can move them around without touching the algorithms.
//!
//! ```no_run
//! # use matprice::config::DashboardConfig;
//! let cfg = DashboardConfig::from_json_file("dashboard.json")?;
//! assert!(cfg.axis.tick_count >= 2);
//! # Ok::<(), matprice::error::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::normalize::UnitRules;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Axis classification and nice-domain settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Series whose max is at or above this price count as "high" (local currency per kg).
    pub high_price_threshold: f64,
    /// Max-to-max ratio above which the largest series is isolated on the primary axis.
    pub dispersion_ratio: f64,
    /// Number of ticks per axis, including both ends.
    pub tick_count: usize,
    /// When `min / max` is below this, the axis starts at zero.
    pub zero_floor_ratio: f64,
    /// Fraction of the spread added below and above clustered data.
    pub padding_ratio: f64,
    /// Zero-floored axes get one more interval when the top tick is this close to the max.
    pub headroom_ratio: f64,
    /// Upper bound of the domain used for an axis without data.
    pub fallback_domain_max: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            high_price_threshold: 5000.0,
            dispersion_ratio: 5.0,
            tick_count: 5,
            zero_floor_ratio: 0.3,
            padding_ratio: 0.1,
            headroom_ratio: 0.1,
            fallback_domain_max: 1000.0,
        }
    }
}

impl AxisConfig {
    /// Reject values the algorithms cannot work with.
    pub fn validate(&self) -> Result<()> {
        fn finite(field: &'static str, v: f64) -> Result<()> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    field,
                    reason: format!("must be finite, got {v}"),
                })
            }
        }
        fn non_negative(field: &'static str, v: f64) -> Result<()> {
            finite(field, v)?;
            if v < 0.0 {
                return Err(Error::InvalidConfig {
                    field,
                    reason: format!("must not be negative, got {v}"),
                });
            }
            Ok(())
        }

        finite("high_price_threshold", self.high_price_threshold)?;
        finite("dispersion_ratio", self.dispersion_ratio)?;
        if self.dispersion_ratio <= 1.0 {
            return Err(Error::InvalidConfig {
                field: "dispersion_ratio",
                reason: format!("must be greater than 1, got {}", self.dispersion_ratio),
            });
        }
        if self.tick_count < 2 {
            return Err(Error::InvalidConfig {
                field: "tick_count",
                reason: format!("must be at least 2, got {}", self.tick_count),
            });
        }
        non_negative("zero_floor_ratio", self.zero_floor_ratio)?;
        non_negative("padding_ratio", self.padding_ratio)?;
        non_negative("headroom_ratio", self.headroom_ratio)?;
        finite("fallback_domain_max", self.fallback_domain_max)?;
        if self.fallback_domain_max <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "fallback_domain_max",
                reason: format!("must be positive, got {}", self.fallback_domain_max),
            });
        }
        Ok(())
    }
}

/// Everything a dashboard chart needs besides the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub axis: AxisConfig,
    pub units: UnitRules,
    /// Locale tag for tick labels, see [`crate::axis::format::map_locale`].
    pub locale: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            axis: AxisConfig::default(),
            units: UnitRules::default(),
            locale: "ko".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cfg: DashboardConfig = serde_json::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.axis.validate()?;
        self.units.validate()
    }
}
