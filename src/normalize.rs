//! Unit normalization: bring every raw price to a per-kg price.
//!
//! Quotes come in two flavours: per kg and per metric ton. A unit label containing a
//! large-weight token (`ton`, `톤`, bare `t`) is divided down. Resin quotes are per ton
//! regardless of what the label says, so series ids matching a bulk keyword are divided too.
//! Pinned ids keep their native unit and override both rules.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Lookup tables driving [`UnitRules::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRules {
    /// Unit tokens meaning "per metric ton" (case-insensitive, whole token).
    pub large_unit_tokens: Vec<String>,
    /// Series id tokens identifying bulk commodities quoted per ton.
    pub bulk_keywords: Vec<String>,
    /// Series ids that stay in their native unit no matter what.
    pub pinned_ids: Vec<String>,
    /// Ratio between the large unit and a kilogram.
    pub divisor: f64,
}

impl Default for UnitRules {
    fn default() -> Self {
        let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        Self {
            large_unit_tokens: s(&["ton", "tons", "톤", "t"]),
            bulk_keywords: s(&[
                "PP", "PE", "HDPE", "LDPE", "LLDPE", "PVC", "ABS", "PS", "PET", "EVA",
            ]),
            pinned_ids: s(&["PE-ROD"]),
            divisor: 1000.0,
        }
    }
}

/// Letters and digits of any script, so `원/톤` splits into `원` and `톤`.
fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("static regex"))
}

fn has_token(haystack: &str, tokens: &[String]) -> bool {
    token_re().find_iter(haystack).any(|m| {
        let word = m.as_str().to_lowercase();
        tokens.iter().any(|t| t.to_lowercase() == word)
    })
}

impl UnitRules {
    pub fn validate(&self) -> Result<()> {
        if !self.divisor.is_finite() || self.divisor <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "divisor",
                reason: format!("must be a positive number, got {}", self.divisor),
            });
        }
        Ok(())
    }

    pub fn is_pinned(&self, series_id: &str) -> bool {
        let id = series_id.trim();
        self.pinned_ids.iter().any(|p| p.trim().eq_ignore_ascii_case(id))
    }

    pub fn is_large_unit(&self, raw_unit: &str) -> bool {
        has_token(raw_unit, &self.large_unit_tokens)
    }

    pub fn is_bulk(&self, series_id: &str) -> bool {
        has_token(series_id, &self.bulk_keywords)
    }

    /// Whether prices of this series/unit pair get divided down to per-kg.
    pub fn converts(&self, raw_unit: &str, series_id: &str) -> bool {
        let general = self.is_large_unit(raw_unit) || self.is_bulk(series_id);
        general && !self.is_pinned(series_id)
    }

    /// Canonical per-kg price. NaN stays NaN so callers can coalesce it to missing data.
    pub fn normalize(&self, raw_price: f64, raw_unit: &str, series_id: &str) -> f64 {
        if self.converts(raw_unit, series_id) {
            raw_price / self.divisor
        } else {
            raw_price
        }
    }

    /// Unit label after normalization: large-weight tokens become `kg`. A converted unit
    /// without such a token (bulk resin quoted as `원`) gets a `/kg` suffix.
    pub fn canonical_unit(&self, raw_unit: &str, series_id: &str) -> String {
        if !self.converts(raw_unit, series_id) {
            return raw_unit.to_string();
        }
        let raw_unit = raw_unit.trim();
        if raw_unit.is_empty() {
            return "kg".to_string();
        }
        if !self.is_large_unit(raw_unit) {
            return format!("{raw_unit}/kg");
        }
        token_re()
            .replace_all(raw_unit, |caps: &regex::Captures| {
                let word = &caps[0];
                if self
                    .large_unit_tokens
                    .iter()
                    .any(|t| t.to_lowercase() == word.to_lowercase())
                {
                    "kg".to_string()
                } else {
                    word.to_string()
                }
            })
            .into_owned()
    }
}

/// [`UnitRules::normalize`] with the default rules.
pub fn normalize(raw_price: f64, raw_unit: &str, series_id: &str) -> f64 {
    static DEFAULT: OnceLock<UnitRules> = OnceLock::new();
    DEFAULT
        .get_or_init(UnitRules::default)
        .normalize(raw_price, raw_unit, series_id)
}
