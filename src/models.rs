use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// One observation of a price series. `value == None` means "no data for this period".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: String,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(timestamp: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// One material's price observations over time.
///
/// `id` is the stable key for axis membership, legend order and color.
/// `display_name` is presentation only and may collide across materials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub id: String,
    pub display_name: String,
    pub unit: String,
    pub points: Vec<SeriesPoint>,
}

/// Min/max of the valid values of a series.
///
/// A series without any valid value yields the sentinel `{ min: 0, max: 0, samples: 0 }`,
/// which carries no signal and is skipped by classification and domain arithmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeStat {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl RangeStat {
    pub const EMPTY: RangeStat = RangeStat {
        min: 0.0,
        max: 0.0,
        samples: 0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Numeric domain of one vertical axis plus its tick positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

/// Which series go on which axis, and the scale of each axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisAssignment {
    pub primary_series_ids: Vec<String>,
    pub secondary_series_ids: Vec<String>,
    pub primary_domain: AxisDomain,
    pub secondary_domain: Option<AxisDomain>,
}

/// Left (primary) or right (secondary) vertical axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Primary,
    Secondary,
}

/// Raw row as delivered by the price query layer (one row per series and time bucket).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawPriceRow {
    pub time_bucket: String,
    pub specification: String,
    /// The query layer serializes prices as numbers or as (possibly thousands-separated) strings.
    /// Unparseable input is kept as missing data.
    #[serde(default, deserialize_with = "de_price_from_string_or_number")]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

/// Catalog entry mapping a raw `specification` to a display series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesMeta {
    pub specification: String,
    pub id: String,
    pub display_name: String,
}

/// Parse a price string such as `"3,000,000"` or `" 1250.5 "`. Non-finite results are rejected.
pub fn parse_price(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a time bucket: `YYYY-MM-DD`, `YYYY-MM` (first of month) or an RFC 3339 timestamp.
pub fn parse_time_bucket(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(date_part) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

/// Serde helper: parse an optional `f64` from a JSON number, a numeric string, or null.
fn de_price_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a numeric string, or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v).filter(|v| v.is_finite()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(parse_price(s))
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(PriceVisitor)
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}
