use crate::models::{RangeStat, Series, SeriesPoint, parse_time_bucket};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Step offsets (in periods) for the change columns of the price table.
pub const MONTHLY_OFFSET: usize = 1;
pub const YEARLY_OFFSET: usize = 12;
pub const TWO_YEAR_OFFSET: usize = 24;

/// Min/max over the valid values of a series, ignoring `None` and non-finite values.
///
/// Returns [`RangeStat::EMPTY`] when nothing valid remains.
pub fn analyze_range(points: &[SeriesPoint]) -> RangeStat {
    let mut out = RangeStat {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        samples: 0,
    };
    for v in points.iter().filter_map(|p| p.value).filter(|v| v.is_finite()) {
        out.min = out.min.min(v);
        out.max = out.max.max(v);
        out.samples += 1;
    }
    if out.samples == 0 {
        RangeStat::EMPTY
    } else {
        out
    }
}

/// A price observation as consumed by the change calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub timestamp: String,
    pub price: Option<f64>,
}

impl From<&SeriesPoint> for PricePoint {
    fn from(p: &SeriesPoint) -> Self {
        Self {
            timestamp: p.timestamp.clone(),
            price: p.value,
        }
    }
}

/// Percentage changes against earlier periods. `None` renders as "no data", never as 0%.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PriceChanges {
    pub monthly: Option<f64>,
    pub yearly: Option<f64>,
    pub two_year: Option<f64>,
}

fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (cur, prev) = (current?, previous?);
    if prev == 0.0 || !prev.is_finite() || !cur.is_finite() {
        return None;
    }
    let pct = (cur - prev) / prev * 100.0;
    pct.is_finite().then_some(pct)
}

/// Changes of the newest price against 1, 12 and 24 periods back.
///
/// `sorted_desc` must be newest first. Offsets past the end are clamped to the oldest point.
pub fn compute_changes(sorted_desc: &[PricePoint]) -> PriceChanges {
    let Some(latest) = sorted_desc.first() else {
        return PriceChanges::default();
    };
    let last = sorted_desc.len() - 1;
    let back = |offset: usize| sorted_desc[offset.min(last)].price;
    PriceChanges {
        monthly: percent_change(latest.price, back(MONTHLY_OFFSET)),
        yearly: percent_change(latest.price, back(YEARLY_OFFSET)),
        two_year: percent_change(latest.price, back(TWO_YEAR_OFFSET)),
    }
}

/// One line of the price table shown next to the chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRow {
    pub id: String,
    pub display_name: String,
    pub unit: String,
    pub latest_timestamp: Option<String>,
    pub latest_price: Option<f64>,
    pub changes: PriceChanges,
}

/// Newest-first ordering by parsed time bucket; unparseable buckets sort last.
fn newest_first(a: &SeriesPoint, b: &SeriesPoint) -> Ordering {
    let ka = (parse_time_bucket(&a.timestamp), a.timestamp.as_str());
    let kb = (parse_time_bucket(&b.timestamp), b.timestamp.as_str());
    kb.cmp(&ka)
}

/// Price table rows in input order.
pub fn price_table(table: &[Series]) -> Vec<PriceRow> {
    table
        .iter()
        .map(|s| {
            let mut pts: Vec<&SeriesPoint> = s.points.iter().collect();
            pts.sort_by(|a, b| newest_first(a, b));
            let desc: Vec<PricePoint> = pts.into_iter().map(PricePoint::from).collect();
            PriceRow {
                id: s.id.clone(),
                display_name: s.display_name.clone(),
                unit: s.unit.clone(),
                latest_timestamp: desc.first().map(|p| p.timestamp.clone()),
                latest_price: desc.first().and_then(|p| p.price),
                changes: compute_changes(&desc),
            }
        })
        .collect()
}
