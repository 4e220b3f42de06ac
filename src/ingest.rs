//! Turn raw price rows into display series.
//!
//! Rows are grouped by `specification` and mapped through a catalog that supplies the stable
//! id and the display name. Catalog order is table order (and therefore legend color order).

use crate::models::{RawPriceRow, Series, SeriesMeta, SeriesPoint, parse_time_bucket};
use crate::normalize::UnitRules;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Inclusive date bounds applied to time buckets. Unset bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a time bucket falls inside the window. Unparseable buckets only pass an open window.
    pub fn contains(&self, time_bucket: &str) -> bool {
        if self.is_open() {
            return true;
        }
        match parse_time_bucket(time_bucket) {
            Some(d) => self.from.is_none_or(|f| d >= f) && self.to.is_none_or(|t| d <= t),
            None => false,
        }
    }
}

/// Build one series per catalog entry.
///
/// - Prices are normalized to per-kg with `rules`; unparseable prices stay `None`.
/// - Points are sorted oldest first.
/// - A catalog entry without rows yields a series with no points.
/// - Rows for specifications missing from the catalog are skipped.
pub fn build_series(
    rows: &[RawPriceRow],
    catalog: &[SeriesMeta],
    rules: &UnitRules,
    window: DateWindow,
) -> Vec<Series> {
    let known: HashSet<&str> = catalog.iter().map(|m| m.specification.as_str()).collect();
    let mut grouped: HashMap<&str, Vec<&RawPriceRow>> = HashMap::new();
    let mut skipped = 0usize;
    for row in rows {
        if !window.contains(&row.time_bucket) {
            continue;
        }
        if !known.contains(row.specification.as_str()) {
            skipped += 1;
            continue;
        }
        grouped.entry(row.specification.as_str()).or_default().push(row);
    }
    if skipped > 0 {
        debug!("skipped {skipped} rows with specifications missing from the catalog");
    }

    catalog
        .iter()
        .map(|meta| {
            let rows = grouped
                .get(meta.specification.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            series_from_rows(meta, rows, rules)
        })
        .collect()
}

fn series_from_rows(meta: &SeriesMeta, rows: &[&RawPriceRow], rules: &UnitRules) -> Series {
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .map(|r| {
            let value = r
                .average_price
                .map(|p| rules.normalize(p, &r.unit, &meta.id))
                .filter(|v| v.is_finite());
            SeriesPoint::new(r.time_bucket.clone(), value)
        })
        .collect();
    points.sort_by(|a, b| {
        let ka = (parse_time_bucket(&a.timestamp), a.timestamp.as_str());
        let kb = (parse_time_bucket(&b.timestamp), b.timestamp.as_str());
        ka.cmp(&kb)
    });

    // every row is normalized with its own unit, so the label comes from the canonical units
    let mut units: Vec<String> = Vec::new();
    for r in rows {
        let raw = r.unit.trim();
        if raw.is_empty() {
            continue;
        }
        let unit = rules.canonical_unit(raw, &meta.id);
        if !units.contains(&unit) {
            units.push(unit);
        }
    }
    if units.len() > 1 {
        debug!("{} mixes units {:?}, labelling it {}", meta.id, units, units[0]);
    }
    if points.is_empty() {
        debug!("no rows for {} ({})", meta.id, meta.specification);
    }
    let unit = match units.into_iter().next() {
        Some(u) => u,
        None => rules.canonical_unit("", &meta.id),
    };

    Series {
        id: meta.id.clone(),
        display_name: meta.display_name.clone(),
        unit,
        points,
    }
}
