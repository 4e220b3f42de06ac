//! Dual-axis scaling for multi-material price charts.
//!
//! - Primary/secondary split by magnitude ([`classify`])
//! - Nice-number domains and ticks per axis ([`domain`])
//! - Locale-aware tick labels ([`format`])
//! - Legend with palette colors that survive axis changes ([`legend`])
//!
//! Everything here is a pure function of its input: no caching, no I/O, safe to call
//! from several threads for different charts.

pub mod classify;
pub mod domain;
pub mod format;
pub mod legend;

pub use classify::{AxisRule, Classification, classify};
pub use domain::{compute_domain, fallback_domain, nice_interval};
pub use format::{format_tick, format_ticks, map_locale};
pub use legend::{LegendEntry, build_legend, series_color};

use crate::config::{AxisConfig, DashboardConfig};
use crate::models::{AxisAssignment, AxisSide, RangeStat, Series};
use crate::stats::analyze_range;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Classify `table` onto two axes and compute a domain for each non-empty axis.
///
/// Every series lands in exactly one id list, in input order. With no series at all the
/// primary axis gets [`fallback_domain`] and there is no secondary axis.
pub fn assign_axes(table: &[Series], cfg: &AxisConfig) -> AxisAssignment {
    let ranges: Vec<RangeStat> = table.iter().map(|s| analyze_range(&s.points)).collect();
    let (sides, rule) = classify::classify_sides(&ranges, cfg);

    let mut primary_ids = Vec::new();
    let mut secondary_ids = Vec::new();
    let mut primary_ranges = Vec::new();
    let mut secondary_ranges = Vec::new();
    for ((s, r), side) in table.iter().zip(&ranges).zip(&sides) {
        match side {
            AxisSide::Primary => {
                primary_ids.push(s.id.clone());
                primary_ranges.push(*r);
            }
            AxisSide::Secondary => {
                secondary_ids.push(s.id.clone());
                secondary_ranges.push(*r);
            }
        }
    }
    debug!(
        "assigned {} series ({:?}): {} primary, {} secondary",
        table.len(),
        rule,
        primary_ids.len(),
        secondary_ids.len()
    );

    let secondary_domain =
        (!secondary_ids.is_empty()).then(|| compute_domain(&secondary_ranges, cfg));
    AxisAssignment {
        primary_series_ids: primary_ids,
        secondary_series_ids: secondary_ids,
        primary_domain: compute_domain(&primary_ranges, cfg),
        secondary_domain,
    }
}

/// Common unit of the given series, if they all agree on one non-empty unit.
pub fn derive_axis_unit<'a>(series: impl IntoIterator<Item = &'a Series>) -> Option<String> {
    let units: BTreeSet<&str> = series
        .into_iter()
        .map(|s| s.unit.trim())
        .filter(|u| !u.is_empty())
        .collect();
    if units.len() == 1 {
        units.into_iter().next().map(str::to_string)
    } else {
        None
    }
}

/// Presentation data for one axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisLabels {
    pub unit: Option<String>,
    pub tick_labels: Vec<String>,
}

/// Everything the external chart renderer needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub assignment: AxisAssignment,
    pub legend: Vec<LegendEntry>,
    pub primary_axis: AxisLabels,
    pub secondary_axis: Option<AxisLabels>,
}

/// [`assign_axes`] plus legend, tick labels and axis units.
pub fn build_chart(table: &[Series], cfg: &DashboardConfig) -> ChartSpec {
    let assignment = assign_axes(table, &cfg.axis);
    let legend = build_legend(table, &assignment);

    let axis_unit = |ids: &[String]| {
        derive_axis_unit(table.iter().filter(|s| ids.contains(&s.id)))
    };
    let primary_axis = AxisLabels {
        unit: axis_unit(&assignment.primary_series_ids),
        tick_labels: format_ticks(&assignment.primary_domain.ticks, &cfg.locale),
    };
    let secondary_axis = assignment.secondary_domain.as_ref().map(|d| AxisLabels {
        unit: axis_unit(&assignment.secondary_series_ids),
        tick_labels: format_ticks(&d.ticks, &cfg.locale),
    });

    ChartSpec {
        assignment,
        legend,
        primary_axis,
        secondary_axis,
    }
}
