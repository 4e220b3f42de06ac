//! Split series between the primary (left) and secondary (right) axis by magnitude.

use crate::config::AxisConfig;
use crate::models::{AxisSide, RangeStat};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AxisRule {
    /// High-priced series on the left, low-priced on the right.
    MagnitudeSplit,
    /// One series dwarfs the rest and gets the left axis alone.
    DispersionIsolate,
    /// Everything fits one axis.
    SingleAxis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub rule: AxisRule,
}

/// `largest / smallest > ratio`, treating a non-positive smallest max as infinitely dispersed.
fn exceeds_dispersion(largest: f64, smallest: f64, ratio: f64) -> bool {
    if smallest > 0.0 {
        largest / smallest > ratio
    } else {
        largest > 0.0
    }
}

/// Axis side per input position. Series without data stay on the primary axis.
pub(crate) fn classify_sides(ranges: &[RangeStat], cfg: &AxisConfig) -> (Vec<AxisSide>, AxisRule) {
    let mut sides = vec![AxisSide::Primary; ranges.len()];
    let signal: Vec<(usize, f64)> = ranges
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_empty())
        .map(|(i, r)| (i, r.max))
        .collect();

    let is_high = |max: f64| max >= cfg.high_price_threshold;
    let high = signal.iter().filter(|(_, m)| is_high(*m)).count();
    let low = signal.len() - high;

    if high > 0 && low > 0 {
        for (i, m) in &signal {
            if !is_high(*m) {
                sides[*i] = AxisSide::Secondary;
            }
        }
        debug!("axis split by magnitude: {high} high, {low} low");
        return (sides, AxisRule::MagnitudeSplit);
    }

    if signal.len() >= 2 {
        // strict `>` keeps the first of several equal maxima
        let (top, largest) = signal
            .iter()
            .copied()
            .fold(signal[0], |best, cur| if cur.1 > best.1 { cur } else { best });
        let smallest = signal.iter().map(|(_, m)| *m).fold(f64::INFINITY, f64::min);
        if exceeds_dispersion(largest, smallest, cfg.dispersion_ratio) {
            for (i, _) in &signal {
                if *i != top {
                    sides[*i] = AxisSide::Secondary;
                }
            }
            debug!("axis isolation: series #{top} (max {largest}) vs smallest max {smallest}");
            return (sides, AxisRule::DispersionIsolate);
        }
    }

    (sides, AxisRule::SingleAxis)
}

/// Partition series ids into primary and secondary groups, preserving input order.
pub fn classify<S: AsRef<str>>(ranges: &[(S, RangeStat)], cfg: &AxisConfig) -> Classification {
    let stats: Vec<RangeStat> = ranges.iter().map(|(_, r)| *r).collect();
    let (sides, rule) = classify_sides(&stats, cfg);
    let mut out = Classification {
        primary: Vec::new(),
        secondary: Vec::new(),
        rule,
    };
    for ((id, _), side) in ranges.iter().zip(sides) {
        match side {
            AxisSide::Primary => out.primary.push(id.as_ref().to_string()),
            AxisSide::Secondary => out.secondary.push(id.as_ref().to_string()),
        }
    }
    out
}
