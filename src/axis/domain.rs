//! Nice-number axis domains.
//!
//! Ticks are spaced by a "nice" interval (1, 2, 2.5, 5 or 10 times a power of ten) so labels
//! read as round numbers. Data that sits close to zero relative to its size gets a zero-based
//! axis; data clustered away from zero gets a padded window around it.

use crate::config::AxisConfig;
use crate::models::{AxisDomain, RangeStat};
use log::trace;

/// Preferred interval multipliers, in tie-break order.
pub const NICE_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// The nice interval closest to `raw`. `None` for zero, negative or non-finite input.
pub fn nice_interval(raw: f64) -> Option<f64> {
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    NICE_MULTIPLIERS
        .iter()
        .map(|m| m * magnitude)
        .min_by(|a, b| (a - raw).abs().total_cmp(&(b - raw).abs()))
}

/// Decimal places that keep tick arithmetic exact at the scale of `interval`.
///
/// Not capped: a tick step of `1e-18` needs 24 places.
pub fn tick_precision(interval: f64) -> i32 {
    if !interval.is_finite() || interval <= 0.0 {
        return 0;
    }
    (6 - interval.log10().floor() as i32).max(0)
}

/// Round `v` to `decimals` places. Values the scaled arithmetic cannot represent pass through.
pub fn snap(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    if !scale.is_finite() {
        return v;
    }
    let scaled = v * scale;
    if !scaled.is_finite() || scaled.abs() >= 1e15 {
        return v;
    }
    let out = scaled.round() / scale;
    // no "-0" labels
    if out == 0.0 { 0.0 } else { out }
}

/// Evenly spaced ticks from `min` to `max`, first and last pinned to the bounds.
fn materialize(min: f64, max: f64, count: usize) -> Vec<f64> {
    let segments = (count - 1) as f64;
    let step = (max - min) / segments;
    let decimals = tick_precision(step);
    let mut ticks: Vec<f64> = (0..count)
        .map(|i| snap(min + step * i as f64, decimals))
        .collect();
    ticks[0] = min;
    ticks[count - 1] = max;
    ticks
}

/// Domain used when an axis carries no valid data.
pub fn fallback_domain(cfg: &AxisConfig) -> AxisDomain {
    let count = cfg.tick_count.max(2);
    AxisDomain {
        min: 0.0,
        max: cfg.fallback_domain_max,
        ticks: materialize(0.0, cfg.fallback_domain_max, count),
    }
}

/// Domain and ticks for one axis over the union of `ranges`. Sentinel ranges are ignored.
pub fn compute_domain(ranges: &[RangeStat], cfg: &AxisConfig) -> AxisDomain {
    let (min, max) = ranges
        .iter()
        .filter(|r| !r.is_empty())
        .fold(None, |acc: Option<(f64, f64)>, r| match acc {
            None => Some((r.min, r.max)),
            Some((lo, hi)) => Some((lo.min(r.min), hi.max(r.max))),
        })
        .unwrap_or((f64::NAN, f64::NAN));
    if !min.is_finite() || !max.is_finite() {
        return fallback_domain(cfg);
    }

    let count = cfg.tick_count.max(2);
    let segments = (count - 1) as f64;
    let spread = max - min;
    let interval = nice_interval(spread / segments)
        .or_else(|| nice_interval(max.abs() / segments))
        .unwrap_or(1.0);

    let (lo, hi, step) = if max > 0.0 && min >= 0.0 && min / max < cfg.zero_floor_ratio {
        let mut top = (max / interval).ceil() * interval;
        if top <= max {
            top += interval;
        }
        if top - max < cfg.headroom_ratio * max {
            top += interval;
        }
        (0.0, top, interval)
    } else if spread <= 0.0 {
        (min, min, interval)
    } else {
        let pad = spread * cfg.padding_ratio;
        let (lo, hi) = (min - pad, max + pad);
        let step = nice_interval((hi - lo) / segments).unwrap_or(interval);
        ((lo / step).floor() * step, (hi / step).ceil() * step, step)
    };

    let decimals = tick_precision(step);
    trace!("domain data=[{min}, {max}] interval={step} -> [{lo}, {hi}]");

    // a single tick: keep the data value as the floor and add one interval
    if hi == lo || hi - lo <= f64::EPSILON * hi.abs().max(lo.abs()) {
        let top = snap(lo + step, decimals);
        return AxisDomain {
            min: lo,
            max: top,
            ticks: vec![lo, top],
        };
    }
    let (lo, hi) = (snap(lo, decimals), snap(hi, decimals));

    AxisDomain {
        min: lo,
        max: hi,
        ticks: materialize(lo, hi, count),
    }
}
