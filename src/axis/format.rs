//! Tick label formatting: locale-aware digit grouping, decimals implied by the tick step.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `ko`, `ko_KR`, `en`, `us`, `en_US`, `de`, `de_DE`,
/// `german`, `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "ko" | "ko_kr" | "korean" => (&Locale::ko, '.'),
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Fewest decimals (up to 6) that show `step` without rounding, e.g. 0.25 -> 2, 437.5 -> 1.
pub fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (0..=6)
        .find(|d| {
            let scaled = step * 10f64.powi(*d as i32);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(1.0)
        })
        .unwrap_or(6)
}

/// Format one tick value, e.g. `1250000` -> `"1,250,000"` (en) or `"1.250.000"` (de).
pub fn format_tick(value: f64, step: f64, locale_tag: &str) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let decimals = decimals_for_step(step);
    let pow = 10u64.pow(decimals as u32);
    let scaled = (value.abs() * pow as f64).round() as u64;
    let (int_part, frac_part) = (scaled / pow, scaled % pow);

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&int_part.to_formatted_string(locale));
    if decimals > 0 {
        out.push(dec_sep);
        out.push_str(&format!("{:0width$}", frac_part, width = decimals));
    }
    out
}

/// Labels for every tick of an axis, using the spacing of the first two ticks.
pub fn format_ticks(ticks: &[f64], locale_tag: &str) -> Vec<String> {
    let step = match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    };
    ticks
        .iter()
        .map(|t| format_tick(*t, step, locale_tag))
        .collect()
}
