//! Legend entries: primary-axis series first, then secondary, each with a stable color.
//!
//! Colors are indexed by the series' position in the input table, not by axis, so a series
//! keeps its color when it moves between axes.

use crate::models::{AxisAssignment, AxisSide, Series};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray,
/// Brownish Gold.
pub const OFFICE10: [(u8, u8, u8); 10] = [
    (68, 114, 196),  // blue      (#4472C4)
    (237, 125, 49),  // orange    (#ED7D31)
    (165, 165, 165), // gray      (#A5A5A5)
    (255, 192, 0),   // gold      (#FFC000)
    (91, 155, 213),  // light blue(#5B9BD5)
    (112, 173, 71),  // green     (#70AD47)
    (38, 68, 120),   // dark blue (#264478)
    (158, 72, 14),   // dark org. (#9E480E)
    (99, 99, 99),    // dark gray (#636363)
    (153, 115, 0),   // brownish  (#997300)
];

/// Hex color (`#RRGGBB`) for the series at input position `idx`.
#[inline]
pub fn series_color(idx: usize) -> String {
    let (r, g, b) = OFFICE10[idx % OFFICE10.len()];
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegendEntry {
    pub id: String,
    /// Display name, suffixed with the id when another series shares the same name.
    pub label: String,
    pub unit: String,
    pub axis: AxisSide,
    pub color: String,
}

/// Build the legend for an assignment computed from `table`.
pub fn build_legend(table: &[Series], assignment: &AxisAssignment) -> Vec<LegendEntry> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut name_count: HashMap<&str, usize> = HashMap::new();
    for (idx, s) in table.iter().enumerate() {
        position.entry(s.id.as_str()).or_insert(idx);
        *name_count.entry(s.display_name.as_str()).or_default() += 1;
    }

    let make_label = |s: &Series| -> String {
        if name_count.get(s.display_name.as_str()).copied().unwrap_or(0) > 1 {
            format!("{} ({})", s.display_name, s.id)
        } else {
            s.display_name.clone()
        }
    };

    let sides = assignment
        .primary_series_ids
        .iter()
        .map(|id| (id, AxisSide::Primary))
        .chain(
            assignment
                .secondary_series_ids
                .iter()
                .map(|id| (id, AxisSide::Secondary)),
        );

    sides
        .filter_map(|(id, axis)| {
            let idx = *position.get(id.as_str())?;
            let s = &table[idx];
            Some(LegendEntry {
                id: s.id.clone(),
                label: make_label(s),
                unit: s.unit.clone(),
                axis,
                color: series_color(idx),
            })
        })
        .collect()
}
