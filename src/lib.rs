//! matprice
//!
//! Axis scaling for multi-material price charts. Given several price series of very
//! different magnitude and unit, the crate normalizes them to per-kg prices, splits them
//! between a primary and a secondary axis, and computes "nice" domains and ticks for each.
//! Pairs with the `matprice` CLI.
//!
//! ### Features
//! - Per-kg normalization with configurable unit tokens, bulk keywords and pinned ids
//! - Primary/secondary axis classification by magnitude and dispersion
//! - Nice-number domains (1, 2, 2.5, 5, 10 × 10ⁿ) with drift-free ticks
//! - Legend with stable palette colors, locale-aware tick labels
//! - Month / year / two-year change table
//!
//! ### Example
//! ```no_run
//! use matprice::{DashboardConfig, DateWindow, axis, ingest, stats, storage};
//!
//! let cfg = DashboardConfig::default();
//! let rows = storage::load_rows("prices.csv")?;
//! let catalog = storage::load_catalog("catalog.json")?;
//! let table = ingest::build_series(&rows, &catalog, &cfg.units, DateWindow::default());
//! let chart = axis::build_chart(&table, &cfg);
//! println!("{}", serde_json::to_string_pretty(&chart)?);
//! let changes = stats::price_table(&table);
//! println!("{:#?}", changes);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod axis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod stats;
pub mod storage;

pub use axis::{assign_axes, build_chart, classify, compute_domain};
pub use config::{AxisConfig, DashboardConfig};
pub use ingest::DateWindow;
pub use models::{AxisAssignment, AxisDomain, RangeStat, Series, SeriesPoint};
pub use normalize::{UnitRules, normalize};
pub use stats::{analyze_range, compute_changes};
