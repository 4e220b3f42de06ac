use crate::error::Error;
use crate::models::{RawPriceRow, SeriesMeta};
use crate::stats::PriceRow;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Read a list of records from a `.csv` (with header) or `.json` (array) file.
fn load_records<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    match extension(path).as_str() {
        "csv" => {
            let mut rdr = csv::Reader::from_path(path)
                .with_context(|| format!("open {}", path.display()))?;
            let mut out = Vec::new();
            for rec in rdr.deserialize() {
                out.push(rec.with_context(|| format!("parse {}", path.display()))?);
            }
            Ok(out)
        }
        "json" => {
            let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse {}", path.display()))
        }
        other => Err(Error::UnsupportedFormat(other.to_string()).into()),
    }
}

/// Load raw price rows (`time_bucket,specification,average_price,unit`).
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RawPriceRow>> {
    load_records(path)
}

/// Load the series catalog (`specification,id,display_name`).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<SeriesMeta>> {
    load_records(path)
}

/// Spreadsheet apps evaluate cells starting with these characters as formulas.
fn defuse_formula(cell: &str) -> Cow<'_, str> {
    if cell.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{cell}"))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Save the price table as CSV with header.
pub fn save_table_csv<P: AsRef<Path>>(rows: &[PriceRow], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "id",
        "display_name",
        "unit",
        "latest_timestamp",
        "latest_price",
        "monthly_change",
        "yearly_change",
        "two_year_change",
    ))?;
    for r in rows {
        wtr.serialize((
            defuse_formula(&r.id),
            defuse_formula(&r.display_name),
            defuse_formula(&r.unit),
            r.latest_timestamp.as_deref().map(defuse_formula),
            r.latest_price,
            r.changes.monthly,
            r.changes.yearly,
            r.changes.two_year,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_prefixes() {
        assert_eq!(defuse_formula("=1+1"), "'=1+1");
        assert_eq!(defuse_formula("-5"), "'-5");
        assert_eq!(defuse_formula("steel"), "steel");
    }
}
