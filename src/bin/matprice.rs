use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use matprice::stats::{PriceRow, price_table};
use matprice::{DashboardConfig, DateWindow, axis, ingest, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "matprice",
    version,
    about = "Scale multi-material price charts onto dual axes & summarize price changes"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the chart spec (axis assignment, domains, tick labels, legend) as JSON.
    Axes(AxesArgs),
    /// Print the price table (latest price, monthly/yearly/two-year change).
    Table(TableArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Raw price rows (.csv or .json): time_bucket, specification, average_price, unit
    #[arg(short, long)]
    rows: PathBuf,
    /// Series catalog (.csv or .json): specification, id, display_name
    #[arg(short, long)]
    catalog: PathBuf,
    /// Dashboard config (.json). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// First time bucket to include (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    from: Option<String>,
    /// Last time bucket to include (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    to: Option<String>,
    /// Locale for tick labels (overrides the config), e.g. ko, en, de
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct AxesArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Write the chart spec to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TableArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Save the table to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn fmt_price(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "-".to_string(),
    }
}

fn fmt_change(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{:+.1}%", x),
        _ => "-".to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .ok()
}

fn parse_bound(flag: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| anyhow!("invalid {flag} {s:?}, expected YYYY-MM-DD or YYYY-MM")),
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Axes(args) => cmd_axes(args),
        Command::Table(args) => cmd_table(args),
    }
}

fn load_table(input: &InputArgs) -> Result<(Vec<matprice::Series>, DashboardConfig)> {
    let mut cfg = match &input.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(locale) = &input.locale {
        cfg.locale = locale.clone();
    }

    let window = DateWindow {
        from: parse_bound("--from", input.from.as_deref())?,
        to: parse_bound("--to", input.to.as_deref())?,
    };
    if let (Some(f), Some(t)) = (window.from, window.to) {
        if f > t {
            bail!("--from {} is after --to {}", f, t);
        }
    }

    let rows = storage::load_rows(&input.rows)?;
    let catalog = storage::load_catalog(&input.catalog)?;
    let table = ingest::build_series(&rows, &catalog, &cfg.units, window);
    Ok((table, cfg))
}

fn cmd_axes(args: AxesArgs) -> Result<()> {
    let (table, cfg) = load_table(&args.input)?;
    let chart = axis::build_chart(&table, &cfg);
    match args.out.as_ref() {
        Some(path) => {
            storage::save_json(&chart, path)?;
            eprintln!("Wrote chart spec to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&chart)?),
    }
    Ok(())
}

fn print_table(rows: &[PriceRow]) {
    for r in rows {
        println!(
            "{} • {}  latest={} {} ({})  mom={} yoy={} 2y={}",
            r.id,
            r.display_name,
            fmt_price(r.latest_price),
            r.unit,
            r.latest_timestamp.as_deref().unwrap_or("-"),
            fmt_change(r.changes.monthly),
            fmt_change(r.changes.yearly),
            fmt_change(r.changes.two_year)
        );
    }
}

fn cmd_table(args: TableArgs) -> Result<()> {
    let (table, _cfg) = load_table(&args.input)?;
    let rows = price_table(&table);

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_table_csv(&rows, path)?,
            "json" => storage::save_json(&rows, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    print_table(&rows);
    Ok(())
}
