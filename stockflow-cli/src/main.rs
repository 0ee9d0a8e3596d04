//! StockFlow CLI: the dashboard's fetch-and-export workflow without a terminal UI.
//!
//! Commands:
//! - `tickers`: list the supported ticker symbols
//! - `config`: print the effective configuration as TOML
//! - `fetch`: fetch daily prices for one ticker, print a preview, write `<TICKER>_data.csv`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockflow_core::config::AppConfig;
use stockflow_core::data::{MarketDataGateway, YahooProvider};
use stockflow_core::domain::date_range::parse_date;
use stockflow_core::domain::{DateRange, PriceSeries, Ticker};
use stockflow_core::workflow::{FetchWorkflow, ResultView, Selection, SUCCESS_MESSAGE};

#[derive(Parser)]
#[command(name = "stockflow", about = "StockFlow CLI: fetch and download stock data")]
struct Cli {
    /// Configuration file (defaults to <config_dir>/stockflow/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported ticker symbols.
    Tickers,
    /// Print the effective configuration as TOML.
    Config,
    /// Fetch daily prices for a ticker and export them as CSV.
    Fetch {
        /// Ticker symbol (e.g., AAPL, BRK-B).
        #[arg(long, value_parser = parse_ticker)]
        ticker: Ticker,

        /// Start date (YYYY-MM-DD). Defaults to the configured start date.
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD), exclusive. Defaults to today.
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,

        /// Directory for the CSV file. Defaults to the configured download directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Number of rows to print before writing the file.
        #[arg(long, default_value_t = 10)]
        preview: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Tickers => {
            print!("{}", format_tickers());
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml().context("failed to render configuration")?);
            Ok(())
        }
        Commands::Fetch {
            ticker,
            start,
            end,
            output_dir,
            preview,
        } => {
            let range = DateRange::new(
                start.unwrap_or(config.default_start),
                end.unwrap_or_else(|| chrono::Local::now().date_naive()),
            );
            let output_dir = output_dir.unwrap_or_else(|| config.download_dir.clone());
            let provider = YahooProvider::new(config.request_timeout())
                .context("failed to build market data client")?;
            let outcome = run_fetch(
                &provider,
                Selection::new(ticker, range),
                &output_dir,
                preview,
            )?;
            println!("{}", outcome.report());
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_ticker(s: &str) -> Result<Ticker, String> {
    s.trim().parse::<Ticker>().map_err(|_| {
        let allowed: Vec<&str> = Ticker::all().into_iter().map(Ticker::as_str).collect();
        format!("unsupported ticker '{s}' (expected one of: {})", allowed.join(", "))
    })
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| format!("invalid date '{s}': {e} (expected YYYY-MM-DD)"))
}

/// What a `fetch` run produced.
#[derive(Debug)]
enum FetchOutcome {
    Saved { preview: String, path: PathBuf },
    Empty { warning: &'static str },
}

impl FetchOutcome {
    fn report(&self) -> String {
        match self {
            FetchOutcome::Saved { preview, path } => {
                format!("{SUCCESS_MESSAGE}\n\n{preview}\nSaved to: {}", path.display())
            }
            FetchOutcome::Empty { warning } => warning.to_string(),
        }
    }
}

fn run_fetch<G: MarketDataGateway + ?Sized>(
    gateway: &G,
    selection: Selection,
    output_dir: &Path,
    preview_rows: usize,
) -> Result<FetchOutcome> {
    let mut workflow = FetchWorkflow::new();
    let view = workflow
        .trigger(gateway, selection)
        .with_context(|| format!("failed to fetch {}", selection.ticker))?;

    match view {
        ResultView::Populated { series, .. } => {
            let preview = format_preview(series, preview_rows);
            let artifact = view.export()?;
            let path = artifact
                .write_to(output_dir)
                .with_context(|| format!("failed to export {}", artifact.file_name))?;
            info!(path = %path.display(), rows = series.row_count(), "wrote CSV");
            Ok(FetchOutcome::Saved { preview, path })
        }
        view => Ok(FetchOutcome::Empty {
            warning: view.message().unwrap_or_default(),
        }),
    }
}

fn format_tickers() -> String {
    let mut out = String::new();
    for (i, ticker) in Ticker::all().into_iter().enumerate() {
        out.push_str(&format!("{:>2}. {ticker}\n", i + 1));
    }
    out
}

/// Fixed-width table of the first `rows` bars.
fn format_preview(series: &PriceSeries, rows: usize) -> String {
    let columns = series.columns();
    let mut out = format!(
        "{:<10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        columns[0], columns[1], columns[2], columns[3], columns[4], columns[5], columns[6]
    );
    out.push_str(&"-".repeat(88));
    out.push('\n');
    for bar in series.bars.iter().take(rows) {
        let c = bar.display_cells();
        out.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            c[0], c[1], c[2], c[3], c[4], c[5], c[6]
        ));
    }
    let remaining = series.row_count().saturating_sub(rows);
    if remaining > 0 {
        out.push_str(&format!("... {remaining} more rows\n"));
    }
    out.push_str(&format!("{} rows x {} columns", series.row_count(), columns.len()));
    if let Some((first, last)) = series.date_span() {
        out.push_str(&format!(", {first} to {last}"));
    }
    out.push('\n');
    out
}
