// src/main.rs
use anyhow::{Context, Result};
use bbref_scraper::{
    assemble::TableKind,
    cli::YearArgs,
    config::ScrapeConfig,
    fetch::{HttpSource, SeasonFetcher, SUMMARY_FILE},
    logging,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Scrape season tables from basketball-reference into data/{year}/.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(flatten)]
    years: YearArgs,

    /// Table to fetch; repeat for several. Default: all tables
    #[arg(long, value_enum)]
    table: Vec<TableKind>,

    /// YAML file overriding the scrape defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory, overrides the config
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Assemble tables without writing anything
    #[arg(long)]
    no_write: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init("info");
    let args = Args::parse();

    // ─── 2) resolve configuration; any error here is fatal ───────────
    let years = args.years.range()?;
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::load(path)?,
        None => ScrapeConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    let kinds: Vec<TableKind> = if args.table.is_empty() {
        TableKind::all().to_vec()
    } else {
        args.table
    };
    info!(
        start = years.start(),
        end = years.end(),
        tables = kinds.len(),
        data_dir = %config.data_dir.display(),
        "startup"
    );

    // ─── 3) fetch every season ───────────────────────────────────────
    let source = HttpSource::new(&config).context("building HTTP client")?;
    let data_dir = config.data_dir.clone();
    let mut fetcher = SeasonFetcher::new(source, config)?;
    let summary = fetcher.run(years, &kinds, !args.no_write)?;

    // ─── 4) record what happened ─────────────────────────────────────
    for record in summary.skipped() {
        warn!(year = record.year, kind = %record.kind, "not saved");
    }
    if !args.no_write {
        let path = data_dir.join(SUMMARY_FILE);
        summary
            .write_json(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}
