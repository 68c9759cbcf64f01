use anyhow::{bail, Context, Result};
use bbref_scraper::{
    cli::{DataDirArg, YearRange},
    compose::{build, parse_span, ComposeConfig, DatasetPlan},
    logging,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Merge per-season metrics into model datasets")]
struct Args {
    #[arg(long, default_value = "2000-2020")]
    train_years: String,

    #[arg(long, default_value = "2021-2024")]
    test_years: String,

    /// With --end-year, build a single data.csv instead of train/test
    #[arg(long)]
    start_year: Option<i32>,

    #[arg(long)]
    end_year: Option<i32>,

    /// Also save each merged season as data_{year}.csv
    #[arg(long)]
    write: bool,

    /// YAML file describing sources, features and responses
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    data: DataDirArg,
}

impl Args {
    fn plan(&self) -> Result<DatasetPlan> {
        Ok(match (self.start_year, self.end_year) {
            (Some(start), Some(end)) => DatasetPlan::Single(YearRange::new(start, end)?),
            (None, None) => DatasetPlan::TrainTest {
                train: parse_span(&self.train_years)?,
                test: parse_span(&self.test_years)?,
            },
            _ => bail!("--start-year and --end-year must be given together"),
        })
    }
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init("info");
    let args = Args::parse();

    // ─── 2) plan and config; errors here stop the run ────────────────
    let plan = args.plan()?;
    let config = match &args.config {
        Some(path) => ComposeConfig::load(path)
            .with_context(|| format!("loading compose config {}", path.display()))?,
        None => ComposeConfig::default(),
    };
    info!(?plan, sources = config.sources.len(), "startup");

    // ─── 3) build datasets ───────────────────────────────────────────
    let written = build(plan, &args.data.data_dir, &config, args.write)?;
    info!(files = written.len(), "datasets built");
    Ok(())
}
