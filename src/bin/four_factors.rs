use anyhow::{Context, Result};
use bbref_scraper::{
    cli::{DataDirArg, YearArgs},
    config::FourFactorWeights,
    logging,
    metrics::{for_each_year, four_factors, NormMethod},
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Weighted, normalized Four Factors per season")]
struct Args {
    #[command(flatten)]
    years: YearArgs,

    #[command(flatten)]
    data: DataDirArg,

    #[arg(long, value_enum, default_value_t = NormMethod::ZScore)]
    norm: NormMethod,

    /// YAML file with factor weights
    #[arg(long)]
    weights: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init("info");
    let args = Args::parse();

    // ─── 2) validate inputs before touching any season ───────────────
    let years = args.years.range()?;
    let weights = match &args.weights {
        Some(path) => FourFactorWeights::load(path)
            .with_context(|| format!("loading weights from {}", path.display()))?,
        None => FourFactorWeights::default(),
    };

    // ─── 3) normalize each season ────────────────────────────────────
    let written = for_each_year(four_factors::STEM, years, |year| {
        four_factors::run_year(&args.data.data_dir, year, args.norm, &weights)
    })?;
    info!(seasons = written.len(), "four factors done");
    Ok(())
}
