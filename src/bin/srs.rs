use anyhow::Result;
use bbref_scraper::{
    cli::{DataDirArg, YearArgs},
    logging,
    metrics::{for_each_year, srs},
};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Simple Rating System normalized against each season")]
struct Args {
    #[command(flatten)]
    years: YearArgs,

    #[command(flatten)]
    data: DataDirArg,
}

fn main() -> Result<()> {
    logging::init("info");
    let args = Args::parse();
    let years = args.years.range()?;

    let written = for_each_year(srs::STEM, years, |year| srs::run_year(&args.data.data_dir, year))?;
    info!(seasons = written.len(), "srs done");
    Ok(())
}
