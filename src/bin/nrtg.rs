use anyhow::Result;
use bbref_scraper::{
    cli::{DataDirArg, YearArgs},
    logging,
    metrics::{for_each_year, nrtg},
};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Net rating normalized against each season")]
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

    let written = for_each_year(nrtg::STEM, years, |year| nrtg::run_year(&args.data.data_dir, year))?;
    info!(seasons = written.len(), "nrtg done");
    Ok(())
}
