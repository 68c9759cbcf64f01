use anyhow::Result;
use bbref_scraper::{
    logging,
    model::{self, linear::Linear, EvalArgs},
};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Ordinary least squares on season metrics")]
struct Args {
    #[command(flatten)]
    eval: EvalArgs,
}

fn main() -> Result<()> {
    logging::init("info");
    let args = Args::parse();
    let evaluation = model::run(&Linear, &args.eval)?;
    println!("{}", evaluation);
    Ok(())
}
