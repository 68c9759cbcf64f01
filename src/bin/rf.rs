use anyhow::Result;
use bbref_scraper::{
    logging,
    model::{self, forest::RandomForest, EvalArgs},
};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Random forest regression on season metrics")]
struct Args {
    #[command(flatten)]
    eval: EvalArgs,

    #[arg(long, default_value_t = 100)]
    n_estimators: usize,

    /// Unlimited when omitted
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> Result<()> {
    logging::init("info");
    let args = Args::parse();
    let forest = RandomForest {
        n_estimators: args.n_estimators,
        max_depth: args.max_depth,
        ..RandomForest::default()
    };
    println!("{}", model::run(&forest, &args.eval)?);
    Ok(())
}
