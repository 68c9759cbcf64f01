use anyhow::Result;
use bbref_scraper::{
    logging,
    model::{
        self,
        svr::{Kernel, SupportVector},
        EvalArgs,
    },
};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Support vector regression on season metrics")]
struct Args {
    #[command(flatten)]
    eval: EvalArgs,

    #[arg(long, value_enum, default_value_t = Kernel::Linear)]
    kernel: Kernel,

    #[arg(short = 'C', long = "c", default_value_t = 1.0)]
    c: f64,

    #[arg(long, default_value_t = 0.1)]
    epsilon: f64,
}

fn main() -> Result<()> {
    logging::init("info");
    let args = Args::parse();
    let svr = SupportVector {
        kernel: args.kernel,
        c: args.c,
        epsilon: args.epsilon,
    };
    println!("{}", model::run(&svr, &args.eval)?);
    Ok(())
}
