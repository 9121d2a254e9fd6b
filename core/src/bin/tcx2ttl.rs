use clap::Parser;
use log::error;

use tcxgraph_core::cli::{run, Args};
use tcxgraph_core::METRICS;

fn main() {
    // RUST_LOG styrer nivået; standard er info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args, &METRICS) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
