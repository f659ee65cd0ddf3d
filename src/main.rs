//! rust_qnorm command-line interface

use clap::Parser;
use log::{info, LevelFilter};

use rust_qnorm::cli::Cli;
use rust_qnorm::pipeline::run;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match run(&cli.to_config()) {
        Ok(summary) => {
            info!(
                "Normalized {} samples over {} loci",
                summary.n_samples, summary.n_loci
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
