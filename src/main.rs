use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cml::cli::{run, Args};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
