use clap::Parser;
use tracing_subscriber::EnvFilter;

use ctmu::cli;
use ctmu::cli::Args;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();

    if !cli::run(args).await {
        std::process::exit(1);
    }
}
