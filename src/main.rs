#[macro_use]
extern crate tracing;

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use configs::{Args, GlobalConfig};

mod components;
mod configs;
mod error;
mod generator;
mod types;

fn main() -> AnyResult<()> {
    // Load environment variables from the `.env` file
    dotenvy::dotenv().ok();
    // Diagnostics go to stderr, leaving stdout untouched
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let config = GlobalConfig::load_config(&args).context("Failed to parse configuration files")?;

    // One unit of work per run, no parallelism needed
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to bootstrap the Tokio runtime")?
        .block_on(generator::run(config))
}
