mod app;
mod cell;
mod config;
mod engine;
mod input;
mod render;
mod seed;
mod sim;
mod surface;
mod viewport;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    app::run()
}
