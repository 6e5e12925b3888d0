mod book;
mod cli;
mod commands;
mod config;
mod error;
mod output;
mod storage;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    book::EventBook,
    cli::Cli,
    commands::{execute, RunOptions},
    storage::open_store,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventgrid=info,eventgrid_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config();
    tracing::debug!(?config, "Loaded configuration");

    let store = open_store(&config).await?;
    let book = EventBook::open(store, config.storage_key.clone()).await;

    let opts = RunOptions {
        format: cli.format,
        quiet: cli.quiet,
        display_limit: config.display_limit,
        today: chrono::Local::now().date_naive(),
    };

    let output = execute(cli.command, &book, opts).await?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
