//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally                          Interactive menu
//!   tally init                     Create the transaction store
//!   tally add                      Add a transaction (interactive)
//!   tally summary --from --to      Totals for a date range
//!   tally chart cash-flow          Render a chart to SVG
//!   tally serve --port 3000        Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let store = commands::open_store(&config, cli.file.as_deref());
    debug!("Using transaction store at {}", store.path().display());

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Init => commands::cmd_init(&store),
        Commands::Add(args) => {
            if args.is_interactive() {
                commands::cmd_add_interactive(&store, &config)
            } else {
                commands::cmd_add(&store, &args)
            }
        }
        Commands::Summary {
            from,
            to,
            rows,
            json,
        } => commands::cmd_summary(&store, &from, &to, rows, json),
        Commands::List(args) => commands::cmd_list(&store, &args),
        Commands::Chart { kind, output } => {
            commands::cmd_chart(&store, &config, &kind, output.as_deref())
        }
        Commands::Menu => commands::cmd_menu(&store, &config),
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            commands::cmd_serve(store, config, &host, port).await
        }
    }
}
