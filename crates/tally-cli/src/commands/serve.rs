//! Server command implementation

use anyhow::{Context, Result};
use tally_core::{Config, TransactionStore};

pub async fn cmd_serve(
    store: TransactionStore,
    config: Config,
    host: &str,
    port: u16,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Store: {}", store.path().display());
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    store
        .initialize()
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;

    tally_server::serve(store, config, host, port).await?;

    Ok(())
}
