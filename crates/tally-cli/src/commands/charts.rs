//! Chart rendering command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::render::{self, ChartStyle};
use tally_core::{ChartKind, Config, TransactionStore};

pub fn cmd_chart(
    store: &TransactionStore,
    config: &Config,
    kind: &str,
    output: Option<&Path>,
) -> Result<()> {
    let kind: ChartKind = kind.parse()?;
    let path = render_chart(store, config, kind, output)?;
    println!("📈 {} chart saved to {}", kind.title(), path.display());
    Ok(())
}

/// Prepare and save one chart, returning where it was written
pub fn render_chart(
    store: &TransactionStore,
    config: &Config,
    kind: ChartKind,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let ledger = store.load_ledger().context("Failed to read transactions")?;
    let data = ledger.prepare(kind)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.charts.output_dir.join(kind.file_name()));
    render::save(&data, &ChartStyle::from(&config.charts), &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
