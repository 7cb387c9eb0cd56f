//! Date-range summary command

use std::io::{self, Write};

use anyhow::{Context, Result};
use tally_core::{format_money, PeriodSummary, TransactionStore, DATE_FORMAT};

use super::{parse_date_arg, write_rows};

pub fn cmd_summary(
    store: &TransactionStore,
    from: &str,
    to: &str,
    rows: bool,
    json: bool,
) -> Result<()> {
    let from = parse_date_arg(from, "--from")?;
    let to = parse_date_arg(to, "--to")?;

    let ledger = store.load_ledger().context("Failed to read transactions")?;
    let summary = match ledger.summarize(from, to) {
        Ok(summary) => summary,
        Err(tally_core::Error::EmptyDataset(msg)) => {
            println!();
            println!("There are {}", msg);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    write_summary(&mut io::stdout(), &summary)?;
    if rows {
        println!();
        write_rows(
            &mut io::stdout(),
            &summary.transactions.iter().collect::<Vec<_>>(),
        )?;
    }

    Ok(())
}

/// Print the three totals for a summary
pub fn write_summary<W: Write>(out: &mut W, summary: &PeriodSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "📊 {} to {} ({} transactions)",
        summary.from.format(DATE_FORMAT),
        summary.to.format(DATE_FORMAT),
        summary.len()
    )?;
    writeln!(out, "   Total Income:  {}", format_money(summary.income))?;
    writeln!(out, "   Total Spent:   {}", format_money(summary.spent))?;
    writeln!(out, "   Total Savings: {}", format_money(summary.savings))?;
    Ok(())
}
