//! Transaction command implementations

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::classifier::parse_entry_date;
use tally_core::{
    format_money, Amount, Config, DatedTransaction, Memo, Prompter, SubCategory, Transaction,
    TransactionFilter, TransactionStore, DATE_FORMAT,
};

use super::truncate;
use super::{parse_amount_arg, parse_category_arg, parse_date_arg, parse_sub_category_arg};
use crate::cli::{AddArgs, ListArgs};

pub fn cmd_add_interactive(store: &TransactionStore, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout(), config.prompts.max_attempts);
    let tx = prompter.transaction().context("Transaction not added")?;
    save_transaction(store, &tx)
}

pub fn cmd_add(store: &TransactionStore, args: &AddArgs) -> Result<()> {
    let tx = build_transaction(args, Local::now().date_naive())?;
    save_transaction(store, &tx)
}

/// Build a transaction from `add` flags. Category, sub-category and amount
/// are required; date defaults to `today` and memo to empty.
pub fn build_transaction(args: &AddArgs, today: NaiveDate) -> Result<Transaction> {
    let date = parse_entry_date(args.date.as_deref().unwrap_or(""), today)
        .context("Invalid --date")?;
    let category = parse_category_arg(
        args.category
            .as_deref()
            .context("--category is required with flags")?,
    )?;
    let sub_category = parse_sub_category_arg(
        category,
        args.sub_category
            .as_deref()
            .context("--sub-category is required with flags")?,
    )?;
    let memo = Memo::new(args.memo.clone().unwrap_or_default()).context("Invalid --memo")?;
    let amount = args
        .amount
        .as_deref()
        .context("--amount is required with flags")?
        .parse::<Amount>()
        .context("Invalid --amount")?;

    Ok(Transaction::new(date, category, sub_category, memo, amount)?)
}

pub(crate) fn save_transaction(store: &TransactionStore, tx: &Transaction) -> Result<()> {
    store
        .append(tx)
        .with_context(|| format!("Failed to write {}", store.path().display()))?;
    println!("✅ Transaction added successfully");
    Ok(())
}

/// Turn `list` flags into a filter
pub fn build_filter(args: &ListArgs) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::new();
    if let Some(from) = &args.from {
        filter = filter.with_from(parse_date_arg(from, "--from")?);
    }
    if let Some(to) = &args.to {
        filter = filter.with_to(parse_date_arg(to, "--to")?);
    }
    for category in &args.category {
        filter = filter.with_category(parse_category_arg(category)?);
    }
    for sub in &args.sub_category {
        let sub = sub
            .parse::<SubCategory>()
            .with_context(|| format!("Unknown sub-category '{}'", sub))?;
        filter = filter.with_sub_category(sub);
    }
    if let Some(min) = &args.min {
        filter = filter.with_min_amount(parse_amount_arg(min, "--min")?);
    }
    if let Some(max) = &args.max {
        filter = filter.with_max_amount(parse_amount_arg(max, "--max")?);
    }
    Ok(filter)
}

pub fn cmd_list(store: &TransactionStore, args: &ListArgs) -> Result<()> {
    let filter = build_filter(args)?;
    let ledger = store.load_ledger().context("Failed to read transactions")?;

    let rows: Vec<&DatedTransaction> = ledger
        .filter(&filter)
        .into_iter()
        .rev()
        .take(args.limit)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  tally add");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");
    write_rows(&mut io::stdout(), &rows)?;

    Ok(())
}

pub(crate) fn write_rows<W: Write>(out: &mut W, rows: &[&DatedTransaction]) -> io::Result<()> {
    for tx in rows {
        let amount_str = if tx.is_income() {
            format!("\x1b[32m+{}\x1b[0m", format_money(tx.amount())) // Green for income
        } else {
            format_money(tx.amount())
        };

        writeln!(
            out,
            "   {} │ {:>12} │ {:<22} │ {}",
            tx.date().format(DATE_FORMAT),
            amount_str,
            tx.sub_category().as_str(),
            truncate(tx.transaction.memo().as_str(), 30)
        )?;
    }
    Ok(())
}
