//! Interactive numbered menu
//!
//! The loop reads from any reader so tests can drive it with canned input.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tally_core::analytics::parse_store_date;
use tally_core::{ChartKind, Config, Error, Prompter, TransactionStore};

use super::{render_chart, write_rows, write_summary};

pub fn cmd_menu(store: &TransactionStore, config: &Config) -> Result<()> {
    store
        .initialize()
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout(), config.prompts.max_attempts);
    run_menu(&mut prompter, store, config)
}

/// Run the menu until the user picks Exit or input ends
pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &TransactionStore,
    config: &Config,
) -> Result<()> {
    loop {
        let out = prompter.output();
        writeln!(out, "\n{} Choose an option {}", "*".repeat(20), "*".repeat(20))?;
        writeln!(out, "1: Add transaction")?;
        writeln!(out, "2: View transaction summary within a date range")?;
        writeln!(out, "3: View spending trends")?;
        writeln!(out, "4: Exit")?;

        let Some(choice) = prompter.try_line("\nEnter an option: ")? else {
            break;
        };

        match choice.trim().parse::<u32>() {
            Ok(1) => add_transaction(prompter, store)?,
            Ok(2) => summarize(prompter, store)?,
            Ok(3) => charts(prompter, store, config)?,
            Ok(4) => {
                writeln!(prompter.output(), "\nYou chose to exit")?;
                break;
            }
            _ => writeln!(
                prompter.output(),
                "Invalid option. Please choose one of the options available."
            )?,
        }
    }
    Ok(())
}

fn add_transaction<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &TransactionStore,
) -> Result<()> {
    writeln!(prompter.output(), "\nYou chose to add a transaction\n")?;

    match prompter.transaction() {
        Ok(tx) => {
            store
                .append(&tx)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            writeln!(prompter.output(), "Transaction added successfully")?;
        }
        Err(e) => writeln!(prompter.output(), "\nTransaction not added: {}", e)?,
    }
    Ok(())
}

fn summarize<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &TransactionStore,
) -> Result<()> {
    writeln!(
        prompter.output(),
        "\nEnter the start date and end date for the period you want to summarize (mm-dd-yyyy)"
    )?;
    let start = prompter.line("Start Date: ")?;
    let end = prompter.line("End Date: ")?;

    let (Some(from), Some(to)) = (parse_store_date(&start), parse_store_date(&end)) else {
        writeln!(prompter.output(), "\nInvalid date. Use mm-dd-yyyy.")?;
        return Ok(());
    };

    let summary = match store.load_ledger().and_then(|ledger| ledger.summarize(from, to)) {
        Ok(summary) => summary,
        Err(Error::EmptyDataset(msg)) => {
            writeln!(prompter.output(), "\nThere are {}", msg)?;
            return Ok(());
        }
        Err(e) => {
            writeln!(prompter.output(), "\n{}", e)?;
            return Ok(());
        }
    };

    write_summary(prompter.output(), &summary)?;

    let answer = prompter
        .try_line("\nWould you like to view the dataset? (y/n) ")?
        .unwrap_or_default();
    if answer.trim().to_lowercase().starts_with('y') {
        writeln!(prompter.output())?;
        write_rows(
            prompter.output(),
            &summary.transactions.iter().collect::<Vec<_>>(),
        )?;
    }
    Ok(())
}

fn charts<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &TransactionStore,
    config: &Config,
) -> Result<()> {
    let out = prompter.output();
    writeln!(out, "\n{} Available Charts {}", "*".repeat(15), "*".repeat(15))?;
    writeln!(out, "0 - Exit")?;
    for kind in ChartKind::ALL {
        writeln!(out, "{} - {}", kind.menu_number(), kind.title())?;
    }

    let Some(choice) = prompter.try_line("\nWhich visual would you like to view? ")? else {
        return Ok(());
    };
    let choice = choice.trim();
    if choice == "0" {
        return Ok(());
    }

    let Some(kind) = choice.parse::<u32>().ok().and_then(ChartKind::from_menu_number) else {
        writeln!(
            prompter.output(),
            "\nInvalid option. Please enter an option from the available list."
        )?;
        return Ok(());
    };

    match render_chart(store, config, kind, None) {
        Ok(path) => writeln!(
            prompter.output(),
            "\n{} chart saved to {}",
            kind.title(),
            path.display()
        )?,
        Err(e) => writeln!(prompter.output(), "\n{:#}", e)?,
    }
    Ok(())
}
