//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Track income and spending in a plain CSV file
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with spending charts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction store file (overrides the config file)
    #[arg(short, long, env = "TALLY_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Config file (default: ~/.config/tally/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the store file with its header row
    Init,

    /// Add a transaction (prompts for each field unless flags are given)
    Add(AddArgs),

    /// Show income, spending and savings between two dates
    Summary {
        /// Start date (mm-dd-yyyy)
        #[arg(long)]
        from: String,

        /// End date (mm-dd-yyyy)
        #[arg(long)]
        to: String,

        /// Also print the matching transactions
        #[arg(long)]
        rows: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List transactions, newest first
    List(ListArgs),

    /// Render a chart to an SVG file
    Chart {
        /// cash-flow, categorical-expenses, subcat-expenses-by-month,
        /// cumulative-spend (or 1-4)
        kind: String,

        /// Output file (default: <charts.output_dir>/<kind>.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive numbered menu
    Menu,

    /// Start the web server
    Serve {
        /// Port to listen on (default from config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,
    },
}

/// Non-interactive entry: give category, sub-category and amount to skip the
/// prompts
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Transaction date (mm-dd-yyyy, default today)
    #[arg(long)]
    pub date: Option<String>,

    /// Category code (I/S/E/N) or name
    #[arg(long)]
    pub category: Option<String>,

    /// Sub-category name or its number in the category's list
    #[arg(long)]
    pub sub_category: Option<String>,

    /// Short memo (max 50 characters)
    #[arg(long)]
    pub memo: Option<String>,

    /// Amount, a positive plain decimal
    #[arg(long)]
    pub amount: Option<String>,
}

impl AddArgs {
    pub fn is_interactive(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.sub_category.is_none()
            && self.memo.is_none()
            && self.amount.is_none()
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Earliest date (mm-dd-yyyy)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date (mm-dd-yyyy)
    #[arg(long)]
    pub to: Option<String>,

    /// Category code or name (repeatable)
    #[arg(long)]
    pub category: Vec<String>,

    /// Sub-category name (repeatable)
    #[arg(long)]
    pub sub_category: Vec<String>,

    /// Minimum amount
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount
    #[arg(long)]
    pub max: Option<String>,

    /// Maximum rows to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            category: Vec::new(),
            sub_category: Vec::new(),
            min: None,
            max: None,
            limit: 20,
            json: false,
        }
    }
}
