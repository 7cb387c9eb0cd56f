//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Cursor;

use chrono::NaiveDate;
use tally_core::{Category, ChartKind, Config, Prompter, SubCategory, TransactionStore};
use tempfile::TempDir;

use crate::cli::{AddArgs, ListArgs};
use crate::commands::{self, truncate};

const FEBRUARY_CSV: &str = "Date,Category,Sub-Category,Memo,Amount
01-05-2024,Income,Income,paycheck,1000
01-10-2024,Essential,Groceries,weekly shop,200
02-05-2024,Income,Income,paycheck,1000
02-10-2024,Essential,Groceries,weekly shop,150
";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn setup_test_store(content: Option<&str>) -> (TempDir, TransactionStore, Config) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.csv");
    if let Some(content) = content {
        std::fs::write(&path, content).unwrap();
    }
    let mut config = Config::default();
    config.charts.output_dir = dir.path().join("charts");
    (dir, TransactionStore::new(path), config)
}

fn add_args(category: &str, sub_category: &str, amount: &str) -> AddArgs {
    AddArgs {
        date: Some("03-14-2024".into()),
        category: Some(category.into()),
        sub_category: Some(sub_category.into()),
        memo: Some("test".into()),
        amount: Some(amount.into()),
    }
}

/// Drive the menu with canned input, returning what it printed
fn run_menu_with(input: &str, store: &TransactionStore, config: &Config) -> String {
    let mut prompter =
        Prompter::new(Cursor::new(input.as_bytes()), Vec::new(), 5).with_today(today());
    commands::run_menu(&mut prompter, store, config).unwrap();
    let (_, output) = prompter.into_inner();
    String::from_utf8(output).unwrap()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_category_arg() {
    assert_eq!(
        commands::parse_category_arg("e").unwrap(),
        Category::Essential
    );
    assert_eq!(
        commands::parse_category_arg("Savings & Investments").unwrap(),
        Category::SavingsInvestments
    );
    assert!(commands::parse_category_arg("X").is_err());
}

#[test]
fn test_parse_sub_category_arg() {
    assert_eq!(
        commands::parse_sub_category_arg(Category::Essential, "7").unwrap(),
        SubCategory::Groceries
    );
    assert_eq!(
        commands::parse_sub_category_arg(Category::NonEssential, "food & dining").unwrap(),
        SubCategory::FoodDining
    );
    assert!(commands::parse_sub_category_arg(Category::Income, "Groceries").is_err());
    assert!(commands::parse_sub_category_arg(Category::Income, "4").is_err());
}

#[test]
fn test_parse_date_arg() {
    assert_eq!(
        commands::parse_date_arg("02-29-2024", "--from").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
    let err = commands::parse_date_arg("2024-02-29", "--from").unwrap_err();
    assert!(err.to_string().contains("--from"));
}

// ========== Add Command Tests ==========

#[test]
fn test_build_transaction_from_flags() {
    let tx = commands::build_transaction(&add_args("N", "Travel", "310.25"), today()).unwrap();
    assert_eq!(tx.category(), Category::NonEssential);
    assert_eq!(tx.sub_category(), SubCategory::Travel);
    assert_eq!(tx.amount().to_string(), "310.25");
}

#[test]
fn test_build_transaction_defaults_date_to_today() {
    let mut args = add_args("I", "1", "1000");
    args.date = None;
    args.memo = None;

    let tx = commands::build_transaction(&args, today()).unwrap();
    assert_eq!(tx.date(), today());
    assert_eq!(tx.memo().as_str(), "");
}

#[test]
fn test_build_transaction_rejects_bad_input() {
    // Mismatched pair
    assert!(commands::build_transaction(&add_args("I", "Groceries", "10"), today()).is_err());
    // Non-positive amount
    assert!(commands::build_transaction(&add_args("E", "Pets", "-3"), today()).is_err());
    // Future date
    let mut args = add_args("E", "Pets", "10");
    args.date = Some("03-16-2024".into());
    assert!(commands::build_transaction(&args, today()).is_err());
    // Missing amount
    let mut args = add_args("E", "Pets", "10");
    args.amount = None;
    assert!(commands::build_transaction(&args, today()).is_err());
}

#[test]
fn test_add_args_interactive_without_flags() {
    assert!(AddArgs::default().is_interactive());
    assert!(!add_args("E", "Pets", "10").is_interactive());
}

#[test]
fn test_cmd_init_and_add() {
    let (_dir, store, _config) = setup_test_store(None);

    commands::cmd_init(&store).unwrap();
    assert!(store.exists());
    // Second init leaves the file alone
    commands::cmd_init(&store).unwrap();

    commands::cmd_add(&store, &add_args("E", "Groceries", "45.50")).unwrap();
    let records = store.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sub_category, "Groceries");
    assert_eq!(records[0].amount, "45.50");
}

// ========== List Command Tests ==========

#[test]
fn test_build_filter() {
    let (_dir, store, _config) = setup_test_store(Some(FEBRUARY_CSV));
    let ledger = store.load_ledger().unwrap();

    let args = ListArgs {
        from: Some("02-01-2024".into()),
        category: vec!["E".into()],
        ..Default::default()
    };
    let filter = commands::build_filter(&args).unwrap();
    let rows = ledger.filter(&filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount().to_string(), "150");

    let args = ListArgs {
        min: Some("500".into()),
        ..Default::default()
    };
    let rows = ledger.filter(&commands::build_filter(&args).unwrap());
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|tx| tx.is_income()));
}

#[test]
fn test_build_filter_rejects_bad_flags() {
    let args = ListArgs {
        to: Some("yesterday".into()),
        ..Default::default()
    };
    assert!(commands::build_filter(&args).is_err());

    let args = ListArgs {
        sub_category: vec!["Lottery".into()],
        ..Default::default()
    };
    assert!(commands::build_filter(&args).is_err());
}

#[test]
fn test_cmd_list_and_summary_on_store() {
    let (_dir, store, _config) = setup_test_store(Some(FEBRUARY_CSV));

    commands::cmd_list(&store, &ListArgs::default()).unwrap();
    commands::cmd_summary(&store, "01-01-2024", "01-31-2024", true, false).unwrap();
    // Empty range prints a message rather than failing
    commands::cmd_summary(&store, "06-01-2024", "06-30-2024", false, false).unwrap();
    assert!(commands::cmd_summary(&store, "2024-01-01", "01-31-2024", false, false).is_err());
}

// ========== Chart Command Tests ==========

#[test]
fn test_render_chart_to_default_path() {
    let (dir, store, config) = setup_test_store(Some(FEBRUARY_CSV));

    let path = commands::render_chart(&store, &config, ChartKind::CashFlow, None).unwrap();
    assert_eq!(path, dir.path().join("charts").join("cash-flow.svg"));

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Feb Net Income"));
}

#[test]
fn test_render_chart_to_explicit_path() {
    let (dir, store, config) = setup_test_store(Some(FEBRUARY_CSV));
    let output = dir.path().join("out").join("spend.svg");

    commands::cmd_chart(&store, &config, "cumulative-spend", Some(output.as_path())).unwrap();
    assert!(output.exists());
}

#[test]
fn test_render_chart_on_empty_store_fails() {
    let (_dir, store, config) = setup_test_store(None);
    store.initialize().unwrap();

    let err = commands::render_chart(&store, &config, ChartKind::CategoricalExpenses, None)
        .unwrap_err();
    assert!(err.to_string().contains("No data"));
    assert!(commands::cmd_chart(&store, &config, "histogram", None).is_err());
}

// ========== Menu Tests ==========

#[test]
fn test_menu_add_then_summary_then_exit() {
    let (_dir, store, config) = setup_test_store(None);
    store.initialize().unwrap();

    let input = "1\n03-14-2024\nE\n7\nweekly shop\n45.50\n\
                 2\n03-01-2024\n03-31-2024\ny\n\
                 4\n";
    let output = run_menu_with(input, &store, &config);

    assert!(output.contains("Transaction added successfully"));
    assert!(output.contains("Total Spent:   $45.50"));
    assert!(output.contains("weekly shop"));
    assert!(output.contains("You chose to exit"));

    let records = store.read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, "03-14-2024");
    assert_eq!(records[0].category, "Essential");
}

#[test]
fn test_menu_renders_chart() {
    let (dir, store, config) = setup_test_store(Some(FEBRUARY_CSV));

    let output = run_menu_with("3\n1\n4\n", &store, &config);

    assert!(output.contains("1 - Cash Flow"));
    assert!(output.contains("Cash Flow chart saved to"));
    assert!(dir.path().join("charts").join("cash-flow.svg").exists());
}

#[test]
fn test_menu_invalid_options() {
    let (_dir, store, config) = setup_test_store(Some(FEBRUARY_CSV));

    let output = run_menu_with("9\n3\n7\n2\n06-01-2024\n06-30-2024\n", &store, &config);

    assert!(output.contains("Invalid option. Please choose one of the options available."));
    assert!(output.contains("Invalid option. Please enter an option from the available list."));
    assert!(output.contains("There are no transactions between 06-01-2024 and 06-30-2024"));
}

#[test]
fn test_menu_reports_rejected_transaction() {
    let (_dir, store, config) = setup_test_store(None);
    store.initialize().unwrap();

    // Five bad amounts use up the attempts
    let input = "1\n\nN\n1\nshoes\nx\nx\nx\nx\nx\n4\n";
    let output = run_menu_with(input, &store, &config);

    assert!(output.contains("Transaction not added"));
    assert!(store.read_all().unwrap().is_empty());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer memo line", 10), "a longe...");
    assert_eq!(truncate("café au lait", 7), "café...");
}
