//! SVG chart renderer
//!
//! Draws prepared [`ChartData`] only. Every number on a chart comes from the
//! aggregate it is handed; nothing here recomputes totals.

mod bars;
mod lines;
mod pie;

use std::fs;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use svg::node::element::{Rectangle, Text};
use svg::Document;
use tracing::info;

use crate::analytics::ChartData;
use crate::config::ChartsConfig;
use crate::error::Result;
use crate::models::SubCategory;

const INCOME_COLOR: &str = "#4bd02b";
const EXPENSE_COLOR: &str = "#e33434";
const LINE_COLOR: &str = "#317fce";
const AXIS_COLOR: &str = "#333333";
const FONT: &str = "sans-serif";

/// One colour per sub-category, in [`SubCategory::all`] order
const PALETTE: [&str; 22] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#393b79", "#637939", "#8c6d31", "#843c39", "#7b4173", "#3182bd",
    "#e6550d", "#31a354", "#756bb1", "#636363", "#fd8d3c", "#74c476",
];

/// Canvas and labelling options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub label_threshold_pct: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            label_threshold_pct: crate::analytics::DEFAULT_LABEL_THRESHOLD_PCT,
        }
    }
}

impl From<&ChartsConfig> for ChartStyle {
    fn from(config: &ChartsConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            label_threshold_pct: config.label_threshold_pct,
        }
    }
}

/// Draw a prepared aggregate
pub fn render(data: &ChartData, style: &ChartStyle) -> Document {
    match data {
        ChartData::CashFlow(report) => bars::cash_flow(report, style),
        ChartData::CategoricalExpenses(breakdown) => pie::categorical(breakdown, style),
        ChartData::SubcatExpensesByMonth(view) => bars::sub_category_by_month(view, style),
        ChartData::CumulativeSpend(cmp) => lines::cumulative(cmp, style),
    }
}

/// Draw a prepared aggregate as SVG markup
pub fn render_to_string(data: &ChartData, style: &ChartStyle) -> String {
    render(data, style).to_string()
}

/// Draw a prepared aggregate and write it to `path`
pub fn save(data: &ChartData, style: &ChartStyle, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    svg::save(path, &render(data, style))?;
    info!("Saved {} chart to {}", data.kind(), path.display());
    Ok(())
}

/// Colour assigned to a sub-category
fn sub_category_color(sub_category: SubCategory) -> &'static str {
    SubCategory::all()
        .position(|s| s == sub_category)
        .and_then(|i| PALETTE.get(i).copied())
        .unwrap_or(AXIS_COLOR)
}

fn to_f32(value: Decimal) -> f32 {
    value.to_f32().unwrap_or(0.0)
}

/// Blank canvas with a white background and a centred title
fn canvas(style: &ChartStyle, title: &str) -> Document {
    let width = style.width as f32;
    let height = style.height as f32;

    let background = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", width)
        .set("height", height)
        .set("fill", "white");

    Document::new()
        .set("viewBox", format!("0 0 {} {}", style.width, style.height))
        .set("width", style.width)
        .set("height", style.height)
        .add(background)
        .add(label(title, width / 2.0, 28.0, 18).set("text-anchor", "middle"))
}

fn label(content: impl Into<String>, x: f32, y: f32, size: u32) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT)
        .set("font-size", size)
        .set("fill", AXIS_COLOR)
}

/// Plot area inside the canvas margins
#[derive(Debug, Clone, Copy)]
struct Plot {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl Plot {
    fn new(style: &ChartStyle, left: f32) -> Self {
        let top = 60.0;
        let bottom = 50.0;
        let right = 30.0;
        Self {
            left,
            top,
            width: (style.width as f32 - left - right).max(1.0),
            height: (style.height as f32 - top - bottom).max(1.0),
        }
    }

    fn bottom(&self) -> f32 {
        self.top + self.height
    }

    fn right(&self) -> f32 {
        self.left + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{ChartKind, Ledger};
    use crate::models::TransactionRecord;

    fn ledger() -> Ledger {
        let rows = [
            ("01-05-2024", "Income", "Income", "1000"),
            ("01-10-2024", "Essential", "Groceries", "200"),
            ("02-05-2024", "Income", "Income", "1000"),
            ("02-10-2024", "Essential", "Groceries", "150"),
        ];
        let records: Vec<TransactionRecord> = rows
            .iter()
            .map(|(date, category, sub, amount)| TransactionRecord {
                date: date.to_string(),
                category: category.to_string(),
                sub_category: sub.to_string(),
                memo: String::new(),
                amount: amount.to_string(),
            })
            .collect();
        Ledger::from_records(&records).unwrap()
    }

    #[test]
    fn test_every_chart_renders() {
        let ledger = ledger();
        let style = ChartStyle::default();
        for kind in ChartKind::ALL {
            let svg = render_to_string(&ledger.prepare(kind).unwrap(), &style);
            assert!(svg.contains("<svg"), "{}", kind);
            assert!(svg.contains(kind.title()), "{}", kind);
        }
    }

    #[test]
    fn test_cash_flow_shows_latest_net_income() {
        let data = ledger().prepare(ChartKind::CashFlow).unwrap();
        let svg = render_to_string(&data, &ChartStyle::default());
        assert!(svg.contains("$850.00"));
        assert!(svg.contains("Feb Net Income"));
        assert!(svg.contains(INCOME_COLOR));
    }

    #[test]
    fn test_cumulative_shows_comparison() {
        let data = ledger().prepare(ChartKind::CumulativeSpend).unwrap();
        let svg = render_to_string(&data, &ChartStyle::default());
        assert!(svg.contains("$50.00 less than last month"));
        assert!(svg.contains(LINE_COLOR));
    }

    #[test]
    fn test_pie_labels_follow_threshold() {
        let data = ledger().prepare(ChartKind::CategoricalExpenses).unwrap();
        let svg = render_to_string(&data, &ChartStyle::default());
        assert!(svg.contains("Groceries"));
        assert!(svg.contains("100.00%"));
    }

    #[test]
    fn test_pie_skips_slice_just_under_threshold() {
        let txs = crate::analytics::test_support::dated(&[
            ("01-01-2024", "Essential", "Groceries", "85.005"),
            ("01-02-2024", "Non-Essential", "Gifts", "14.995"),
        ]);
        let breakdown = crate::analytics::categorical_expenses(&txs).unwrap();
        let svg = render_to_string(
            &ChartData::CategoricalExpenses(breakdown),
            &ChartStyle::default(),
        );
        assert!(svg.contains("85.00%"));
        assert!(!svg.contains("15.00%"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("charts/cash-flow.svg");
        let data = ledger().prepare(ChartKind::CashFlow).unwrap();
        save(&data, &ChartStyle::default(), &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn test_palette_covers_every_sub_category() {
        for sub in SubCategory::all() {
            assert_ne!(sub_category_color(sub), AXIS_COLOR);
        }
    }
}
