//! Bar charts: monthly cash flow and sub-category expenses

use svg::node::element::{Line, Rectangle};
use svg::Document;

use super::{
    canvas, label, sub_category_color, to_f32, ChartStyle, Plot, AXIS_COLOR, EXPENSE_COLOR,
    INCOME_COLOR,
};
use crate::analytics::{CashFlowReport, ChartKind, SubCategoryByMonth};
use crate::models::format_money;

/// Headroom above the tallest bar, for the value labels and annotation
const HEADROOM: f32 = 1.3;

fn axis(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", AXIS_COLOR)
        .set("stroke-width", 1.5)
}

fn bar(x: f32, y: f32, width: f32, height: f32, fill: &str) -> Rectangle {
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width.max(0.0))
        .set("height", height.max(0.0))
        .set("fill", fill)
}

/// Grouped Income/Expense bars per month, with the latest net income on top
pub(super) fn cash_flow(report: &CashFlowReport, style: &ChartStyle) -> Document {
    let plot = Plot::new(style, 70.0);
    let mut doc = canvas(style, &format!("Monthly {}", ChartKind::CashFlow.title()));

    let max = (to_f32(report.max_bar()) * HEADROOM).max(1.0);
    let scale = |v: f32| v / max * plot.height;
    let group_width = plot.width / report.months.len().max(1) as f32;
    let bar_width = group_width * 0.35;

    for (i, (period, bucket)) in report.months.iter().enumerate() {
        let group_left = plot.left + group_width * i as f32 + group_width * 0.15;
        let bars = [
            (bucket.income, INCOME_COLOR),
            (bucket.expense, EXPENSE_COLOR),
        ];
        for (j, (value, color)) in bars.into_iter().enumerate() {
            let height = scale(to_f32(value));
            let x = group_left + bar_width * j as f32;
            let y = plot.bottom() - height;
            doc = doc.add(bar(x, y, bar_width, height, color)).add(
                label(format!("{:.2}", value), x + bar_width / 2.0, y - 4.0, 10)
                    .set("text-anchor", "middle"),
            );
        }
        doc = doc.add(
            label(
                format!("{} {}", period.abbr(), period.year),
                group_left + bar_width,
                plot.bottom() + 18.0,
                11,
            )
            .set("text-anchor", "middle"),
        );
    }

    let net_color = if report.net_income < rust_decimal::Decimal::ZERO {
        EXPENSE_COLOR
    } else {
        INCOME_COLOR
    };
    doc = doc
        .add(
            label(format_money(report.net_income), plot.left + 12.0, plot.top + 24.0, 20)
                .set("fill", net_color),
        )
        .add(label(
            format!("{} Net Income", report.latest.abbr()),
            plot.left + 12.0,
            plot.top + 42.0,
            12,
        ));

    // Legend
    for (i, (name, color)) in [("Income", INCOME_COLOR), ("Expense", EXPENSE_COLOR)]
        .into_iter()
        .enumerate()
    {
        let y = plot.top + 14.0 + 18.0 * i as f32;
        doc = doc
            .add(bar(plot.right() - 90.0, y - 10.0, 12.0, 12.0, color))
            .add(label(name, plot.right() - 72.0, y, 12));
    }

    doc.add(axis(plot.left, plot.top, plot.left, plot.bottom()))
        .add(axis(plot.left, plot.bottom(), plot.right(), plot.bottom()))
        .add(
            label("Month", plot.left + plot.width / 2.0, plot.bottom() + 40.0, 12)
                .set("text-anchor", "middle"),
        )
        .add(
            label("Amount ($)", 16.0, plot.top + plot.height / 2.0, 12)
                .set("text-anchor", "middle")
                .set(
                    "transform",
                    format!("rotate(-90 16 {})", plot.top + plot.height / 2.0),
                ),
        )
}

/// Horizontal bars, one per (month, sub-category), in aggregate order
pub(super) fn sub_category_by_month(view: &SubCategoryByMonth, style: &ChartStyle) -> Document {
    let plot = Plot::new(style, 200.0);
    let mut doc = canvas(
        style,
        &format!("{} ({})", ChartKind::SubcatExpensesByMonth.title(), view.year),
    );

    let max = view
        .rows
        .iter()
        .map(|r| to_f32(r.total))
        .fold(0.0_f32, f32::max)
        .max(1.0)
        * 1.15;
    let row_height = plot.height / view.rows.len().max(1) as f32;
    let bar_height = row_height * 0.7;

    for (i, row) in view.rows.iter().enumerate() {
        let y = plot.top + row_height * i as f32 + (row_height - bar_height) / 2.0;
        let width = to_f32(row.total) / max * plot.width;
        let text_y = y + bar_height / 2.0 + 4.0;
        doc = doc
            .add(bar(
                plot.left,
                y,
                width,
                bar_height,
                sub_category_color(row.sub_category),
            ))
            .add(label(row.label(), plot.left - 6.0, text_y, 11).set("text-anchor", "end"))
            .add(label(format_money(row.total), plot.left + width + 4.0, text_y, 10));
    }

    doc.add(axis(plot.left, plot.top, plot.left, plot.bottom()))
        .add(axis(plot.left, plot.bottom(), plot.right(), plot.bottom()))
        .add(
            label("Amount ($)", plot.left + plot.width / 2.0, plot.bottom() + 30.0, 12)
                .set("text-anchor", "middle"),
        )
}
