//! Cumulative spend lines: current month against the month before

use svg::node::element::path::Data;
use svg::node::element::{Line, Path};
use svg::Document;

use super::{
    canvas, label, to_f32, ChartStyle, Plot, AXIS_COLOR, EXPENSE_COLOR, INCOME_COLOR, LINE_COLOR,
};
use crate::analytics::{ChartKind, CumulativeSeries, SpendComparison};

/// Days shown on the x axis
const DAYS: f32 = 31.0;

fn series_path(
    series: &CumulativeSeries,
    x: &impl Fn(u32) -> f32,
    y: &impl Fn(f32) -> f32,
) -> Option<Data> {
    let (first, rest) = series.points.split_first()?;
    // Step from zero on day 0 so a lone point still draws a segment
    let data = Data::new()
        .move_to((x(0), y(0.0)))
        .line_to((x(first.day), y(to_f32(first.total))));
    Some(rest.iter().fold(data, |data, p| {
        data.line_to((x(p.day), y(to_f32(p.total))))
    }))
}

pub(super) fn cumulative(cmp: &SpendComparison, style: &ChartStyle) -> Document {
    let plot = Plot::new(style, 70.0);
    let mut doc = canvas(
        style,
        &format!(
            "{}: {} {}",
            ChartKind::CumulativeSpend.title(),
            cmp.current.period.name(),
            cmp.current.period.year
        ),
    );

    let max = cmp
        .current
        .points
        .iter()
        .chain(&cmp.previous.points)
        .map(|p| to_f32(p.total))
        .fold(0.0_f32, f32::max)
        .max(1.0)
        * 1.2;
    let x = |day: u32| plot.left + day as f32 / DAYS * plot.width;
    let y = |value: f32| plot.bottom() - value / max * plot.height;

    if let Some(data) = series_path(&cmp.previous, &x, &y) {
        doc = doc.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", LINE_COLOR)
                .set("stroke-width", 2)
                .set("stroke-opacity", 0.4)
                .set("stroke-dasharray", "6 4"),
        );
    }
    if let Some(data) = series_path(&cmp.current, &x, &y) {
        doc = doc.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", LINE_COLOR)
                .set("stroke-width", 2.5),
        );
    }

    // Marker at the day being compared
    let marker_x = x(cmp.most_recent_day);
    doc = doc.add(
        Line::new()
            .set("x1", marker_x)
            .set("y1", plot.top)
            .set("x2", marker_x)
            .set("y2", plot.bottom())
            .set("stroke", AXIS_COLOR)
            .set("stroke-opacity", 0.3)
            .set("stroke-dasharray", "2 3"),
    );

    let color = if cmp.spent_more() {
        EXPENSE_COLOR
    } else {
        INCOME_COLOR
    };
    doc = doc
        .add(label(cmp.summary(), plot.left + 12.0, plot.top + 20.0, 14).set("fill", color))
        .add(label(
            format!("{} (current)", cmp.current.period.abbr()),
            plot.right() - 120.0,
            plot.top + 16.0,
            11,
        ))
        .add(
            label(
                format!("{} (previous)", cmp.previous.period.abbr()),
                plot.right() - 120.0,
                plot.top + 32.0,
                11,
            )
            .set("fill-opacity", 0.6),
        );

    for day in (1..=31).step_by(5) {
        doc = doc.add(
            label(day.to_string(), x(day), plot.bottom() + 16.0, 10).set("text-anchor", "middle"),
        );
    }

    doc.add(
        Line::new()
            .set("x1", plot.left)
            .set("y1", plot.bottom())
            .set("x2", plot.right())
            .set("y2", plot.bottom())
            .set("stroke", AXIS_COLOR),
    )
    .add(
        Line::new()
            .set("x1", plot.left)
            .set("y1", plot.top)
            .set("x2", plot.left)
            .set("y2", plot.bottom())
            .set("stroke", AXIS_COLOR),
    )
    .add(
        label("Day", plot.left + plot.width / 2.0, plot.bottom() + 36.0, 12)
            .set("text-anchor", "middle"),
    )
}
