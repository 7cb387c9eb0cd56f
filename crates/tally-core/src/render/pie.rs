//! Pie chart of expenses by sub-category

use std::f32::consts::{FRAC_PI_2, TAU};

use svg::node::element::path::Data;
use svg::node::element::{Circle, Path};
use svg::Document;

use super::{canvas, label, sub_category_color, to_f32, ChartStyle};
use crate::analytics::{CategoricalBreakdown, ChartKind};
use crate::models::format_money;

/// Slices clockwise from twelve o'clock; labels only on slices at or above
/// the style's threshold.
pub(super) fn categorical(breakdown: &CategoricalBreakdown, style: &ChartStyle) -> Document {
    let mut doc = canvas(style, ChartKind::CategoricalExpenses.title());

    let cx = style.width as f32 / 2.0;
    let cy = style.height as f32 / 2.0 + 20.0;
    let radius = (style.width.min(style.height) as f32 / 2.0 - 70.0).max(10.0);
    let total = to_f32(breakdown.grand_total).max(f32::EPSILON);

    // A single slice would be a zero-length arc
    if let [only] = breakdown.slices.as_slice() {
        doc = doc.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", radius)
                .set("fill", sub_category_color(only.sub_category)),
        );
    }

    let mut start = -FRAC_PI_2;
    for slice in &breakdown.slices {
        let sweep = to_f32(slice.total) / total * TAU;
        let end = start + sweep;

        if breakdown.slices.len() > 1 {
            let large_arc = if sweep > std::f32::consts::PI { 1.0 } else { 0.0 };
            let data = Data::new()
                .move_to((cx, cy))
                .line_to((cx + radius * start.cos(), cy + radius * start.sin()))
                .elliptical_arc_to(vec![
                    radius,
                    radius,
                    0.0,
                    large_arc,
                    1.0,
                    cx + radius * end.cos(),
                    cy + radius * end.sin(),
                ])
                .close();
            doc = doc.add(
                Path::new()
                    .set("d", data)
                    .set("fill", sub_category_color(slice.sub_category))
                    .set("stroke", "white")
                    .set("stroke-width", 1),
            );
        }

        if breakdown.is_labelled(slice, style.label_threshold_pct) {
            let mid = start + sweep / 2.0;
            let lx = cx + (radius + 18.0) * mid.cos();
            let ly = cy + (radius + 18.0) * mid.sin();
            let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
            doc = doc
                .add(label(slice.sub_category.as_str(), lx, ly, 12).set("text-anchor", anchor))
                .add(
                    label(format!("{:.2}%", slice.share_pct), lx, ly + 14.0, 11)
                        .set("text-anchor", anchor),
                );
        }

        start = end;
    }

    doc.add(
        label(
            format!("Total {}", format_money(breakdown.grand_total)),
            cx,
            style.height as f32 - 16.0,
            12,
        )
        .set("text-anchor", "middle"),
    )
}
