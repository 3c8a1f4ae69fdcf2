use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, pos2, vec2};

use crate::chart::{DirectedGraph, NodeShape};
use crate::dashboard::CompanyShare;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Largest angle of one triangle in a pie wedge.
const WEDGE_STEP: f32 = 0.05;

/// Start/end angle of every slice, clockwise from twelve o'clock.
pub fn slice_angles(values: &[usize]) -> Vec<(f32, f32)> {
    let total: usize = values.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    values
        .iter()
        .map(|&v| {
            let end = start + TAU * v as f32 / total as f32;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * vec2(angle.sin(), -angle.cos())
}

/// Draw company shares as a pie; hovering names the slice.
pub fn pie(ui: &mut Ui, shares: &[CompanyShare], size: f32) {
    let (response, painter) = ui.allocate_painter(vec2(size, size), Sense::hover());
    let center = response.rect.center();
    let radius = size / 2.0 - 2.0;

    let counts: Vec<usize> = shares.iter().map(|s| s.stations).collect();
    let angles = slice_angles(&counts);

    for (share, &(start, end)) in shares.iter().zip(&angles) {
        let steps = ((end - start) / WEDGE_STEP).ceil().max(1.0) as usize;
        for i in 0..steps {
            let a0 = start + (end - start) * i as f32 / steps as f32;
            let a1 = start + (end - start) * (i + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, on_circle(center, radius, a0), on_circle(center, radius, a1)],
                share.color,
                Stroke::NONE,
            ));
        }
    }

    if let Some(pos) = response.hover_pos() {
        let offset = pos - center;
        if offset.length() <= radius {
            let angle = offset.x.atan2(-offset.y).rem_euclid(TAU);
            let hovered = angles.iter().position(|&(s, e)| s <= angle && angle < e);
            if let Some(share) = hovered.and_then(|i| shares.get(i)) {
                response.on_hover_text_at_pointer(format!(
                    "Company: {}\n# of Stations: {} ({:.1}%)",
                    share.company, share.stations, share.percent
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Directed graph, left to right by rank
// ---------------------------------------------------------------------------

const COLUMN_GAP: f32 = 120.0;
const ROW_HEIGHT: f32 = 44.0;
const NODE_PADDING: f32 = 10.0;

pub fn directed_graph(ui: &mut Ui, graph: &DirectedGraph) {
    let ranks = graph.ranks();
    let depth = ranks.iter().copied().max().map_or(0, |r| r + 1);
    let font = FontId::proportional(13.0);
    let text_color = ui.visuals().text_color();

    // Row of each node within its rank column.
    let mut rows = vec![0usize; graph.nodes.len()];
    let mut per_rank = vec![0usize; depth];
    for (i, &rank) in ranks.iter().enumerate() {
        rows[i] = per_rank[rank];
        per_rank[rank] += 1;
    }
    let tallest = per_rank.iter().copied().max().unwrap_or(0);

    let galleys: Vec<_> = graph
        .nodes
        .iter()
        .map(|n| ui.painter().layout_no_wrap(n.label.clone(), font.clone(), text_color))
        .collect();
    let column_width = galleys
        .iter()
        .map(|g| g.size().x + 2.0 * NODE_PADDING)
        .fold(0.0, f32::max);

    let size = vec2(
        depth as f32 * (column_width + COLUMN_GAP),
        tallest as f32 * ROW_HEIGHT + NODE_PADDING,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;

    let rects: Vec<Rect> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let column_height = per_rank[ranks[i]] as f32 * ROW_HEIGHT;
            let top = (size.y - column_height) / 2.0 + rows[i] as f32 * ROW_HEIGHT;
            let x = ranks[i] as f32 * (column_width + COLUMN_GAP);
            let node_size = vec2(galleys[i].size().x + 2.0 * NODE_PADDING, ROW_HEIGHT - 12.0);
            Rect::from_min_size(pos2(origin.x + x, origin.y + top + 6.0), node_size)
        })
        .collect();

    let edge_stroke = Stroke::new(1.2, text_color);
    for &(from, to) in &graph.edges {
        let start = rects[from].right_center();
        let end = rects[to].left_center();
        painter.arrow(start, end - start, edge_stroke);
    }

    for (i, node) in graph.nodes.iter().enumerate() {
        let rect = rects[i];
        match node.shape {
            NodeShape::Box => {
                painter.rect_filled(rect, 2.0, node.fill.unwrap_or(Color32::TRANSPARENT));
            }
            NodeShape::Ellipse => {
                let radius = rect.size() / 2.0;
                let outline: Vec<Pos2> = (0..48)
                    .map(|k| {
                        let a = TAU * k as f32 / 48.0;
                        rect.center() + vec2(radius.x * a.cos(), radius.y * a.sin())
                    })
                    .collect();
                if let Some(fill) = node.fill {
                    painter.add(Shape::convex_polygon(outline.clone(), fill, Stroke::NONE));
                }
                painter.add(Shape::closed_line(outline, Stroke::new(1.0, text_color)));
            }
        }
        let text = if node.fill.is_some() { Color32::BLACK } else { text_color };
        painter.text(rect.center(), Align2::CENTER_CENTER, &node.label, font.clone(), text);
    }
}

/// Show an image from disk, scaled to the available width.
pub fn banner(ui: &mut Ui, path: &std::path::Path) {
    ui.add(
        egui::Image::new(format!("file://{}", path.display()))
            .max_width(ui.available_width())
            .max_height(220.0),
    );
}
