// src/gui/components/plots.rs
//
// Paints the three diagnostic panels with the egui painter. Same data as
// the SVG written by `regress::analysis_plot`.

use std::ops::Range;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::regress::{plot::axis_range, Diagnostics};

const PANEL_H: f32 = 240.0;
const PAD: f32 = 24.0;

pub fn draw(ui: &mut egui::Ui, diag: &Diagnostics) {
    let w = ((ui.available_width() - 16.0) / 3.0).max(120.0);
    ui.horizontal(|ui| {
        panel(ui, w, "Predicted vs Actual", &diag.predicted_vs_actual(), None);
        panel(ui, w, "Residuals", &diag.residual_points(), None);
        panel(ui, w, "QQ Plot of Residuals", &diag.qq, Some(diag.qq_line_points()));
    });
}

fn panel(ui: &mut egui::Ui, width: f32, title: &str, points: &[(f64, f64)], line: Option<[(f64, f64); 2]>) {
    let (resp, painter) = ui.allocate_painter(Vec2::new(width, PANEL_H), Sense::hover());
    let frame = resp.rect;
    let visuals = ui.visuals();
    painter.rect_stroke(frame, 2.0, visuals.widgets.noninteractive.bg_stroke, StrokeKind::Inside);
    painter.text(
        frame.center_top() + Vec2::new(0.0, 4.0),
        Align2::CENTER_TOP,
        title,
        FontId::proportional(13.0),
        visuals.text_color(),
    );

    let plot = Rect::from_min_max(frame.min + Vec2::splat(PAD), frame.max - Vec2::splat(PAD * 0.5));
    let extra = line.iter().flatten().copied();
    let xs = axis_range(points.iter().map(|p| p.0).chain(extra.clone().map(|p| p.0)));
    let ys = axis_range(points.iter().map(|p| p.1).chain(extra.map(|p| p.1)));
    let to_screen = |(x, y): (f64, f64)| to_pos(plot, &xs, &ys, x, y);

    let dot = Color32::from_rgb(60, 110, 200);
    for &p in points {
        painter.circle_filled(to_screen(p), 2.5, dot);
    }
    if let Some([a, b]) = line {
        painter.line_segment([to_screen(a), to_screen(b)], Stroke::new(1.5, Color32::from_rgb(200, 60, 60)));
    }
}

fn to_pos(rect: Rect, xs: &Range<f64>, ys: &Range<f64>, x: f64, y: f64) -> Pos2 {
    let fx = ((x - xs.start) / (xs.end - xs.start)) as f32;
    let fy = ((y - ys.start) / (ys.end - ys.start)) as f32;
    Pos2::new(rect.left() + fx * rect.width(), rect.bottom() - fy * rect.height())
}
