// src/gui/pages/regression.rs
use eframe::egui;

use super::Page;
use crate::gui::{actions, app::App, components};

pub struct RegressionPage;
pub static PAGE: RegressionPage = RegressionPage;

impl Page for RegressionPage {
    fn title(&self) -> &'static str {
        "Regression"
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let headers: Vec<String> = app.data.headers.clone().unwrap_or_default();

        egui::Grid::new("regress_controls").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            let opts = &mut app.state.options.regress;

            ui.label("Target");
            egui::ComboBox::from_id_salt("regress_target")
                .selected_text(opts.target.clone())
                .show_ui(ui, |ui| {
                    for h in &headers {
                        ui.selectable_value(&mut opts.target, h.clone(), h.as_str());
                    }
                });
            ui.end_row();

            ui.label("Features");
            ui.add(egui::TextEdit::singleline(&mut app.features_text).hint_text("all numeric columns"));
            ui.end_row();

            ui.label("Dummies");
            ui.add(egui::TextEdit::singleline(&mut app.dummies_text).hint_text("none"));
            ui.end_row();

            ui.label("Model");
            ui.add(egui::TextEdit::singleline(&mut app.model_text).hint_text("ols | ridge:1 | lasso:0.1 | mean"));
            ui.end_row();

            let opts = &mut app.state.options.regress;
            ui.label("Polynomial degree");
            ui.add(egui::DragValue::new(&mut opts.poly).range(0..=4));
            ui.end_row();

            ui.label("Folds");
            ui.add(egui::DragValue::new(&mut opts.splits).range(2..=50));
            ui.end_row();

            ui.label("Options");
            ui.horizontal(|ui| {
                ui.checkbox(&mut opts.scale, "Standard scaling");
                ui.checkbox(&mut opts.plot_oof, "Plot out-of-fold");
                ui.checkbox(&mut app.state.gui.show_plots, "Show plots");
            });
            ui.end_row();
        });

        ui.horizontal(|ui| {
            if ui.add_enabled(!app.running, egui::Button::new("Run")).clicked() {
                logf!("UI: Regression run clicked");
                actions::regress::run(app);
            }
            if ui.add_enabled(app.regression.is_some(), egui::Button::new("Save plot")).clicked() {
                actions::regress::save_plot(app);
            }
        });
        ui.separator();

        let Some(view) = &app.regression else {
            ui.label("No results yet.");
            return;
        };

        if app.state.gui.show_plots {
            components::plots::draw(ui, &view.diagnostics);
            ui.separator();
        }
        egui::ScrollArea::vertical().id_salt("regress_summary").show(ui, |ui| {
            ui.monospace(&view.summary);
        });
    }
}
