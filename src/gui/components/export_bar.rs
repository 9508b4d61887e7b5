// src/gui/components/export_bar.rs
use std::path::Path;

use eframe::egui;

use crate::config::options::ExportFormat;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;
        let before = export.format;
        ui.radio_value(&mut export.format, ExportFormat::Csv, "CSV");
        ui.radio_value(&mut export.format, ExportFormat::Tsv, "TSV");
        if export.format != before {
            // keep the text field's extension in step with the format
            let p = Path::new(&app.out_path_text).with_extension(export.format.ext());
            app.out_path_text = p.to_string_lossy().into_owned();
            logd!("UI: Export format {:?} → {:?}", before, export.format);
        }
        ui.checkbox(&mut export.include_headers, "Headers");

        ui.add(egui::TextEdit::singleline(&mut app.out_path_text).desired_width(260.0));

        if ui.button("Export").clicked() {
            actions::export::export(app);
        }
        if ui.button("Copy").clicked() {
            actions::copy::copy(app, ui.ctx());
        }
    });
}
