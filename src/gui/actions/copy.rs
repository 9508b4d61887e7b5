// src/gui/actions/copy.rs
use eframe::egui;

use crate::{file, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    if app.data.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    let txt = file::export_text(&app.state.options.export, &app.data);
    logf!("Copy: rows={}, headers={}", app.data.row_count(), app.data.header_count());
    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
