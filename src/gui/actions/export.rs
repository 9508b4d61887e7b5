// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    if app.data.is_empty() {
        app.status("Nothing to export");
        logd!("Export: Clicked, but there's nothing to export");
        return;
    }

    app.state.options.export.set_path(&app.out_path_text);
    match file::export_dataset(&app.state.options.export, &app.data) {
        Ok(path) => {
            app.out_path_text = path.to_string_lossy().into_owned();
            app.status(format!("Exported {} rows → {}", app.data.row_count(), path.display()));
        }
        Err(e) => {
            loge!("Export: {}", e);
            app.status(format!("Export failed: {e}"));
        }
    }
}
