// src/gui/pages/games.rs
use eframe::egui;

use super::Page;
use crate::gui::{actions, app::App, components};

pub struct GamesPage;
pub static PAGE: GamesPage = GamesPage;

impl Page for GamesPage {
    fn title(&self) -> &'static str {
        "Games"
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        ui.horizontal(|ui| {
            ui.label("Games:");
            ui.add(egui::DragValue::new(&mut app.state.options.scrape.limit).range(1..=1000));

            let label = if app.running { "Scraping…" } else { "Scrape" };
            if ui.add_enabled(!app.running, egui::Button::new(label)).clicked() {
                logf!("UI: Scrape clicked");
                actions::scrape::start(app, ui.ctx());
            }
            ui.label(format!("{} rows", app.data.row_count()));
        });

        ui.separator();
        components::export_bar::draw(ui, app);
        ui.separator();
        components::data_table::draw(ui, &app.data);
    }
}
