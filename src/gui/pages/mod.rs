// src/gui/pages/mod.rs
use eframe::egui;

use super::app::App;

pub mod games;
pub mod regression;

pub trait Page: Send + Sync + 'static {
    fn title(&self) -> &'static str;

    /// Draw the whole tab body below the tab strip.
    fn draw(&self, ui: &mut egui::Ui, app: &mut App);
}
