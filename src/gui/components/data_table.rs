// src/gui/components/data_table.rs
//
// Draws the games table. Purely a view over a DataSet.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::store::DataSet;

const NAME_WIDTH: f32 = 220.0;
const CELL_WIDTH: f32 = 90.0;

pub fn draw(ui: &mut egui::Ui, ds: &DataSet) {
    let cols = ds.col_count();
    if cols == 0 {
        ui.label("No data. Scrape to fill the table.");
        return;
    }

    let avail_h = ui.available_height();
    egui::ScrollArea::horizontal()
        .id_salt("games_table_hscroll")
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .id_salt("games_table")
                .striped(true)
                .min_scrolled_height(0.0)
                .max_scroll_height(avail_h);
            for ci in 0..cols {
                let w = if ci == 0 { NAME_WIDTH } else { CELL_WIDTH };
                table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
            }

            table
                .header(24.0, |mut header| {
                    for ci in 0..cols {
                        header.col(|ui| {
                            ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                            let text = ds
                                .headers
                                .as_ref()
                                .and_then(|h| h.get(ci).cloned())
                                .unwrap_or_else(|| format!("Col {}", ci + 1));
                            ui.label(RichText::new(text).strong());
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, ds.rows.len(), |mut row| {
                        let cells = &ds.rows[row.index()];
                        for ci in 0..cols {
                            let text = cells.get(ci).map(String::as_str).unwrap_or("");
                            row.col(|ui| {
                                if ci == 0 {
                                    ui.label(text);
                                } else {
                                    // numbers read better right-aligned
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                        ui.label(text);
                                    });
                                }
                            });
                        }
                    });
                });
        });
}
