// src/gui/app.rs
use std::{
    error::Error,
    sync::{mpsc::Receiver, Arc, Mutex},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::{consts::DEFAULT_TARGET, state::AppState},
    games::GameTable,
    regress::Diagnostics,
    store::{self, DataSet},
};

use super::{actions, components, pages::Page, router};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "BoardGameGeek Scraper",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

/// Result of the last regression run, as shown on the Regression tab.
pub struct RegressionView {
    pub summary: String,
    pub diagnostics: Diagnostics,
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // output text field UX (mapped into ExportOptions on export)
    pub out_path_text: String,

    // cached/scraped games as shown in the table
    pub data: DataSet,

    // status/progress (the scrape worker writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub scrape_rx: Option<Receiver<Result<GameTable, String>>>,

    // regression tab text fields
    pub features_text: String,
    pub dummies_text: String,
    pub model_text: String,
    pub regression: Option<RegressionView>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let mut status = s!("Idle");

        let data = match store::load_dataset() {
            Ok(Some(ds)) if !ds.is_empty() => {
                logf!("Cache: Loaded games (rows={}, headers={})", ds.row_count(), ds.header_count());
                status = s!("Loaded local data");
                ds
            }
            Ok(_) => {
                logd!("Cache: No games cached yet");
                GameTable::default().to_dataset()
            }
            Err(e) => {
                loge!("Cache: Unreadable ({})", e);
                GameTable::default().to_dataset()
            }
        };

        let out_path_text = state.options.export.out_path().to_string_lossy().into();
        let model_text = state.options.regress.model.to_string();
        logf!("Init: rows={}, target={}", data.row_count(), DEFAULT_TARGET);

        Self {
            state,
            out_path_text,
            data,
            status: Arc::new(Mutex::new(status)),
            running: false,
            scrape_rx: None,
            features_text: s!(),
            dummies_text: s!(),
            model_text,
            regression: None,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_index(&self) -> usize {
        self.state.gui.current_page_index
    }

    #[inline]
    pub fn set_current_index(&mut self, idx: usize) {
        self.state.gui.current_page_index = idx;
    }

    #[inline]
    pub fn current_page(&self) -> &'static dyn Page {
        router::page_at(self.current_index())
    }

    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        actions::scrape::poll(self);
        if self.running {
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::tabs::draw(ui, self);
            ui.separator();
            let page = self.current_page();
            page.draw(ui, self);
        });
    }
}
