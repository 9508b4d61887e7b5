// src/gui/actions/scrape.rs
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

use eframe::egui;

use crate::{
    core::HttpFetcher,
    gui::{app::App, progress::GuiProgress},
    scrape,
};

/// Run the scrape on a worker thread; `poll` picks up the result.
pub fn start(app: &mut App, ctx: &egui::Context) {
    if app.running {
        return;
    }

    let opts = app.state.options.scrape.clone();
    logf!("Scrape: Begin url={} limit={}", opts.browse_url, opts.limit);

    let status = app.status.clone();
    let repaint = ctx.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        let res = HttpFetcher::new()
            .and_then(|fetcher| scrape::refresh_games(&fetcher, &opts, Some(&mut prog)))
            .map_err(|e| e.to_string());
        let _ = tx.send(res);
        repaint.request_repaint();
    });

    app.scrape_rx = Some(rx);
    app.running = true;
    app.status("Scraping…");
}

pub fn poll(app: &mut App) {
    let Some(rx) = &app.scrape_rx else {
        return;
    };

    match rx.try_recv() {
        Ok(Ok(table)) => {
            logf!("Scrape: OK rows={}", table.len());
            app.data = table.to_dataset();
            app.regression = None;
            app.status(format!("Ready ({} games)", table.len()));
        }
        Ok(Err(e)) => {
            loge!("Scrape: Error: {}", e);
            app.status(format!("Error: {e}"));
        }
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => {
            loge!("Scrape: worker ended without a result");
            app.status("Error: scrape worker stopped");
        }
    }

    app.scrape_rx = None;
    app.running = false;
}
