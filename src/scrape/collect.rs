// src/scrape/collect.rs
use std::error::Error;

use crate::{
    config::options::ScrapeOptions,
    core::net::Fetch,
    games::{GameRecord, GameTable},
    progress::Progress,
    specs::{browse, stats},
    store,
};

/// Scrape the ranked listing plus one stats page per game, in rank order.
/// 1 + `limit` requests; the first failure aborts the whole run.
pub fn collect_games(
    fetcher: &dyn Fetch,
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<GameTable, Box<dyn Error>> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching ranked listing…");
    }
    logf!("Scrape: listing {} (limit {})", scrape.browse_url, scrape.limit);

    let entries = browse::fetch(fetcher, &scrape.browse_url, scrape.limit)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(entries.len());
    }

    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let url = scrape.stats_url(&entry.href);
        let game_stats = match stats::fetch(fetcher, &url) {
            Ok(s) => s,
            Err(e) => {
                loge!("Scrape: {} ({}): {}", entry.name, url, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.finish();
                }
                return Err(format!("{}: {}", entry.name, e).into());
            }
        };
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i, &entry.name);
        }
        records.push(GameRecord::new(entry, game_stats));
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("Scrape: collected {} games", records.len());

    Ok(GameTable { records })
}

/// Scrape, then replace the local cache. Returns the new table.
pub fn refresh_games(
    fetcher: &dyn Fetch,
    scrape: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<GameTable, Box<dyn Error>> {
    let table = collect_games(fetcher, scrape, progress)?;
    let path = store::save_dataset(&table.to_dataset())?;
    logd!("Cache updated: {}", path.display());
    Ok(table)
}
