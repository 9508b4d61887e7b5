// tests/export_roundtrip.rs
mod common;

use std::fs;

use bgg_scrape::config::options::{AppOptions, ExportFormat};
use bgg_scrape::file::{export_dataset, export_text};
use bgg_scrape::games::GameTable;
use bgg_scrape::scrape::collect_games;
use bgg_scrape::store::{load_dataset_from, sep_for};

use common::{options, site, tmp_dir};

#[test]
fn scraped_games_survive_csv_and_tsv_export() {
    let table = collect_games(&site(12), &options(12), None).unwrap();
    let ds = table.to_dataset();
    let dir = tmp_dir("roundtrip");

    for format in [ExportFormat::Csv, ExportFormat::Tsv] {
        let mut opts = AppOptions::default();
        opts.export.format = format;
        opts.export.set_path(dir.join("games").to_str().unwrap());

        let path = export_dataset(&opts.export, &ds).unwrap();
        assert_eq!(path.extension().unwrap(), format.ext());

        let back = load_dataset_from(&path, sep_for(&path)).unwrap();
        assert_eq!(back, ds);
        assert_eq!(GameTable::from_dataset(&back).unwrap(), table);
    }
}

#[test]
fn user_extension_wins_over_format() {
    let dir = tmp_dir("ext");
    let mut opts = AppOptions::default();
    opts.export.set_path(dir.join("top.txt").to_str().unwrap());
    opts.export.format = ExportFormat::Tsv;

    let ds = collect_games(&site(2), &options(2), None).unwrap().to_dataset();
    let path = export_dataset(&opts.export, &ds).unwrap();
    assert!(path.to_string_lossy().ends_with("top.txt"));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Name\tBGG_Rating\t"));
}

#[test]
fn headers_can_be_left_out() {
    let mut opts = AppOptions::default();
    opts.export.include_headers = false;
    let ds = collect_games(&site(3), &options(3), None).unwrap().to_dataset();
    let text = export_text(&opts.export, &ds);
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("Game & Co 0,"));
}
