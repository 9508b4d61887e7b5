// tests/scrape_listing.rs
mod common;

use bgg_scrape::games::{ColumnValues, COLUMNS};
use bgg_scrape::progress::Progress;
use bgg_scrape::scrape::collect_games;
use bgg_scrape::specs::{browse, stats::StatsError};

use common::{options, site};

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, _index: usize, label: &str) {
        self.done.push(label.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn hundred_games_fill_every_column() {
    let site = site(100);
    let mut rec = Recorder::default();
    let table = collect_games(&site, &options(100), Some(&mut rec)).unwrap();

    let cols = table.columns();
    assert_eq!(cols.len(), COLUMNS.len());
    for c in &cols {
        assert_eq!(c.values.len(), 100, "column {}", c.name);
    }
    assert_eq!(rec.total, 100);
    assert_eq!(rec.done.len(), 100);
    assert!(rec.finished);

    let first = &table.records[0];
    assert_eq!(first.name, "Game & Co 0");
    assert_eq!(first.bgg_rating, 8.5);
    assert_eq!(first.voter_count, 2000.0);
    assert_eq!(first.min_age, 10);

    match &cols[0].values {
        ColumnValues::Text(names) => assert_eq!(names[99], "Game & Co 99"),
        other => panic!("Name column should be text: {other:?}"),
    }
}

#[test]
fn default_limit_is_applied_to_longer_listings() {
    let site = site(120);
    let table = collect_games(&site, &options(100), None).unwrap();
    assert_eq!(table.len(), 100);
    assert_eq!(table.records[99].name, "Game & Co 99");
}

#[test]
fn short_listing_is_an_error() {
    let site = site(40);
    let err = collect_games(&site, &options(100), None).unwrap_err();
    let listing = err.downcast_ref::<browse::ListingError>().expect("listing error");
    assert!(matches!(listing, browse::ListingError::TooFewGames { found: 40, wanted: 100 }));
}

#[test]
fn broken_stats_page_aborts_with_its_name() {
    let mut site = site(5);
    let url = options(5).stats_url("/boardgame/1003/game-3");
    site.replace(&url, "<html>maintenance</html>".to_string());
    let err = collect_games(&site, &options(5), None).unwrap_err();
    assert!(err.to_string().contains("Game & Co 3"), "{err}");
    assert!(err.to_string().contains(&StatsError::PayloadMissing.to_string()));
}

#[test]
fn unreachable_listing_is_an_error() {
    let mut site = site(3);
    site.remove(&options(3).browse_url);
    assert!(collect_games(&site, &options(3), None).is_err());
}
