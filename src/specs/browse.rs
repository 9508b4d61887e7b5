// src/specs/browse.rs

use std::error::Error;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error as ThisError;

use crate::config::consts::{CELLS_PER_ROW, LINKS_PER_ROW};
use crate::core::{net::Fetch, sanitize::first_token, Elements};

static GAME_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/boardgame/.").expect("static pattern"));

const RATING_CLASS: &str = "collection_bggrating";

/// One ranked game as listed on the browse page.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowseEntry {
    pub name: String,
    /// Site-relative game path, e.g. `/boardgame/224517/brass-birmingham`.
    pub href: String,
    pub bgg_rating: f64,
    pub avg_rating: f64,
    pub voters: f64,
}

#[derive(Debug, ThisError)]
pub enum ListingError {
    #[error("listing has {found} game links, expected at least {wanted}")]
    TooFewGames { found: usize, wanted: usize },
    #[error("listing has {found} rating cells, expected at least {wanted}")]
    TooFewRatings { found: usize, wanted: usize },
    #[error("rating cell {index} is not numeric: {text:?}")]
    NotNumeric { index: usize, text: String },
}

pub fn fetch(
    fetcher: &dyn Fetch,
    url: &str,
    limit: usize,
) -> Result<Vec<BrowseEntry>, Box<dyn Error>> {
    let doc = fetcher.get(url)?;
    Ok(parse_listing(&doc, limit)?)
}

/// First `limit` games of a browse page.
///
/// Every game row carries three `/boardgame/...` links (thumbnail, title,
/// one more); the title link is the second of each triple. Ratings come as
/// three consecutive `collection_bggrating` cells per row.
pub fn parse_listing(doc: &str, limit: usize) -> Result<Vec<BrowseEntry>, ListingError> {
    let titles: Vec<(String, String)> = game_links(doc)
        .into_iter()
        .skip(1)
        .step_by(LINKS_PER_ROW)
        .collect();
    if titles.len() < limit {
        return Err(ListingError::TooFewGames { found: titles.len(), wanted: limit });
    }

    let cells = rating_cells(doc);
    let wanted_cells = limit * CELLS_PER_ROW;
    if cells.len() < wanted_cells {
        return Err(ListingError::TooFewRatings { found: cells.len(), wanted: wanted_cells });
    }

    titles
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, (href, name))| {
            let at = idx * CELLS_PER_ROW;
            Ok(BrowseEntry {
                name,
                href,
                bgg_rating: cell_number(&cells, at)?,
                avg_rating: cell_number(&cells, at + 1)?,
                voters: cell_number(&cells, at + 2)?,
            })
        })
        .collect()
}

/// `(href, text)` of every anchor pointing at a game page, in document order.
fn game_links(doc: &str) -> Vec<(String, String)> {
    Elements::new(doc, "a")
        .filter_map(|a| {
            let href = a.attr("href")?;
            GAME_HREF.is_match(&href).then(|| (href, a.text()))
        })
        .collect()
}

fn rating_cells(doc: &str) -> Vec<String> {
    Elements::new(doc, "td")
        .filter(|td| td.has_class(RATING_CLASS))
        .map(|td| td.text())
        .collect()
}

fn cell_number(cells: &[String], index: usize) -> Result<f64, ListingError> {
    let text = &cells[index];
    first_token(text)
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| ListingError::NotNumeric { index, text: text.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: usize, name: &str, cells: [&str; 3]) -> String {
        let href = format!("/boardgame/{}/{}", 1000 + rank, name.to_lowercase().replace(' ', "-"));
        format!(
            r#"<tr id="row_">
              <td class="collection_rank"><a name="{rank}"></a>{rank}</td>
              <td class="collection_thumbnail"><a href="{href}"><img src="t.jpg"></a></td>
              <td class="collection_objectname">
                <div><a href="{href}" class="primary">{name}</a> <span class="smallerfont">(2018)</span></div>
              </td>
              <td class="collection_bggrating" align="center">  {} </td>
              <td class="collection_bggrating" align="center">  {} </td>
              <td class="collection_bggrating" align="center">  {} </td>
              <td class="collection_shop"><a href="{href}/marketplace">Shop</a></td>
            </tr>"#,
            cells[0], cells[1], cells[2]
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><a href="/boardgame/">All games</a><table id="collectionitems">{}</table>
            <a href="/browse/boardgame/page/2">Next</a></body></html>"#,
            rows.concat()
        )
    }

    #[test]
    fn parses_names_links_and_ratings() {
        let doc = page(&[
            row(1, "Brass Birmingham", ["8.41", "8.59", "48,311"]),
            row(2, "Pandemic Legacy", ["8.37", "8.53", "52003"]),
        ]);

        let games = parse_listing(&doc, 2).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "Brass Birmingham");
        assert_eq!(games[0].href, "/boardgame/1001/brass-birmingham");
        assert_eq!(games[0].bgg_rating, 8.41);
        assert_eq!(games[0].voters, 48311.0);
        assert_eq!(games[1].name, "Pandemic Legacy");
        assert_eq!(games[1].avg_rating, 8.53);
    }

    #[test]
    fn bare_boardgame_path_does_not_match() {
        assert!(!GAME_HREF.is_match("/boardgame/"));
        assert!(GAME_HREF.is_match("/boardgame/13/catan"));
        assert!(!GAME_HREF.is_match("/boardgamefamily/1/x"));
    }

    #[test]
    fn too_few_games_is_an_error() {
        let doc = page(&[row(1, "Solo", ["8.0", "8.1", "10"])]);
        match parse_listing(&doc, 2) {
            Err(ListingError::TooFewGames { found: 1, wanted: 2 }) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_rating_is_an_error() {
        let doc = page(&[row(1, "Fresh Release", ["N/A", "7.9", "120"])]);
        match parse_listing(&doc, 1) {
            Err(ListingError::NotNumeric { index: 0, text }) => assert_eq!(text, "N/A"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
