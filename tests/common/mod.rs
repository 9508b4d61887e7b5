// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use bgg_scrape::config::options::ScrapeOptions;
use bgg_scrape::core::Fetch;

pub const BASE: &str = "https://bgg.fixture";

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("bgg_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// In-memory site: a browse page plus one stats page per game.
pub struct FixtureSite {
    pages: HashMap<String, String>,
}

impl Fetch for FixtureSite {
    fn get(&self, url: &str) -> Result<String, Box<dyn Error>> {
        self.pages.get(url).cloned().ok_or_else(|| format!("HTTP error: 404 Not Found {url}").into())
    }
}

pub fn options(limit: usize) -> ScrapeOptions {
    ScrapeOptions { browse_url: format!("{BASE}/browse/boardgame"), base_url: BASE.to_string(), limit }
}

/// Listing rows look like the real table: thumbnail link, title link,
/// a shop link, then three rating cells.
pub fn browse_page(n: usize) -> String {
    let mut doc = String::from(
        "<html><body><a href=\"/boardgame/\">All games</a><table id=\"collectionitems\">\n",
    );
    for i in 0..n {
        let id = 1000 + i;
        let voters = 2000 + 37 * i;
        doc.push_str(&format!(
            "<tr id='row_'>\n\
             <td class='collection_rank'><a name=\"{rank}\"></a>{rank}</td>\n\
             <td class='collection_thumbnail'><a href=\"/boardgame/{id}/game-{i}\"><img src=\"t.jpg\"></a></td>\n\
             <td class='collection_objectname'><div><a href=\"/boardgame/{id}/game-{i}\" class='primary'>Game &amp; Co {i}</a></div></td>\n\
             <td class='collection_bggrating'>\n\t\t\t{bgg:.3}\t\t</td>\n\
             <td class='collection_bggrating'>\n\t\t\t{avg:.2}\t\t</td>\n\
             <td class='collection_bggrating'>\n\t\t\t{voters_fmt}\t\t</td>\n\
             <td class='collection_shop'><a href=\"/boardgame/{id}/game-{i}/marketplace\">Shop</a></td>\n\
             </tr>\n",
            rank = i + 1,
            bgg = 8.5 - i as f64 * 0.01,
            avg = 8.7 - i as f64 * 0.012,
            voters_fmt = format_thousands(voters),
        ));
    }
    doc.push_str("</table></body></html>");
    doc
}

fn format_thousands(n: usize) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn stats_page(i: usize) -> String {
    format!(
        "<html><head><script>\n\
         \tGEEK.geekitemPreload = {{\"item\":{{\"objectid\":\"{id}\",\"minplayers\":\"{minp}\",\"maxplayers\":\"{maxp}\",\
         \"minplaytime\":\"{mint}\",\"maxplaytime\":\"{maxt}\",\"minage\":\"{age}\",\
         \"stats\":{{\"avgweight\":\"{weight:.4}\",\"numowned\":\"{owned}\",\"numplays\":{plays}}}}}}};\n\
         \tGEEK.geekitemSettings = {{\"hideads\":false}};\n\
         </script></head><body></body></html>",
        id = 1000 + i,
        minp = 1 + i % 2,
        maxp = 4 + i % 3,
        mint = 30 + 15 * (i % 4),
        maxt = 60 + 30 * (i % 4),
        age = 10 + i % 5,
        weight = 1.5 + (i % 7) as f64 * 0.4,
        owned = 5000 + 131 * i,
        plays = 900 + 17 * i,
    )
}

pub fn site(n: usize) -> FixtureSite {
    let opts = options(n);
    let mut pages = HashMap::new();
    pages.insert(opts.browse_url.clone(), browse_page(n));
    for i in 0..n {
        pages.insert(opts.stats_url(&format!("/boardgame/{}/game-{i}", 1000 + i)), stats_page(i));
    }
    FixtureSite { pages }
}

impl FixtureSite {
    pub fn remove(&mut self, url: &str) {
        self.pages.remove(url);
    }

    pub fn replace(&mut self, url: &str, body: String) {
        self.pages.insert(url.to_string(), body);
    }
}
