// src/specs/stats.rs
//! A game's `/stats` page embeds the site's item record as JSON
//! (`GEEK.geekitemPreload = {...};`). We read it with serde instead of
//! slicing at string offsets.
//!
//! Schema (unknown fields ignored; numbers may arrive as JSON numbers or
//! numeric strings):
//!
//! ```text
//! { ..., "item": {
//!     "minplayers": "2", "maxplayers": "4",
//!     "minplaytime": "60", "maxplaytime": "120",
//!     "minage": "14",
//!     "stats": { "avgweight": "3.86", "numowned": "62000", "numplays": 41000, ... },
//!     ... } }
//! ```
//!
//! The item is the first object carrying `minplayers`. Its `stats` member is
//! preferred; otherwise the first `"stats"` object anywhere in the payload.

use std::error::Error;

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use thiserror::Error as ThisError;

use crate::core::net::Fetch;

const PRELOAD_MARKERS: &[&str] = &["GEEK.geekitemPreload", "geekitemPreload"];

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub min_players: u32,
    pub max_players: u32,
    pub min_time: u32,
    pub max_time: u32,
    pub min_age: u32,
    pub difficulty: f64,
    pub owners: f64,
    pub total_plays: f64,
}

#[derive(Debug, ThisError)]
pub enum StatsError {
    #[error("statistics payload not found in page")]
    PayloadMissing,
    #[error("statistics payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("field `{0}` absent from statistics payload")]
    FieldAbsent(&'static str),
    #[error("field `{field}` is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
}

/* ---------- schema ---------- */

#[derive(Debug, Deserialize)]
struct ItemPayload {
    minplayers: Option<Lenient>,
    maxplayers: Option<Lenient>,
    minplaytime: Option<Lenient>,
    maxplaytime: Option<Lenient>,
    minage: Option<Lenient>,
    stats: Option<StatsPayload>,
}

#[derive(Debug, Deserialize)]
struct StatsPayload {
    avgweight: Option<Lenient>,
    numowned: Option<Lenient>,
    numplays: Option<Lenient>,
}

/// The site is inconsistent about quoting numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Num(Number),
    Text(String),
    Other(Value),
}

impl Lenient {
    fn as_f64(&self, field: &'static str) -> Result<f64, StatsError> {
        let parsed = match self {
            Lenient::Num(n) => n.as_f64(),
            Lenient::Text(s) => s.trim().parse::<f64>().ok(),
            Lenient::Other(_) => None,
        };
        parsed.ok_or_else(|| self.not_numeric(field))
    }

    fn as_u32(&self, field: &'static str) -> Result<u32, StatsError> {
        let parsed = match self {
            Lenient::Num(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Lenient::Text(s) => s.trim().parse::<u32>().ok(),
            Lenient::Other(_) => None,
        };
        parsed.ok_or_else(|| self.not_numeric(field))
    }

    fn not_numeric(&self, field: &'static str) -> StatsError {
        let value = match self {
            Lenient::Num(n) => n.to_string(),
            Lenient::Text(s) => s.clone(),
            Lenient::Other(v) => v.to_string(),
        };
        StatsError::NotNumeric { field, value }
    }
}

fn required<'a>(v: &'a Option<Lenient>, field: &'static str) -> Result<&'a Lenient, StatsError> {
    v.as_ref().ok_or(StatsError::FieldAbsent(field))
}

/* ---------- extraction ---------- */

pub fn fetch(fetcher: &dyn Fetch, url: &str) -> Result<GameStats, Box<dyn Error>> {
    let doc = fetcher.get(url)?;
    Ok(parse_stats_page(&doc)?)
}

pub fn parse_stats_page(doc: &str) -> Result<GameStats, StatsError> {
    let payload = read_payload(doc)?;

    let item_obj = find_object_with_key(&payload, "minplayers")
        .ok_or(StatsError::FieldAbsent("minplayers"))?;
    let item: ItemPayload = serde_json::from_value(Value::Object(item_obj.clone()))?;

    let stats = match item.stats {
        Some(s) => s,
        None => {
            let found = find_value_for_key(&payload, "stats")
                .filter(|v| v.is_object())
                .ok_or(StatsError::FieldAbsent("stats"))?;
            serde_json::from_value(found.clone())?
        }
    };

    Ok(GameStats {
        min_players: required(&item.minplayers, "minplayers")?.as_u32("minplayers")?,
        max_players: required(&item.maxplayers, "maxplayers")?.as_u32("maxplayers")?,
        min_time: required(&item.minplaytime, "minplaytime")?.as_u32("minplaytime")?,
        max_time: required(&item.maxplaytime, "maxplaytime")?.as_u32("maxplaytime")?,
        min_age: required(&item.minage, "minage")?.as_u32("minage")?,
        difficulty: required(&stats.avgweight, "avgweight")?.as_f64("avgweight")?,
        owners: required(&stats.numowned, "numowned")?.as_f64("numowned")?,
        total_plays: required(&stats.numplays, "numplays")?.as_f64("numplays")?,
    })
}

/// The first JSON value after a preload marker. Trailing script is ignored.
fn read_payload(doc: &str) -> Result<Value, StatsError> {
    let start = PRELOAD_MARKERS
        .iter()
        .find_map(|m| doc.find(m).map(|at| at + m.len()))
        .ok_or(StatsError::PayloadMissing)?;
    let brace = doc[start..].find('{').ok_or(StatsError::PayloadMissing)? + start;

    let mut stream = serde_json::Deserializer::from_str(&doc[brace..]).into_iter::<Value>();
    match stream.next() {
        Some(v) => Ok(v?),
        None => Err(StatsError::PayloadMissing),
    }
}

/// Depth-first in document order (`preserve_order`): first object that has
/// `key` as a direct member.
fn find_object_with_key<'a>(v: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    match v {
        Value::Object(map) => {
            if map.contains_key(key) {
                return Some(map);
            }
            map.values().find_map(|child| find_object_with_key(child, key))
        }
        Value::Array(items) => items.iter().find_map(|child| find_object_with_key(child, key)),
        _ => None,
    }
}

fn find_value_for_key<'a>(v: &'a Value, key: &str) -> Option<&'a Value> {
    find_object_with_key(v, key).and_then(|map| map.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(payload: &str) -> String {
        format!(
            "<html><head><script>\n\tGEEK.geekitemPreload = {payload};\n\tGEEK.geekitemSettings = {{}};\n</script></head></html>"
        )
    }

    const GOOD: &str = r#"{"item":{"objectid":"224517","name":"Brass: Birmingham",
        "minplayers":"2","maxplayers":"4","minplaytime":"60","maxplaytime":"120","minage":"14",
        "stats":{"usersrated":"48311","average":"8.59","avgweight":"3.8693","numowned":"62114","numplays":41872}}}"#;

    #[test]
    fn parses_quoted_and_bare_numbers() {
        let s = parse_stats_page(&page(GOOD)).unwrap();
        assert_eq!(s.min_players, 2);
        assert_eq!(s.max_players, 4);
        assert_eq!(s.min_time, 60);
        assert_eq!(s.max_time, 120);
        assert_eq!(s.min_age, 14);
        assert!((s.difficulty - 3.8693).abs() < 1e-12);
        assert_eq!(s.owners, 62114.0);
        assert_eq!(s.total_plays, 41872.0);
    }

    #[test]
    fn stats_outside_item_are_found() {
        let payload = r#"{"item":{"minplayers":1,"maxplayers":5,"minplaytime":30,"maxplaytime":30,"minage":10},
            "extra":{"stats":{"avgweight":2.1,"numowned":"10","numplays":"3"}}}"#;
        let s = parse_stats_page(&page(payload)).unwrap();
        assert_eq!(s.min_players, 1);
        assert_eq!(s.difficulty, 2.1);
        assert_eq!(s.total_plays, 3.0);
    }

    #[test]
    fn earlier_objects_win_over_alphabetically_earlier_keys() {
        let payload = r#"{"item":{"minplayers":"2","maxplayers":"4","minplaytime":"60","maxplaytime":"120","minage":"14"},
            "zz_first":{"stats":{"avgweight":"3.5","numowned":"100","numplays":"7"}},
            "aaa_related":{"minplayers":"9","maxplayers":"9","minplaytime":"9","maxplaytime":"9","minage":"9",
                "stats":{"avgweight":"1.0","numowned":"1","numplays":"1"}}}"#;
        let s = parse_stats_page(&page(payload)).unwrap();
        assert_eq!(s.min_players, 2);
        assert_eq!(s.min_age, 14);
        assert_eq!(s.difficulty, 3.5);
        assert_eq!(s.owners, 100.0);
    }

    #[test]
    fn missing_marker() {
        let err = parse_stats_page("<html>no payload here</html>").unwrap_err();
        assert!(matches!(err, StatsError::PayloadMissing));
    }

    #[test]
    fn malformed_json() {
        let err = parse_stats_page(&page(r#"{"item":{"minplayers":"2",}"#)).unwrap_err();
        assert!(matches!(err, StatsError::Malformed(_)), "{err}");
    }

    #[test]
    fn absent_and_null_fields() {
        let no_age = GOOD.replace(r#""minage":"14","#, "");
        let err = parse_stats_page(&page(&no_age)).unwrap_err();
        assert!(matches!(err, StatsError::FieldAbsent("minage")), "{err}");

        let null_plays = GOOD.replace(r#""numplays":41872"#, r#""numplays":null"#);
        let err = parse_stats_page(&page(&null_plays)).unwrap_err();
        assert!(matches!(err, StatsError::FieldAbsent("numplays")), "{err}");
    }

    #[test]
    fn non_numeric_field() {
        let bad = GOOD.replace(r#""maxplayers":"4""#, r#""maxplayers":"four""#);
        match parse_stats_page(&page(&bad)).unwrap_err() {
            StatsError::NotNumeric { field, value } => {
                assert_eq!(field, "maxplayers");
                assert_eq!(value, "four");
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
