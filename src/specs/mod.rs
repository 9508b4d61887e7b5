// src/specs/mod.rs
//! # Page specs
//!
//! One module per remote page. Each spec knows *where the data lives in the
//! page* and how to pull it out; nothing here caches, exports or draws.
//!
//! - `browse` – the ranked listing: game links (name + href) and the three
//!   `collection_bggrating` cells per game (BGG rating, average, voters).
//! - `stats` – a game's `/stats` page: the embedded `geekitemPreload` JSON,
//!   read against a small schema (player counts, play time, age, weight,
//!   owners, plays).
//!
//! ## Call chain
//! ```text
//! GUI / CLI → scrape::collect_games → specs::browse::fetch (1 request)
//!                                   → specs::stats::fetch  (1 per game)
//! ```
//!
//! ## Conventions
//! - Case-insensitive tag scanning through `core::html`; no full-document regexes.
//! - Parse errors are typed (`ListingError`, `StatsError`) so a broken page
//!   says *what* broke; callers decide how loud to be.
//! - Specs are testable offline: every `fetch` has a pure `parse_*` twin.
pub mod browse;
pub mod stats;
