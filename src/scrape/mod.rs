// src/scrape/mod.rs
mod collect;
pub use collect::collect_games;
pub use collect::refresh_games;
