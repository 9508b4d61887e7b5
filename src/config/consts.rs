// src/config/consts.rs

// Net config
pub const BGG_BASE: &str = "https://boardgamegeek.com";
pub const BROWSE_URL: &str = "https://boardgamegeek.com/browse/boardgame";
pub const USER_AGENT: &str = "bgg_scrape/0.3";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Scrape
pub const DEFAULT_LIMIT: usize = 100;
pub const LINKS_PER_ROW: usize = 3;
pub const CELLS_PER_ROW: usize = 3;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const GAMES_CACHE_FILE: &str = "games.csv";
pub const LOG_FILE: &str = ".store/debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "games";
pub const DEFAULT_PLOT_FILE: &str = "diagnostics.svg";

// Regression
pub const CV_SEED: u64 = 71;
pub const DEFAULT_SPLITS: usize = 10;
pub const DEFAULT_TARGET: &str = "AVG_Rating";
