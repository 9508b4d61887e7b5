// src/gui/actions/mod.rs
//
// Button handlers. Each reports through the status line and the log.

pub mod copy;
pub mod export;
pub mod regress;
pub mod scrape;
