// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod file;
pub mod games;
pub mod gui;
pub mod progress;
pub mod regress;
pub mod scrape;
pub mod store;
