// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use html::{Element, Elements};
pub use net::{Fetch, HttpFetcher};
