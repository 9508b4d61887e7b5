// src/gui/router.rs
use super::pages::{self, Page};

pub static PAGES: &[&'static dyn Page] = &[
    &pages::games::PAGE,
    &pages::regression::PAGE,
];

pub fn all_pages() -> &'static [&'static dyn Page] {
    PAGES
}

/// Falls back to the first page for an out-of-range index.
pub fn page_at(index: usize) -> &'static dyn Page {
    PAGES.get(index).copied().unwrap_or(PAGES[0])
}
