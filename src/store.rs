// src/store.rs
//
// Local cache of the last scrape. One CSV file under `.store/`, loaded at
// startup so the GUI has something to show before the first scrape.

use std::{
    error::Error,
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::{GAMES_CACHE_FILE, STORE_DIR};
use crate::csv::{detect_headers, parse_rows, write_row};

/// Textual table: what the cache, export and GUI table all speak.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header_count(&self) -> usize {
        self.headers.as_ref().map_or(0, Vec::len)
    }

    /// Widest of header and rows, so ragged input still renders.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).chain([self.header_count()]).max().unwrap_or(0)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h.trim() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn cache_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(GAMES_CACHE_FILE)
}

pub fn save_dataset(ds: &DataSet) -> io::Result<PathBuf> {
    let path = cache_path();
    save_dataset_to(&path, ds)?;
    Ok(path)
}

pub fn save_dataset_to(path: &Path, ds: &DataSet) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = BufWriter::new(fs::File::create(path)?);
    if let Some(h) = &ds.headers {
        write_row(&mut out, h, ',')?;
    }
    for r in &ds.rows {
        write_row(&mut out, r, ',')?;
    }
    out.flush()?;
    logd!("Saved {} rows to {}", ds.row_count(), path.display());
    Ok(())
}

/// `Ok(None)` when nothing has been cached yet.
pub fn load_dataset() -> Result<Option<DataSet>, Box<dyn Error>> {
    let path = cache_path();
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(load_dataset_from(&path, ',')?))
}

pub fn load_dataset_from(path: &Path, sep: char) -> Result<DataSet, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let (headers, rows) = detect_headers(parse_rows(&text, sep));
    logd!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(DataSet { headers, rows })
}

/// Delimiter by extension: `.tsv`/`.tab` are tab separated, anything else CSV.
pub fn sep_for(path: &Path) -> char {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => '\t',
        _ => ',',
    }
}
