// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::regress::{FeatureTransform, ModelChoice};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub regress: RegressOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Ranked listing page to start from.
    pub browse_url: String,
    /// Prefix for per-game stats pages (`{base}{href}/stats`).
    pub base_url: String,
    /// How many ranked games to collect.
    pub limit: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            browse_url: s!(BROWSE_URL),
            base_url: s!(BGG_BASE),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ScrapeOptions {
    pub fn stats_url(&self, href: &str) -> String {
        join!(self.base_url.trim_end_matches('/'), href, "/stats")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegressOptions {
    pub target: String,
    /// Feature columns; empty means "every numeric column but the target".
    pub features: Vec<String>,
    /// Indicator columns, moved to the end and never expanded or scaled.
    pub dummies: Vec<String>,
    pub model: ModelChoice,
    pub poly: usize,
    pub scale: bool,
    pub splits: usize,
    /// Hold out this fraction for `train_test`; `None` skips it.
    pub test_size: Option<f64>,
    pub seed: u64,
    pub plot_path: PathBuf,
    /// Plot out-of-fold predictions instead of the last fold's model output.
    pub plot_oof: bool,
}

impl Default for RegressOptions {
    fn default() -> Self {
        Self {
            target: s!(DEFAULT_TARGET),
            features: Vec::new(),
            dummies: Vec::new(),
            model: ModelChoice::Ols,
            poly: 0,
            scale: true,
            splits: DEFAULT_SPLITS,
            test_size: None,
            seed: CV_SEED,
            plot_path: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_PLOT_FILE),
            plot_oof: false,
        }
    }
}

impl RegressOptions {
    pub fn transform(&self, dummy_idx: Option<usize>) -> FeatureTransform {
        FeatureTransform { poly: self.poly, scale: self.scale, dummy_idx }
    }
}

/// `"a, b,,c"` → `["a", "b", "c"]`
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(String::from).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; a user-typed extension wins over the format's.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = self
            .out_path
            .ext
            .as_ref()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| s!(self.format.ext()));
        path.push(join!(&*stem, ".", &ext));
        path
    }

    /// Parse GUI/CLI text into dir + stem (+ explicit extension, if typed).
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
