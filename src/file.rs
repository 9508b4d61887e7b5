// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::store::DataSet;

/// Write one export file based on ExportOptions (path, headers policy, delimiter).
/// Returns the final path written to.
pub fn export_dataset(export: &ExportOptions, ds: &DataSet) -> Result<PathBuf, Box<dyn Error>> {
    let path = export.out_path();
    write_text(&path, &export_text(export, ds))?;
    logf!("Exported {} rows to {}", ds.row_count(), path.display());
    Ok(path)
}

/// Same text `export_dataset` writes; used by Copy.
pub fn export_text(export: &ExportOptions, ds: &DataSet) -> String {
    to_export_string(&ds.headers, &ds.rows, export.include_headers, export.delim())
}

/// Create parent directories, then write.
pub fn write_text(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_rejects_files() {
        let base = std::env::temp_dir().join(format!("bgg_scrape_file_{}", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        let nested = base.join("a").join("b");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());

        let file = base.join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());
        let _ = fs::remove_dir_all(&base);
    }
}
