// src/regress/frame.rs
use ndarray::{Array1, Array2};

use super::{FeatureTransform, RegressError};
use crate::store::DataSet;

/// Numeric view of a DataSet ready for the regression helpers.
#[derive(Clone, Debug)]
pub struct Frame {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    /// Column names of `x`, dummies last.
    pub feature_names: Vec<String>,
    pub dummy_idx: Option<usize>,
}

impl Frame {
    /// Pick `target` and feature columns out of `ds`.
    ///
    /// With no explicit features every numeric column except the target is
    /// used. Named `dummies` are moved to the end.
    pub fn from_dataset(
        ds: &DataSet,
        target: &str,
        features: &[String],
        dummies: &[String],
    ) -> Result<Self, RegressError> {
        if ds.rows.is_empty() {
            return Err(RegressError::Empty);
        }
        let headers = ds.headers.as_deref().unwrap_or(&[]);
        let index_of = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| RegressError::UnknownColumn(s!(name)))
        };

        let target_ix = index_of(target)?;
        let dummy_ix = dummies.iter().map(|d| index_of(d.as_str())).collect::<Result<Vec<_>, _>>()?;

        let numeric_ix: Vec<usize> = if features.is_empty() {
            (0..headers.len())
                .filter(|i| *i != target_ix && !dummy_ix.contains(i))
                .filter(|&i| ds.rows.iter().all(|r| parse_cell(r, i).is_some()))
                .collect()
        } else {
            features
                .iter()
                .map(|f| index_of(f.as_str()))
                .filter(|r| !matches!(r, Ok(i) if dummy_ix.contains(i)))
                .collect::<Result<Vec<_>, _>>()?
        };

        let columns: Vec<usize> = numeric_ix.iter().chain(&dummy_ix).copied().collect();
        let dummy_idx = (!dummy_ix.is_empty()).then_some(numeric_ix.len());

        let mut x = Array2::<f64>::zeros((ds.rows.len(), columns.len()));
        let mut y = Array1::<f64>::zeros(ds.rows.len());
        for (r, row) in ds.rows.iter().enumerate() {
            y[r] = cell(headers, row, r, target_ix)?;
            for (c, &ix) in columns.iter().enumerate() {
                x[[r, c]] = cell(headers, row, r, ix)?;
            }
        }

        Ok(Self {
            x,
            y,
            feature_names: columns.iter().map(|&i| headers[i].trim().to_string()).collect(),
            dummy_idx,
        })
    }

    pub fn transform(&self, poly: usize, scale: bool) -> FeatureTransform {
        FeatureTransform { poly, scale, dummy_idx: self.dummy_idx }
    }
}

fn parse_cell(row: &[String], ix: usize) -> Option<f64> {
    row.get(ix)?.trim().replace(',', "").parse().ok()
}

fn cell(headers: &[String], row: &[String], r: usize, ix: usize) -> Result<f64, RegressError> {
    parse_cell(row, ix).ok_or_else(|| RegressError::NonNumeric {
        column: headers[ix].trim().to_string(),
        row: r + 1,
        value: row.get(ix).cloned().unwrap_or_default(),
    })
}
