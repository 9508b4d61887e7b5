// src/regress/transform.rs
//
// Feature preparation: polynomial expansion and standard scaling of the
// numeric block, with dummy columns (from `dummy_idx` on) carried through
// untouched. Every matrix is fitted on its own; nothing is shared between
// a training and a test matrix.

use ndarray::{concatenate, Array1, Array2, Axis, Slice};

use super::RegressError;

/// Degree-`d` polynomial features including the bias column, ordered by
/// degree and then lexicographically by column index:
/// `[1, a, b, a², ab, b², ...]`.
#[derive(Clone, Debug)]
pub struct PolynomialFeatures {
    degree: usize,
}

impl PolynomialFeatures {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Column index multisets, one per output column.
    pub fn powers(&self, n_features: usize) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new()];
        let mut prev: Vec<Vec<usize>> = vec![Vec::new()];
        for _ in 0..self.degree {
            let mut next = Vec::new();
            for combo in &prev {
                let from = combo.last().copied().unwrap_or(0);
                for j in from..n_features {
                    let mut c = combo.clone();
                    c.push(j);
                    next.push(c);
                }
            }
            out.extend(next.iter().cloned());
            prev = next;
        }
        out
    }

    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let powers = self.powers(x.ncols());
        let mut out = Array2::<f64>::ones((x.nrows(), powers.len()));
        for (k, combo) in powers.iter().enumerate() {
            let mut col = out.column_mut(k);
            for &j in combo {
                col *= &x.column(j);
            }
        }
        out
    }
}

/// Zero mean, unit population variance per column. A constant column is
/// centred but not divided.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    pub mean: Array1<f64>,
    pub scale: Array1<f64>,
}

impl StandardScaler {
    pub fn fit(x: &Array2<f64>) -> Result<Self, RegressError> {
        let mean = x.mean_axis(Axis(0)).ok_or(RegressError::Empty)?;
        let scale = x.std_axis(Axis(0), 0.0).mapv(|s| if s == 0.0 { 1.0 } else { s });
        Ok(Self { mean, scale })
    }

    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        (x - &self.mean) / &self.scale
    }

    pub fn fit_transform(x: &Array2<f64>) -> Result<Array2<f64>, RegressError> {
        Ok(Self::fit(x)?.transform(x))
    }
}

/// What to do to a feature matrix before fitting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureTransform {
    /// Polynomial degree; 0 leaves the numeric block as is.
    pub poly: usize,
    pub scale: bool,
    /// First dummy column; `None` means no dummies. `Some(0)` makes every
    /// column a dummy, so nothing is expanded or scaled.
    pub dummy_idx: Option<usize>,
}

impl FeatureTransform {
    pub fn is_identity(&self) -> bool {
        self.poly == 0 && !self.scale
    }

    pub fn apply(&self, x: &Array2<f64>) -> Result<Array2<f64>, RegressError> {
        let ncols = x.ncols();
        let split = self.dummy_idx.unwrap_or(ncols);
        if split > ncols {
            return Err(RegressError::BadDummyIndex { idx: split, ncols });
        }
        if self.is_identity() {
            return Ok(x.to_owned());
        }

        let numeric = x.slice_axis(Axis(1), Slice::from(0..split));
        let dummies = x.slice_axis(Axis(1), Slice::from(split..));
        if numeric.ncols() == 0 {
            return Ok(x.to_owned());
        }

        let mut block = numeric.to_owned();
        if self.poly > 0 {
            block = PolynomialFeatures::new(self.poly).transform(&block);
        }
        if self.scale {
            block = StandardScaler::fit_transform(&block)?;
        }
        Ok(concatenate(Axis(1), &[block.view(), dummies])?)
    }

    /// Column count after `apply` on a matrix with `ncols` columns.
    pub fn output_width(&self, ncols: usize) -> usize {
        let split = self.dummy_idx.unwrap_or(ncols).min(ncols);
        if self.poly == 0 || split == 0 {
            return ncols;
        }
        PolynomialFeatures::new(self.poly).powers(split).len() + (ncols - split)
    }
}

/// Transform each matrix independently; output has one matrix per input.
pub fn split_poly_scale_join(
    matrices: &[Array2<f64>],
    dummy_idx: Option<usize>,
    poly: usize,
    scale: bool,
) -> Result<Vec<Array2<f64>>, RegressError> {
    let t = FeatureTransform { poly, scale, dummy_idx };
    matrices.iter().map(|m| t.apply(m)).collect()
}
