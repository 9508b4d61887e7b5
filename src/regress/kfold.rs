// src/regress/kfold.rs
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::RegressError;

/// Row indices of one train/validation partition (both sorted).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Shuffled k-fold. The first `n % k` folds get one extra row.
#[derive(Clone, Copy, Debug)]
pub struct KFold {
    pub n_splits: usize,
    pub seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize, seed: u64) -> Self {
        Self { n_splits, seed }
    }

    pub fn split(&self, n_rows: usize) -> Result<Vec<Fold>, RegressError> {
        let k = self.n_splits;
        if k < 2 || k > n_rows {
            return Err(RegressError::BadSplits { splits: k, rows: n_rows });
        }

        let mut order: Vec<usize> = (0..n_rows).collect();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(self.seed));

        let base = n_rows / k;
        let extra = n_rows % k;
        let mut folds = Vec::with_capacity(k);
        let mut start = 0;
        for f in 0..k {
            let size = base + usize::from(f < extra);
            let mut validation = order[start..start + size].to_vec();
            let mut train: Vec<usize> =
                order[..start].iter().chain(&order[start + size..]).copied().collect();
            validation.sort_unstable();
            train.sort_unstable();
            folds.push(Fold { train, validation });
            start += size;
        }
        Ok(folds)
    }
}

pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Shuffled hold-out split; the test side gets `ceil(test_size * n)` rows.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<Split, RegressError> {
    RegressError::check_len("rows vs targets", x.nrows(), y.len())?;
    let n = y.len();
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(RegressError::BadTestSize(test_size));
    }
    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(RegressError::BadTestSize(test_size));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    let (test, train) = order.split_at(n_test);

    Ok(Split {
        x_train: x.select(Axis(0), train),
        x_test: x.select(Axis(0), test),
        y_train: y.select(Axis(0), train),
        y_test: y.select(Axis(0), test),
    })
}
