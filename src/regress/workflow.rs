// src/regress/workflow.rs
//
// The two entry points callers drive: a single train/test evaluation and
// shuffled k-fold cross-validation. Both mutate the caller's model.

use std::fmt;

use ndarray::{Array1, Array2, Axis};

use super::kfold::KFold;
use super::metrics::{mean, r2_score, std_dev};
use super::model::Model;
use super::transform::FeatureTransform;
use super::RegressError;
use crate::config::consts::CV_SEED;

#[derive(Clone, Debug)]
pub struct TrainTestReport {
    /// r² on the test set.
    pub r2: f64,
    /// Only for linear models without polynomial features.
    pub coefficients: Option<Array1<f64>>,
    pub intercept: Option<f64>,
    /// Model output on the (transformed) test set.
    pub predictions: Array1<f64>,
}

#[derive(Clone, Debug)]
pub struct CrossValReport {
    pub name: String,
    pub poly: usize,
    pub train_r2: Vec<f64>,
    pub val_r2: Vec<f64>,
    /// Per-fold coefficient sum over the number of folds (not over the
    /// number of rows).
    pub mean_coefficients: Option<Array1<f64>>,
    /// Last fold's model over the whole dataset, transformed on its own.
    pub final_fold_predictions: Array1<f64>,
    /// Each row predicted by the fold that held it out.
    pub out_of_fold_predictions: Array1<f64>,
}

impl CrossValReport {
    pub fn train_mean(&self) -> (f64, f64) {
        (mean(&self.train_r2), std_dev(&self.train_r2))
    }

    pub fn val_mean(&self) -> (f64, f64) {
        (mean(&self.val_r2), std_dev(&self.val_r2))
    }
}

fn check_xy(x: &Array2<f64>, y: &Array1<f64>) -> Result<(), RegressError> {
    RegressError::check_len("rows vs targets", x.nrows(), y.len())?;
    if y.is_empty() {
        return Err(RegressError::Empty);
    }
    Ok(())
}

/// Fit on `(x, y)`, score on `(x_test, y_test)`.
///
/// Both matrices go through `transform` separately, each with its own
/// scaling statistics.
pub fn train_test(
    x: &Array2<f64>,
    y: &Array1<f64>,
    x_test: &Array2<f64>,
    y_test: &Array1<f64>,
    model: &mut Model,
    transform: FeatureTransform,
) -> Result<TrainTestReport, RegressError> {
    check_xy(x, y)?;
    check_xy(x_test, y_test)?;
    RegressError::check_len("train vs test columns", x.ncols(), x_test.ncols())?;

    let x_fit = transform.apply(x)?;
    let x_eval = transform.apply(x_test)?;

    model.fit(&x_fit, y)?;
    let predictions = model.predict(&x_eval)?;
    let r2 = r2_score(y_test, &predictions)?;

    let (coefficients, intercept) = match model.linear_fit() {
        Some(fit) if transform.poly == 0 => (Some(fit.coefficients.clone()), Some(fit.intercept)),
        _ => (None, None),
    };

    let report = TrainTestReport { r2, coefficients, intercept, predictions };
    logf!("train_test: {} train rows, {} test rows, R^2 {:.4}", y.len(), y_test.len(), r2);
    Ok(report)
}

/// Shuffled k-fold cross-validation (fixed seed).
pub fn cross_val(
    x: &Array2<f64>,
    y: &Array1<f64>,
    model: &mut Model,
    name: &str,
    splits: usize,
    transform: FeatureTransform,
) -> Result<CrossValReport, RegressError> {
    check_xy(x, y)?;
    let folds = KFold::new(splits, CV_SEED).split(y.len())?;

    // Decided once: only linear models on un-expanded features report coefficients.
    let track_coefficients = model.is_linear() && transform.poly == 0;
    let mut coef_sum = track_coefficients.then(|| Array1::<f64>::zeros(transform.output_width(x.ncols())));

    let mut train_r2 = Vec::with_capacity(splits);
    let mut val_r2 = Vec::with_capacity(splits);
    let mut oof = Array1::<f64>::zeros(y.len());

    for (i, fold) in folds.iter().enumerate() {
        let x_train = transform.apply(&x.select(Axis(0), &fold.train))?;
        let x_val = transform.apply(&x.select(Axis(0), &fold.validation))?;
        let y_train = y.select(Axis(0), &fold.train);
        let y_val = y.select(Axis(0), &fold.validation);

        model.fit(&x_train, &y_train)?;
        let train_pred = model.predict(&x_train)?;
        let val_pred = model.predict(&x_val)?;

        train_r2.push(r2_score(&y_train, &train_pred)?);
        val_r2.push(r2_score(&y_val, &val_pred)?);
        for (&row, &p) in fold.validation.iter().zip(val_pred.iter()) {
            oof[row] = p;
        }

        if let (Some(sum), Some(fit)) = (coef_sum.as_mut(), model.linear_fit()) {
            *sum += &fit.coefficients;
        }
        logd!("{name} fold {}/{}: train {:.4} val {:.4}", i + 1, splits, train_r2[i], val_r2[i]);
    }

    let mean_coefficients = coef_sum.map(|sum| sum / splits as f64);
    let final_fold_predictions = model.predict(&transform.apply(x)?)?;

    let report = CrossValReport {
        name: s!(name),
        poly: transform.poly,
        train_r2,
        val_r2,
        mean_coefficients,
        final_fold_predictions,
        out_of_fold_predictions: oof,
    };
    let (val_mu, val_sd) = report.val_mean();
    logf!("cross_val {name}: {splits} folds, val R^2 {val_mu:.3} +- {val_sd:.3}");
    Ok(report)
}

fn fmt_values(f: &mut fmt::Formatter<'_>, values: impl IntoIterator<Item = f64>) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v:.4}")?;
    }
    write!(f, "]")
}

impl fmt::Display for TrainTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "R^2: {:.2}", self.r2)?;
        if let Some(c) = &self.coefficients {
            write!(f, "\nCoefficients: ")?;
            fmt_values(f, c.iter().copied())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for CrossValReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        if self.poly > 0 {
            writeln!(f, "With Polynomial Features: degree = {}...\n", self.poly)?;
        }
        write!(f, "{name} Regression Scores: ")?;
        fmt_values(f, self.val_r2.iter().copied())?;
        writeln!(f, "\n")?;

        let (tm, ts) = self.train_mean();
        let (vm, vs) = self.val_mean();
        writeln!(f, "{name}.R. Train - Mean R^2: {tm:.3} +- {ts:.3}")?;
        writeln!(f, "{name}.R. Val - Mean R^2: {vm:.3} +- {vs:.3}")?;

        write!(f, "\nCoefficients: ")?;
        match &self.mean_coefficients {
            Some(c) => fmt_values(f, c.iter().copied())?,
            None => write!(f, "None")?,
        }
        writeln!(f)
    }
}
