// src/regress/model.rs
//
// Models the workflow can fit. Whether coefficients exist is part of the
// type: `Model::Linear` has them once fitted, `Model::Opaque` never does.

use std::fmt;
use std::str::FromStr;

use linfa::traits::Fit;
use linfa::Dataset;
use linfa_linear::LinearRegression;
use ndarray::{concatenate, Array1, Array2, Axis};

use super::RegressError;

/// Anything that can be fitted and asked for predictions.
pub trait Regressor: Send {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), RegressError>;
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, RegressError>;
}

/// Objectives, with `n` rows and residual `r = y - Xw - b`:
/// ridge minimises `|r|² + α|w|²`, lasso minimises `|r|² / 2n + α|w|₁`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Penalty {
    None,
    Ridge(f64),
    Lasso(f64),
}

const LASSO_MAX_ITER: usize = 10_000;
const LASSO_TOL: f64 = 1e-10;

#[derive(Clone, Debug, PartialEq)]
pub struct LinearFit {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

/// Least squares, optionally penalised. Columns with zero variance are
/// left out of the solve and get a zero coefficient.
#[derive(Clone, Debug)]
pub struct LinearModel {
    pub penalty: Penalty,
    fitted: Option<LinearFit>,
}

impl LinearModel {
    pub fn new(penalty: Penalty) -> Self {
        Self { penalty, fitted: None }
    }

    pub fn ols() -> Self {
        Self::new(Penalty::None)
    }

    pub fn fitted(&self) -> Option<&LinearFit> {
        self.fitted.as_ref()
    }

    fn solve(&self, x: Array2<f64>, y: Array1<f64>) -> Result<(Array1<f64>, f64), RegressError> {
        match self.penalty {
            Penalty::None => {
                let m = LinearRegression::new()
                    .fit(&Dataset::new(x, y))
                    .map_err(|e| RegressError::Fit(e.to_string()))?;
                Ok((m.params().to_owned(), m.intercept()))
            }
            Penalty::Ridge(alpha) => {
                let (xc, x_mean, yc, y_mean) = center(&x, &y)?;
                let w = ridge(xc, yc, alpha)?;
                Ok(intercept_pair(w, &x_mean, y_mean))
            }
            Penalty::Lasso(alpha) => {
                let (xc, x_mean, yc, y_mean) = center(&x, &y)?;
                let w = lasso(&xc, &yc, alpha);
                Ok(intercept_pair(w, &x_mean, y_mean))
            }
        }
    }
}

fn center(x: &Array2<f64>, y: &Array1<f64>) -> Result<(Array2<f64>, Array1<f64>, Array1<f64>, f64), RegressError> {
    let x_mean = x.mean_axis(Axis(0)).ok_or(RegressError::Empty)?;
    let y_mean = y.mean().ok_or(RegressError::Empty)?;
    Ok((x - &x_mean, x_mean, y - y_mean, y_mean))
}

fn intercept_pair(w: Array1<f64>, x_mean: &Array1<f64>, y_mean: f64) -> (Array1<f64>, f64) {
    let b = y_mean - w.dot(x_mean);
    (w, b)
}

/// Exact ridge on centred data: least squares over `[X; √α·I]`, `[y; 0]`.
fn ridge(xc: Array2<f64>, yc: Array1<f64>, alpha: f64) -> Result<Array1<f64>, RegressError> {
    let p = xc.ncols();
    let prior = Array2::<f64>::eye(p) * alpha.sqrt();
    let xa = concatenate(Axis(0), &[xc.view(), prior.view()])?;
    let ya = concatenate(Axis(0), &[yc.view(), Array1::<f64>::zeros(p).view()])?;
    let m = LinearRegression::new()
        .with_intercept(false)
        .fit(&Dataset::new(xa, ya))
        .map_err(|e| RegressError::Fit(e.to_string()))?;
    Ok(m.params().to_owned())
}

fn soft_threshold(v: f64, t: f64) -> f64 {
    if v > t {
        v - t
    } else if v < -t {
        v + t
    } else {
        0.0
    }
}

/// Cyclic coordinate descent on centred data, residual kept up to date.
fn lasso(xc: &Array2<f64>, yc: &Array1<f64>, alpha: f64) -> Array1<f64> {
    let n = xc.nrows() as f64;
    let norms: Vec<f64> = xc.columns().into_iter().map(|c| c.dot(&c)).collect();
    let mut w = Array1::<f64>::zeros(xc.ncols());
    let mut resid = yc.clone();

    for iter in 0..LASSO_MAX_ITER {
        let mut max_change = 0.0f64;
        for (j, &z) in norms.iter().enumerate() {
            if z <= f64::EPSILON {
                continue;
            }
            let col = xc.column(j);
            let old = w[j];
            let rho = col.dot(&resid) + z * old;
            let new = soft_threshold(rho, n * alpha) / z;
            if new != old {
                resid.scaled_add(old - new, &col);
                w[j] = new;
                max_change = max_change.max((new - old).abs());
            }
        }
        if max_change < LASSO_TOL {
            logd!("lasso converged after {} sweeps", iter + 1);
            return w;
        }
    }
    logd!("lasso stopped at {} sweeps without converging", LASSO_MAX_ITER);
    w
}

impl Regressor for LinearModel {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), RegressError> {
        RegressError::check_len("rows vs targets", x.nrows(), y.len())?;
        if y.is_empty() {
            return Err(RegressError::Empty);
        }

        let active: Vec<usize> = (0..x.ncols())
            .filter(|&j| {
                let col = x.column(j);
                let first = col[0];
                col.iter().any(|&v| v != first)
            })
            .collect();

        let mut coefficients = Array1::zeros(x.ncols());
        let intercept = if active.is_empty() {
            y.sum() / y.len() as f64
        } else {
            let (params, intercept) = self.solve(x.select(Axis(1), &active), y.to_owned())?;
            for (&j, &b) in active.iter().zip(params.iter()) {
                coefficients[j] = b;
            }
            intercept
        };

        logd!("fit {:?}: {} rows, {} of {} columns active", self.penalty, x.nrows(), active.len(), x.ncols());
        self.fitted = Some(LinearFit { coefficients, intercept });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, RegressError> {
        let fit = self.fitted.as_ref().ok_or(RegressError::NotFitted)?;
        RegressError::check_len("columns vs coefficients", x.ncols(), fit.coefficients.len())?;
        Ok(x.dot(&fit.coefficients) + fit.intercept)
    }
}

/// Predicts the training mean. Baseline with no coefficients.
#[derive(Clone, Debug, Default)]
pub struct MeanModel {
    mean: Option<f64>,
}

impl Regressor for MeanModel {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), RegressError> {
        RegressError::check_len("rows vs targets", x.nrows(), y.len())?;
        self.mean = Some(y.mean().ok_or(RegressError::Empty)?);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, RegressError> {
        let mean = self.mean.ok_or(RegressError::NotFitted)?;
        Ok(Array1::from_elem(x.nrows(), mean))
    }
}

pub enum Model {
    Linear(LinearModel),
    Opaque(Box<dyn Regressor>),
}

impl Model {
    pub fn is_linear(&self) -> bool {
        matches!(self, Model::Linear(_))
    }

    /// Coefficients and intercept of a fitted linear model.
    pub fn linear_fit(&self) -> Option<&LinearFit> {
        match self {
            Model::Linear(m) => m.fitted(),
            Model::Opaque(_) => None,
        }
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), RegressError> {
        match self {
            Model::Linear(m) => m.fit(x, y),
            Model::Opaque(m) => m.fit(x, y),
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, RegressError> {
        match self {
            Model::Linear(m) => m.predict(x),
            Model::Opaque(m) => m.predict(x),
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Linear(m) => f.debug_tuple("Linear").field(m).finish(),
            Model::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

/// Model selection as it appears in options and on the command line:
/// `ols`, `ridge:<alpha>`, `lasso:<alpha>`, `mean`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModelChoice {
    Ols,
    Ridge { alpha: f64 },
    Lasso { alpha: f64 },
    Mean,
}

impl ModelChoice {
    pub fn build(&self) -> Model {
        match *self {
            ModelChoice::Ols => Model::Linear(LinearModel::ols()),
            ModelChoice::Ridge { alpha } => Model::Linear(LinearModel::new(Penalty::Ridge(alpha))),
            ModelChoice::Lasso { alpha } => Model::Linear(LinearModel::new(Penalty::Lasso(alpha))),
            ModelChoice::Mean => Model::Opaque(Box::new(MeanModel::default())),
        }
    }

    /// Label used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ModelChoice::Ols => "Linear",
            ModelChoice::Ridge { .. } => "Ridge",
            ModelChoice::Lasso { .. } => "Lasso",
            ModelChoice::Mean => "Mean",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelChoice::Ols => write!(f, "ols"),
            ModelChoice::Ridge { alpha } => write!(f, "ridge:{alpha}"),
            ModelChoice::Lasso { alpha } => write!(f, "lasso:{alpha}"),
            ModelChoice::Mean => write!(f, "mean"),
        }
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (kind, arg) = match lower.split_once(':') {
            Some((k, a)) => (k, Some(a)),
            None => (lower.as_str(), None),
        };
        let alpha = || -> Result<f64, String> {
            let a = arg.unwrap_or("1.0");
            match a.trim().parse::<f64>() {
                Ok(v) if v >= 0.0 && v.is_finite() => Ok(v),
                _ => Err(format!("bad alpha {a:?} in model {s:?}")),
            }
        };
        match kind {
            "ols" | "linear" => Ok(ModelChoice::Ols),
            "ridge" => Ok(ModelChoice::Ridge { alpha: alpha()? }),
            "lasso" => Ok(ModelChoice::Lasso { alpha: alpha()? }),
            "mean" => Ok(ModelChoice::Mean),
            _ => Err(format!("unknown model {s:?} (expected ols, ridge:<alpha>, lasso:<alpha> or mean)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn ols_recovers_exact_plane() {
        // y = 1 + 2a - 3b
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 5.0]];
        let y = x.map_axis(Axis(1), |r| 1.0 + 2.0 * r[0] - 3.0 * r[1]);
        let mut m = LinearModel::ols();
        m.fit(&x, &y).unwrap();
        let fit = m.fitted().unwrap();
        assert!((fit.coefficients[0] - 2.0).abs() < 1e-8);
        assert!((fit.coefficients[1] + 3.0).abs() < 1e-8);
        assert!((fit.intercept - 1.0).abs() < 1e-8);
        let p = m.predict(&array![[10.0, 10.0]]).unwrap();
        assert!((p[0] + 9.0).abs() < 1e-6);
    }

    #[test]
    fn constant_column_gets_zero_coefficient() {
        let x = array![[1.0, 7.0], [2.0, 7.0], [3.0, 7.0], [4.0, 7.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];
        let mut m = LinearModel::ols();
        m.fit(&x, &y).unwrap();
        let fit = m.fitted().unwrap();
        assert_eq!(fit.coefficients[1], 0.0);
        assert!((m.predict(&x).unwrap() - &y).iter().all(|d| d.abs() < 1e-8));
    }

    fn line() -> (Array2<f64>, Array1<f64>) {
        (array![[1.0], [2.0], [3.0], [4.0], [5.0]], array![2.0, 4.0, 6.0, 8.0, 10.0])
    }

    #[test]
    fn ridge_matches_closed_form() {
        // centred: xᵀx = 10, xᵀy = 20, so b = 20 / (10 + α)
        let (x, y) = line();
        let mut ridge = LinearModel::new(Penalty::Ridge(1.0));
        ridge.fit(&x, &y).unwrap();
        let fit = ridge.fitted().unwrap();
        assert!((fit.coefficients[0] - 20.0 / 11.0).abs() < 1e-9, "{}", fit.coefficients[0]);
        assert!((fit.intercept - 6.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn ridge_without_penalty_is_ols() {
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 5.0]];
        let y = x.map_axis(Axis(1), |r| 1.0 + 2.0 * r[0] - 3.0 * r[1]);
        let mut ridge = LinearModel::new(Penalty::Ridge(0.0));
        ridge.fit(&x, &y).unwrap();
        let fit = ridge.fitted().unwrap();
        assert!((fit.coefficients[0] - 2.0).abs() < 1e-8);
        assert!((fit.coefficients[1] + 3.0).abs() < 1e-8);
        assert!((fit.intercept - 1.0).abs() < 1e-8);
    }

    #[test]
    fn lasso_soft_thresholds_by_n_alpha() {
        // b = (xᵀy - nα) / xᵀx = (20 - 0.5) / 10
        let (x, y) = line();
        let mut lasso = LinearModel::new(Penalty::Lasso(0.1));
        lasso.fit(&x, &y).unwrap();
        let fit = lasso.fitted().unwrap();
        assert!((fit.coefficients[0] - 1.95).abs() < 1e-9, "{}", fit.coefficients[0]);
        assert!((fit.intercept - 0.15).abs() < 1e-9);
    }

    #[test]
    fn strong_lasso_zeroes_everything() {
        let (x, y) = line();
        let mut lasso = LinearModel::new(Penalty::Lasso(100.0));
        lasso.fit(&x, &y).unwrap();
        let fit = lasso.fitted().unwrap();
        assert_eq!(fit.coefficients[0], 0.0);
        assert!((fit.intercept - 6.0).abs() < 1e-12);
    }

    #[test]
    fn lasso_drops_the_irrelevant_feature() {
        // second column is noise uncorrelated with y after centring
        let x = array![[1.0, 1.0], [2.0, -1.0], [3.0, -1.0], [4.0, 1.0], [5.0, 0.0]];
        let y = array![2.0, 4.0, 6.0, 8.0, 10.0];
        let mut lasso = LinearModel::new(Penalty::Lasso(0.1));
        lasso.fit(&x, &y).unwrap();
        let fit = lasso.fitted().unwrap();
        assert_eq!(fit.coefficients[1], 0.0);
        assert!((fit.coefficients[0] - 1.95).abs() < 1e-9);
    }

    #[test]
    fn predict_before_fit() {
        let m = ModelChoice::Ols.build();
        assert!(matches!(m.predict(&array![[1.0]]), Err(RegressError::NotFitted)));
        let mean = ModelChoice::Mean.build();
        assert!(matches!(mean.predict(&array![[1.0]]), Err(RegressError::NotFitted)));
    }

    #[test]
    fn mean_model_is_opaque() {
        let mut m = ModelChoice::Mean.build();
        m.fit(&array![[0.0], [1.0]], &array![1.0, 3.0]).unwrap();
        assert!(!m.is_linear());
        assert!(m.linear_fit().is_none());
        assert_eq!(m.predict(&array![[5.0]]).unwrap(), array![2.0]);
    }

    #[test]
    fn choice_parsing() {
        assert_eq!("ols".parse::<ModelChoice>().unwrap(), ModelChoice::Ols);
        assert_eq!("Ridge:0.5".parse::<ModelChoice>().unwrap(), ModelChoice::Ridge { alpha: 0.5 });
        assert_eq!("lasso".parse::<ModelChoice>().unwrap(), ModelChoice::Lasso { alpha: 1.0 });
        assert!("lasso:-1".parse::<ModelChoice>().is_err());
        assert!("forest".parse::<ModelChoice>().is_err());
        let c = ModelChoice::Ridge { alpha: 2.5 };
        assert_eq!(c.to_string().parse::<ModelChoice>().unwrap(), c);
    }
}
