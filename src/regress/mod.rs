// src/regress/mod.rs
//! Regression helpers over `ndarray` matrices: feature preparation,
//! train/test and k-fold evaluation, and residual diagnostics.
//!
//! Caller data is never modified; every transformation returns new arrays.
//! Dummy (indicator) columns sit at the end of a feature matrix, from
//! `dummy_idx` on, and are never expanded or scaled.

mod error;
pub mod frame;
pub mod kfold;
pub mod metrics;
pub mod model;
pub mod plot;
pub mod transform;
pub mod workflow;

pub use error::RegressError;
pub use frame::Frame;
pub use kfold::{train_test_split, Fold, KFold, Split};
pub use metrics::r2_score;
pub use model::{LinearFit, LinearModel, MeanModel, Model, ModelChoice, Penalty, Regressor};
pub use plot::{analysis_plot, norm_ppf, Diagnostics};
pub use transform::{split_poly_scale_join, FeatureTransform, PolynomialFeatures, StandardScaler};
pub use workflow::{cross_val, train_test, CrossValReport, TrainTestReport};
