// tests/regression_workflow.rs
mod common;

use bgg_scrape::regress::{
    analysis_plot, cross_val, split_poly_scale_join, train_test, train_test_split, Frame, ModelChoice,
    RegressError,
};
use bgg_scrape::scrape::collect_games;
use ndarray::{array, Array2};

use common::{options, site, tmp_dir};

#[test]
fn scraped_table_feeds_cross_validation() {
    let ds = collect_games(&site(60), &options(60), None).unwrap().to_dataset();
    let features: Vec<String> = ["Difficulty", "Owners", "Min_Age"].iter().map(|s| s.to_string()).collect();
    let frame = Frame::from_dataset(&ds, "AVG_Rating", &features, &[]).unwrap();
    assert_eq!(frame.x.dim(), (60, 3));

    let mut model = ModelChoice::Ols.build();
    let report = cross_val(&frame.x, &frame.y, &mut model, "Linear", 10, frame.transform(0, true)).unwrap();
    assert_eq!(report.train_r2.len(), 10);
    assert_eq!(report.val_r2.len(), 10);
    assert_eq!(report.mean_coefficients.as_ref().unwrap().len(), 3);

    let text = report.to_string();
    assert!(text.starts_with("Linear Regression Scores: ["));
    assert!(text.contains("Linear.R. Train - Mean R^2: "));
}

#[test]
fn holdout_then_plot() {
    let ds = collect_games(&site(40), &options(40), None).unwrap().to_dataset();
    let frame = Frame::from_dataset(&ds, "AVG_Rating", &[], &[]).unwrap();
    let split = train_test_split(&frame.x, &frame.y, 0.2, 71).unwrap();

    let mut model = ModelChoice::Ridge { alpha: 0.5 }.build();
    let report = train_test(
        &split.x_train, &split.y_train, &split.x_test, &split.y_test, &mut model, frame.transform(0, true),
    )
    .unwrap();
    assert_eq!(report.coefficients.unwrap().len(), frame.x.ncols());
    assert_eq!(report.predictions.len(), split.y_test.len());

    let path = tmp_dir("plot").join("diagnostics.svg");
    analysis_plot(&report.predictions.to_vec(), &split.y_test.to_vec(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn four_by_two_with_trailing_dummy() {
    let x = array![[1.0, 0.0], [2.0, 1.0], [4.0, 1.0], [8.0, 0.0]];
    let out = split_poly_scale_join(&[x.clone(), x.clone()], Some(1), 2, true).unwrap();
    assert_eq!(out.len(), 2);
    for m in &out {
        assert_eq!(m.dim(), (4, 4));
        assert_eq!(m.column(3), x.column(1));
        // scaled numeric block: zero mean per column
        for c in 0..3 {
            assert!(m.column(c).sum().abs() < 1e-9);
        }
    }
}

#[test]
fn caller_data_is_untouched() {
    let x = Array2::from_shape_fn((6, 2), |(i, j)| if j == 0 { i as f64 } else { ((i * i) % 5) as f64 });
    let before = x.clone();
    let _ = split_poly_scale_join(&[x.clone()], None, 3, true).unwrap();
    let y = x.column(0).to_owned();
    let mut model = ModelChoice::Ols.build();
    let _ = cross_val(&x, &y, &mut model, "Linear", 3, Default::default()).unwrap();
    assert_eq!(x, before);
}

#[test]
fn mismatched_rows_are_rejected() {
    let x = Array2::<f64>::zeros((5, 2));
    let y = ndarray::Array1::<f64>::zeros(4);
    let mut model = ModelChoice::Ols.build();
    let err = train_test(&x, &y, &x, &y, &mut model, Default::default()).unwrap_err();
    assert!(matches!(err, RegressError::ShapeMismatch { .. }));
}
