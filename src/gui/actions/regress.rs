// src/gui/actions/regress.rs
use std::error::Error;
use std::fmt::Write as _;

use crate::{
    config::options::{parse_list, RegressOptions},
    gui::app::{App, RegressionView},
    regress::{self, Diagnostics, Frame, ModelChoice},
    store::DataSet,
};

pub fn run(app: &mut App) {
    let model = match app.model_text.parse::<ModelChoice>() {
        Ok(m) => m,
        Err(e) => {
            app.status(format!("Error: {e}"));
            return;
        }
    };

    let opts = &mut app.state.options.regress;
    opts.model = model;
    opts.features = parse_list(&app.features_text);
    opts.dummies = parse_list(&app.dummies_text);

    match evaluate(&app.data, opts) {
        Ok(view) => {
            app.regression = Some(view);
            app.status("Regression done");
        }
        Err(e) => {
            loge!("Regress: {}", e);
            app.regression = None;
            app.status(format!("Error: {e}"));
        }
    }
}

pub fn save_plot(app: &mut App) {
    let Some(view) = &app.regression else {
        return;
    };
    let path = app.state.options.regress.plot_path.clone();
    let d = &view.diagnostics;
    match regress::analysis_plot(&d.predicted, &d.actual, &path) {
        Ok(()) => app.status(format!("Saved plot → {}", path.display())),
        Err(e) => {
            loge!("Plot: {}", e);
            app.status(format!("Plot failed: {e}"));
        }
    }
}

/// Optional hold-out evaluation, then cross-validation; the summary text
/// matches what the CLI prints.
pub fn evaluate(ds: &DataSet, opts: &RegressOptions) -> Result<RegressionView, Box<dyn Error>> {
    let frame = Frame::from_dataset(ds, &opts.target, &opts.features, &opts.dummies)?;
    let transform = opts.transform(frame.dummy_idx);
    let mut summary = format!("Features: {}\n\n", frame.feature_names.join(", "));

    let (x, y) = match opts.test_size {
        Some(size) => {
            let split = regress::train_test_split(&frame.x, &frame.y, size, opts.seed)?;
            let mut model = opts.model.build();
            let report = regress::train_test(
                &split.x_train, &split.y_train, &split.x_test, &split.y_test, &mut model, transform,
            )?;
            let _ = writeln!(summary, "{report}");
            (split.x_train, split.y_train)
        }
        None => (frame.x, frame.y),
    };

    let mut model = opts.model.build();
    let report = regress::cross_val(&x, &y, &mut model, opts.model.name(), opts.splits, transform)?;
    let _ = write!(summary, "{report}");

    let predictions = if opts.plot_oof {
        &report.out_of_fold_predictions
    } else {
        &report.final_fold_predictions
    };
    let diagnostics = Diagnostics::new(&predictions.to_vec(), &y.to_vec())?;

    Ok(RegressionView { summary, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games() -> DataSet {
        let rows = (0..24)
            .map(|i| {
                let diff = 1.0 + (i % 5) as f64 * 0.7;
                let owners = 100.0 + (i * 37 % 11) as f64 * 50.0;
                let avg = 5.5 + 0.6 * diff + owners * 0.002 + (i % 3) as f64 * 0.01;
                vec![format!("Game {i}"), avg.to_string(), diff.to_string(), owners.to_string()]
            })
            .collect();
        DataSet {
            headers: Some(vec![s!("Name"), s!("AVG_Rating"), s!("Difficulty"), s!("Owners")]),
            rows,
        }
    }

    #[test]
    fn summary_and_diagnostics() {
        let opts = RegressOptions { splits: 4, test_size: Some(0.25), ..Default::default() };
        let view = evaluate(&games(), &opts).unwrap();
        assert!(view.summary.starts_with("Features: Difficulty, Owners"));
        assert!(view.summary.contains("R^2: "));
        assert!(view.summary.contains("Linear.R. Train - Mean R^2:"));
        // cross-validation ran on the 18 training rows
        assert_eq!(view.diagnostics.residuals.len(), 18);
    }
}
