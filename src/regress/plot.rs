// src/regress/plot.rs
//
// Linear-assumption diagnostics: predicted vs actual, residuals vs
// predicted, and a normal QQ plot of the residuals.

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use super::metrics::{mean, std_dev};
use super::RegressError;

/// Everything the three panels show, without any rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub predicted: Vec<f64>,
    pub actual: Vec<f64>,
    /// `actual - predicted`
    pub residuals: Vec<f64>,
    /// (theoretical normal quantile, sorted residual)
    pub qq: Vec<(f64, f64)>,
    /// Standardized reference line: slope = residual std, intercept = residual mean.
    pub qq_line: (f64, f64),
}

impl Diagnostics {
    pub fn new(predictions: &[f64], ys: &[f64]) -> Result<Self, RegressError> {
        RegressError::check_len("predictions vs actuals", predictions.len(), ys.len())?;
        if ys.is_empty() {
            return Err(RegressError::Empty);
        }

        let residuals: Vec<f64> = ys.iter().zip(predictions).map(|(y, p)| y - p).collect();

        let mut sorted = residuals.clone();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len() as f64;
        let qq = sorted
            .iter()
            .enumerate()
            .map(|(i, &r)| (norm_ppf((i + 1) as f64 / (n + 1.0)), r))
            .collect();

        Ok(Self {
            predicted: predictions.to_vec(),
            actual: ys.to_vec(),
            qq_line: (std_dev(&residuals), mean(&residuals)),
            residuals,
            qq,
        })
    }

    pub fn predicted_vs_actual(&self) -> Vec<(f64, f64)> {
        self.predicted.iter().copied().zip(self.actual.iter().copied()).collect()
    }

    pub fn residual_points(&self) -> Vec<(f64, f64)> {
        self.predicted.iter().copied().zip(self.residuals.iter().copied()).collect()
    }

    /// End points of the QQ reference line over the theoretical range.
    pub fn qq_line_points(&self) -> [(f64, f64); 2] {
        let (slope, icpt) = self.qq_line;
        let lo = self.qq.first().map_or(-1.0, |p| p.0);
        let hi = self.qq.last().map_or(1.0, |p| p.0);
        [(lo, icpt + slope * lo), (hi, icpt + slope * hi)]
    }
}

/// Inverse standard normal CDF (Acklam's rational approximation,
/// relative error below 1.2e-9). Defined on (0, 1).
pub fn norm_ppf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01, 2.209460984245205e+02, -2.759285104469687e+02,
        1.383577518672690e+02, -3.066479806614716e+01, 2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01, 1.615858368580409e+02, -1.556989798598866e+02,
        6.680131188771972e+01, -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03, -3.223964580411365e-01, -2.400758277161838e+00,
        -2.549732539343734e+00, 4.374664141464968e+00, 2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03, 3.224671290700398e-01, 2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// Padded axis range covering `values`.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return -1.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// Render the three diagnostic panels side by side into one SVG file.
pub fn analysis_plot(predictions: &[f64], ys: &[f64], path: &Path) -> Result<(), Box<dyn Error>> {
    let diag = Diagnostics::new(predictions, ys)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            crate::file::ensure_directory(parent)?;
        }
    }

    let root = SVGBackend::new(path, (1500, 450)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 3));

    scatter_panel(
        &panels[0],
        "Predicted vs Actual",
        ("Predicted Ys", "Actual Ys"),
        &diag.predicted_vs_actual(),
        None,
    )?;
    scatter_panel(
        &panels[1],
        "Residuals Plot",
        ("Predicted Ys", "Residuals"),
        &diag.residual_points(),
        None,
    )?;
    scatter_panel(
        &panels[2],
        "QQ Plot- Distribution of Residuals",
        ("Theoretical Quantiles", "Sample Quantiles"),
        &diag.qq,
        Some(diag.qq_line_points()),
    )?;

    root.present()?;
    logf!("Wrote diagnostics for {} points to {}", diag.residuals.len(), path.display());
    Ok(())
}

fn scatter_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    (x_desc, y_desc): (&str, &str),
    points: &[(f64, f64)],
    line: Option<[(f64, f64); 2]>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let extra = line.iter().flatten().copied();
    let xs = axis_range(points.iter().map(|p| p.0).chain(extra.clone().map(|p| p.0)));
    let ys = axis_range(points.iter().map(|p| p.1).chain(extra.map(|p| p.1)));

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(xs, ys)?;

    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.mix(0.6).filled())))?;
    if let Some(ends) = line {
        chart.draw_series(LineSeries::new(ends, RED.stroke_width(2)))?;
    }
    Ok(())
}
