use crate::plot::Figure;
use ndarray::Array1;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("x has {x} observations but y has {y}")]
    DimensionMismatch { x: usize, y: usize },
    #[error("Regression needs at least two observations, got {0}")]
    TooFewObservations(usize),
    #[error("Singular design matrix: x has fewer than two distinct values")]
    SingularDesign,
}

pub type Result<T> = std::result::Result<T, RegressionError>;

const FIT_LINE_POINTS: usize = 100;

/// Ordinary-least-squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone)]
pub struct RegressionSummary {
    pub n_obs: usize,
    pub intercept: f64,
    pub slope: f64,
    pub intercept_stderr: f64,
    pub slope_stderr: f64,
    pub r_squared: f64,
}

impl RegressionSummary {
    pub fn intercept_t(&self) -> f64 {
        self.intercept / self.intercept_stderr
    }

    pub fn slope_t(&self) -> f64 {
        self.slope / self.slope_stderr
    }
}

impl fmt::Display for RegressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OLS Regression Results")?;
        writeln!(f, "======================================")?;
        writeln!(f, "observations: {}", self.n_obs)?;
        writeln!(f, "{:<10} {:>12} {:>12} {:>10}", "", "coef", "std err", "t")?;
        writeln!(
            f,
            "{:<10} {:>12.6} {:>12.6} {:>10.3}",
            "const",
            self.intercept,
            self.intercept_stderr,
            self.intercept_t()
        )?;
        writeln!(
            f,
            "{:<10} {:>12.6} {:>12.6} {:>10.3}",
            "x",
            self.slope,
            self.slope_stderr,
            self.slope_t()
        )?;
        write!(f, "R-squared: {:.6}", self.r_squared)
    }
}

/// Fit `y = a + b x` by ordinary least squares and draw the raw scatter plus
/// a 100-point fit line spanning `[min(x), max(x)]` into `figure`.
///
/// Residual statistics with zero degrees of freedom (n = 2) come back as
/// NaN/Inf floats rather than errors; fewer than two distinct x values is a
/// `SingularDesign` error.
pub fn linear_regression(x: &[f64], y: &[f64], figure: &mut Figure) -> Result<RegressionSummary> {
    if x.len() != y.len() {
        return Err(RegressionError::DimensionMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(RegressionError::TooFewObservations(x.len()));
    }

    let xs = Array1::from_iter(x.iter().copied());
    let ys = Array1::from_iter(y.iter().copied());
    let n = xs.len() as f64;
    let mean_x = xs.sum() / n;
    let mean_y = ys.sum() / n;

    // Centered second moments; sxx = 0 means every x is identical
    let dev_x = &xs - mean_x;
    let dev_y = &ys - mean_y;
    let sxx = dev_x.mapv(|v| v * v).sum();
    if sxx == 0.0 {
        return Err(RegressionError::SingularDesign);
    }
    let sxy = (&dev_x * &dev_y).sum();

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let fitted = xs.mapv(|v| intercept + slope * v);
    let residuals = &ys - &fitted;
    let rss = residuals.mapv(|v| v * v).sum();
    let tss = dev_y.mapv(|v| v * v).sum();
    let r_squared = 1.0 - rss / tss;

    // Residual variance over n - 2 degrees of freedom; degenerate fits
    // propagate as non-finite standard errors
    let sigma2 = rss / (n - 2.0);
    let slope_stderr = (sigma2 / sxx).sqrt();
    let intercept_stderr = (sigma2 * (1.0 / n + mean_x * mean_x / sxx)).sqrt();

    draw_fit(x, y, intercept, slope, figure);

    Ok(RegressionSummary {
        n_obs: x.len(),
        intercept,
        slope,
        intercept_stderr,
        slope_stderr,
        r_squared,
    })
}

fn draw_fit(x: &[f64], y: &[f64], intercept: f64, slope: f64, figure: &mut Figure) {
    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (x_max - x_min) / (FIT_LINE_POINTS - 1) as f64;

    let line: Vec<(f64, f64)> = (0..FIT_LINE_POINTS)
        .map(|i| {
            let xi = x_min + step * i as f64;
            (xi, intercept + slope * xi)
        })
        .collect();
    let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();

    figure.set_labels("X Value", "Y Value");
    figure.scatter(points, None);
    figure.line(line, Some("OLS fit".to_string()));
}
