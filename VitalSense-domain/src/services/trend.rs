use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::entities::trend::{ForecastPoint, TrendDirection};

/// Minimum number of observations before a regression is attempted
pub const MIN_TREND_POINTS: usize = 3;

/// Slope p-values above this are treated as statistically insignificant
const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Default number of projected points
pub const DEFAULT_FORECAST_PERIODS: usize = 3;

/// Largest trailing window used as the forecast baseline
const FORECAST_WINDOW: usize = 7;

/// Ordinary least squares fit of value against sequence index 0, 1, 2, …
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub slope: f64,
    pub intercept: f64,
    /// Two-sided p-value for the slope (Student's t, n−2 degrees of freedom)
    pub p_value: f64,
}

/// Fit a least-squares line through the series, indexed 0..n.
///
/// Returns `None` below `MIN_TREND_POINTS` observations.
pub fn fit_against_index(values: &[f64]) -> Option<OlsFit> {
    let n = values.len();
    if n < MIN_TREND_POINTS {
        return None;
    }

    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let p_value = slope_p_value(slope, sxx, syy, sxy, n);

    Some(OlsFit {
        slope,
        intercept,
        p_value,
    })
}

/// Two-sided p-value for the fitted slope.
///
/// A flat series has nothing to test (p = 1); a perfectly collinear series
/// with a non-zero slope has zero residual variance (p = 0).
fn slope_p_value(slope: f64, sxx: f64, syy: f64, sxy: f64, n: usize) -> f64 {
    if slope == 0.0 {
        return 1.0;
    }

    let df = (n - 2) as f64;
    let residual_ss = (syy - slope * sxy).max(0.0);
    let std_err = (residual_ss / df / sxx).sqrt();
    if std_err == 0.0 {
        return 0.0;
    }

    let t_stat = (slope / std_err).abs();
    let tdist = StudentsT::new(0.0, 1.0, df).expect("df >= 1 for n >= 3");
    2.0 * (1.0 - tdist.cdf(t_stat))
}

/// Classify the direction of a time-ordered series.
///
/// An insignificant slope (p > 0.05) reports stable regardless of sign.
pub fn classify(values: &[f64]) -> TrendDirection {
    let fit = match fit_against_index(values) {
        Some(fit) => fit,
        None => return TrendDirection::InsufficientData,
    };

    if fit.p_value > SIGNIFICANCE_LEVEL {
        return TrendDirection::Stable;
    }

    if fit.slope > 0.0 {
        TrendDirection::Increasing
    } else if fit.slope < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Project `periods` future points from a trailing moving average plus the
/// OLS slope.
///
/// Each point carries a band of ± one population standard deviation of the
/// whole input series. Below three observations the forecast is empty.
pub fn forecast(values: &[f64], periods: usize) -> Vec<ForecastPoint> {
    let fit = match fit_against_index(values) {
        Some(fit) => fit,
        None => return Vec::new(),
    };

    let window = FORECAST_WINDOW.min(values.len());
    let baseline =
        values[values.len() - window..].iter().sum::<f64>() / window as f64;

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / values.len() as f64)
        .sqrt();

    (1..=periods)
        .map(|step| {
            let value = baseline + fit.slope * step as f64;
            ForecastPoint {
                period: step,
                value,
                confidence_lower: value - std,
                confidence_upper: value + std,
            }
        })
        .collect()
}
