//! Evenly spaced axes shared by placement, sampling and extraction.

use crate::error::{Result, SimError};

/// `n` evenly spaced values on the closed interval `[start, end]`.
///
/// Both endpoints are reproduced exactly.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Output times `0..=t_max` for a sampled run.
pub fn output_times(t_max: f64, n_out: usize) -> Result<Vec<f64>> {
    if !(t_max > 0.0) || !t_max.is_finite() {
        return Err(SimError::config(format!(
            "t_max must be positive and finite, got {t_max}"
        )));
    }
    if n_out < 2 {
        return Err(SimError::config(format!(
            "n_out must be at least 2 to span [0, t_max], got {n_out}"
        )));
    }
    Ok(linspace(0.0, t_max, n_out))
}

/// Check that consecutive gaps of `times` agree with their mean within a
/// relative tolerance. Returns the mean gap.
pub fn uniform_interval(times: &[f64], tolerance: f64) -> std::result::Result<f64, String> {
    if times.len() < 2 {
        return Ok(0.0);
    }
    let span = times[times.len() - 1] - times[0];
    let mean = span / (times.len() - 1) as f64;
    if !(mean > 0.0) {
        return Err(format!("snapshot times are not increasing (span {span})"));
    }
    for (k, w) in times.windows(2).enumerate() {
        let gap = w[1] - w[0];
        if ((gap - mean) / mean).abs() > tolerance {
            return Err(format!(
                "snapshot interval {gap} between #{k} and #{} deviates from mean {mean}",
                k + 1
            ));
        }
    }
    Ok(mean)
}
