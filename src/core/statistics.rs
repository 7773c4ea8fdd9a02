//! Descriptive statistics over a non-empty sample.
//!
//! Variance and standard deviation are population figures (divide by `n`).

use crate::domain::model::{Mode, StatisticsResult};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{ensure_representable, validate_non_empty};

pub fn compute_statistics(sample: &[f64]) -> Result<StatisticsResult> {
    validate_sample(sample)?;

    // Every figure is taken over the sorted copy so permutations agree bit for bit.
    let sorted = sorted_copy(sample);
    let mean = mean_of(&sorted);
    let variance = variance_about(&sorted, mean);

    let sum: f64 = sorted.iter().sum();
    let range = range_of_sorted(&sorted);
    ensure_representable("sum", sum)?;
    ensure_representable("mean", mean)?;
    ensure_representable("range", range)?;
    ensure_representable("variance", variance)?;

    let result = StatisticsResult {
        mean,
        median: median_of_sorted(&sorted),
        mode: mode_of_sorted(&sorted),
        range,
        variance,
        standard_deviation: variance.sqrt(),
        sum,
        count: sample.len(),
    };

    tracing::debug!(
        count = result.count,
        mean = result.mean,
        median = result.median,
        "Computed statistics"
    );

    Ok(result)
}

pub fn mean(sample: &[f64]) -> Result<f64> {
    validate_sample(sample)?;
    let mean = mean_of(&sorted_copy(sample));
    ensure_representable("mean", mean)?;
    Ok(mean)
}

pub fn median(sample: &[f64]) -> Result<f64> {
    validate_sample(sample)?;
    Ok(median_of_sorted(&sorted_copy(sample)))
}

/// Values with the highest frequency, ascending.
///
/// When several distinct values exist and all of them occur equally often
/// there is no mode. A sample with a single distinct value has that value
/// as its mode.
pub fn mode(sample: &[f64]) -> Result<Mode> {
    validate_sample(sample)?;
    Ok(mode_of_sorted(&sorted_copy(sample)))
}

pub fn range(sample: &[f64]) -> Result<f64> {
    validate_sample(sample)?;
    let range = range_of_sorted(&sorted_copy(sample));
    ensure_representable("range", range)?;
    Ok(range)
}

pub fn population_variance(sample: &[f64]) -> Result<f64> {
    validate_sample(sample)?;
    let sorted = sorted_copy(sample);
    let mean = mean_of(&sorted);
    ensure_representable("mean", mean)?;
    let variance = variance_about(&sorted, mean);
    ensure_representable("variance", variance)?;
    Ok(variance)
}

fn validate_sample(sample: &[f64]) -> Result<()> {
    validate_non_empty("sample", sample)?;
    if let Some(value) = sample.iter().find(|x| !x.is_finite()) {
        return Err(CalcError::invalid_number(
            "sample",
            value,
            "every value must be a finite number",
        ));
    }
    Ok(())
}

fn mean_of(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

fn variance_about(sample: &[f64], mean: f64) -> f64 {
    sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / sample.len() as f64
}

// Adding 0.0 folds -0.0 into 0.0 so both count as one value.
fn sorted_copy(sample: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = sample.iter().map(|x| x + 0.0).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

fn range_of_sorted(sorted: &[f64]) -> f64 {
    sorted[sorted.len() - 1] - sorted[0]
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

fn mode_of_sorted(sorted: &[f64]) -> Mode {
    let runs: Vec<(f64, usize)> = sorted
        .chunk_by(|a, b| a == b)
        .map(|run| (run[0], run.len()))
        .collect();

    let max_freq = runs.iter().map(|(_, freq)| *freq).max().unwrap_or(0);
    let modes: Vec<f64> = runs
        .iter()
        .filter(|(_, freq)| *freq == max_freq)
        .map(|(value, _)| *value)
        .collect();

    if runs.len() > 1 && modes.len() == runs.len() {
        Mode::NoMode
    } else {
        Mode::Values(modes)
    }
}
