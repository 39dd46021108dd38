//! Mean and population standard deviation

use shared::SampleResult;

/// Value returned by [`mean`] and [`standard_deviation`] for an empty sample.
///
/// Both statistics are undefined over zero elements; reporting 0 keeps the
/// combined entry of a zero-worker request well formed. This is a policy
/// choice, not a mathematical result.
pub const EMPTY_SAMPLE_VALUE: f64 = 0.0;

/// Arithmetic mean, or [`EMPTY_SAMPLE_VALUE`] for an empty slice
pub fn mean(numbers: &[i64]) -> f64 {
    if numbers.is_empty() {
        return EMPTY_SAMPLE_VALUE;
    }

    let sum: i128 = numbers.iter().map(|&n| i128::from(n)).sum();
    sum as f64 / numbers.len() as f64
}

/// Population standard deviation (divides by `n`, never `n - 1`), or
/// [`EMPTY_SAMPLE_VALUE`] for an empty slice
pub fn standard_deviation(numbers: &[i64]) -> f64 {
    if numbers.is_empty() {
        return EMPTY_SAMPLE_VALUE;
    }

    let mean = mean(numbers);
    let squared: f64 = numbers
        .iter()
        .map(|&n| {
            let delta = n as f64 - mean;
            delta * delta
        })
        .sum();

    (squared / numbers.len() as f64).sqrt()
}

/// Wrap `data` together with its standard deviation
pub fn sample_result(data: Vec<i64>) -> SampleResult {
    SampleResult::new(standard_deviation(&data), data)
}
