//! Small numeric helpers shared by the analysis passes.

/// Arithmetic mean. Returns `0.0` for an empty slice.
#[must_use]
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    // Counts are bounded well within f64's 52-bit mantissa for any
    // realistic video list, so the cast is lossless in practice.
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    values.iter().sum::<f64>() / n
}

/// Median of a list of counts, averaging the two middle values for
/// even-length input. Returns `0.0` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn median_u64(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Population standard deviation (divides by `n`, not `n - 1`).
#[must_use]
pub(crate) fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = mean(
        &values
            .iter()
            .map(|v| (v - avg) * (v - avg))
            .collect::<Vec<f64>>(),
    );
    variance.sqrt()
}

/// Coefficient of variation (standard deviation over mean).
///
/// Returns `None` when the slice is empty or the mean is not positive,
/// where the ratio has no meaning.
#[must_use]
pub(crate) fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let avg = mean(values);
    if avg <= 0.0 {
        return None;
    }
    Some(population_std_dev(values) / avg)
}

/// Round to two decimal places for reported ratios and percentages.
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count-to-float conversion. View, like, and subscriber counts sit well
/// inside f64's 52-bit mantissa, so the cast is lossless in practice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn to_f64(value: u64) -> f64 {
    value as f64
}
