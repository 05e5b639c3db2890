//! Multiple-comparison corrections
//!
//! Both functions return adjusted p-values aligned with the input order, with
//! output length equal to input length. Adjusted values never drop below the
//! raw ones and never exceed 1.

/// Bonferroni correction: each p-value times the family size, capped at 1
pub fn bonferroni(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len() as f64;
    p_values.iter().map(|&p| (p * m).min(1.0)).collect()
}

/// Benjamini-Hochberg false discovery rate correction
///
/// Sorts ascending, scales each p-value by `m / rank`, then enforces
/// monotonicity by taking the running minimum from the largest rank down
/// before restoring the input order.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut adjusted = vec![0.0; m];
    let mut running_min = 1.0f64;
    for rank in (0..m).rev() {
        let idx = order[rank];
        let candidate = p_values[idx] * m as f64 / (rank + 1) as f64;
        running_min = running_min.min(candidate);
        adjusted[idx] = running_min;
    }

    adjusted
}
