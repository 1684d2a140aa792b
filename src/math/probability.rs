/// Shannon entropy of a weighted distribution from its running sums
///
/// With `W = Σ wᵢ` and `L = Σ wᵢ ln wᵢ`, the entropy of the normalized
/// distribution is `ln W - L / W`. Keeping the two sums lets the wave update
/// entropy in O(1) per ban.
pub fn entropy_from_sums(sum_of_weights: f64, sum_of_weight_log_weights: f64) -> f64 {
    sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights
}

/// `w ln w`, the per-weight term of [`entropy_from_sums`]
pub fn weight_log_weight(weight: f64) -> f64 {
    if weight > 0.0 { weight * weight.ln() } else { 0.0 }
}

/// Cumulative-distribution draw against a uniform value in `[0, 1)`
///
/// Weights are normalized by their sum; returns the first index whose
/// cumulative probability reaches `random_value`. Falls back to the last
/// index when rounding leaves the cumulative sum just short of the draw, and
/// to 0 when every weight is zero.
pub fn weighted_index(weights: &[f64], random_value: f64) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let mut cumulative = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += weight / total;
        if random_value <= cumulative {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}
