//! Binomial coefficients and the alternating binomial sums used by the
//! recurrence.

/// Binomial coefficient C(n, k), or zero if `k > n`.
///
/// Uses the multiplicative formula, which is exact in `f64` as long as the
/// result stays below 2^53.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.;
    }
    let k = k.min(n - k);
    (1..=k).fold(1., |acc, i| acc * (n - k + i) as f64 / i as f64)
}

/// Computes B(s, k) = Σ_{j=0}^{s} (−1)^j C(s, j) C(k + j, j).
///
/// The sum collapses to (−1)^s C(k, s), so it is zero whenever `s > k`.
/// Evaluating the closed form avoids the cancellation the alternating sum
/// suffers for large `s`.
pub fn binomial_product_sum(s: usize, k: usize) -> f64 {
    let magnitude = binomial(k, s);
    if s % 2 == 0 {
        magnitude
    } else {
        -magnitude
    }
}
