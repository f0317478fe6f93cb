//! Strategies supplying H(s), the Laguerre spectral coefficients of the
//! right-hand side.

use log::warn;
use ndarray::prelude::*;

use crate::quadrature::{laguerre_coefficient, RectangularRule, WeightedIntegral};
use crate::RhsCoefficients;

/// H(s) = ∫_0^∞ e^(−x) h(x) L_s(x) dx, evaluated numerically.
///
/// With the default [`RectangularRule`] this is only accurate to a few
/// digits: the integral is truncated at the rule's cutoff. Compare results
/// with a tolerance. Use [`GaussLaguerre`](crate::quadrature::GaussLaguerre)
/// for smooth right-hand sides of moderate growth.
#[derive(Clone, Debug)]
pub struct QuadratureRhs<F, Q = RectangularRule> {
    right: F,
    rule: Q,
}

impl<F> QuadratureRhs<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(right: F) -> QuadratureRhs<F> {
        QuadratureRhs::with_rule(right, RectangularRule::default())
    }
}

impl<F, Q> QuadratureRhs<F, Q>
where
    F: Fn(f64) -> f64,
    Q: WeightedIntegral,
{
    pub fn with_rule(right: F, rule: Q) -> QuadratureRhs<F, Q> {
        QuadratureRhs { right, rule }
    }

    pub fn rule(&self) -> &Q {
        &self.rule
    }

    /// Evaluates h(x).
    pub fn right(&self, x: f64) -> f64 {
        (self.right)(x)
    }
}

impl<F, Q> RhsCoefficients for QuadratureRhs<F, Q>
where
    F: Fn(f64) -> f64,
    Q: WeightedIntegral,
{
    fn coefficient(&self, s: usize) -> f64 {
        laguerre_coefficient(&self.right, s, &self.rule)
    }
}

/// Closed-form H(s) for the right-hand side h(x) = e^(cx) (c^r + Σ a_i c^i),
/// whose solution with initial conditions y^(k)(0) = c^k is y(t) = e^(ct).
///
/// The Laguerre expansion of e^(cx) only converges for |c| < 1/2. Other
/// rates are accepted but the resulting approximation diverges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialRhs {
    rate: f64,
    right_coeff: f64,
}

impl ExponentialRhs {
    pub fn new(rate: f64, coeffs: ArrayView1<'_, f64>) -> ExponentialRhs {
        if !(rate.abs() < 0.5) {
            warn!(
                "exponential rate {} is outside |c| < 1/2; the expansion will not converge",
                rate
            );
        }
        let r = coeffs.len() as i32;
        let right_coeff = coeffs
            .iter()
            .enumerate()
            .fold(rate.powi(r), |acc, (i, &a)| acc + a * rate.powi(i as i32));
        ExponentialRhs { rate, right_coeff }
    }

    /// The exponent c.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// c^r + a_{r−1} c^{r−1} + … + a_0, the factor with h(x) = e^(cx) · factor.
    pub fn right_coeff(&self) -> f64 {
        self.right_coeff
    }

    /// Initial conditions y^(k)(0) = c^k, k = 0..order.
    pub fn initial_conditions(&self, order: usize) -> Array1<f64> {
        (0..order).map(|k| self.rate.powi(k as i32)).collect()
    }

    /// h(x).
    pub fn right(&self, x: f64) -> f64 {
        (self.rate * x).exp() * self.right_coeff
    }

    /// e^(ct).
    pub fn exact_solution(&self, t: f64) -> f64 {
        (self.rate * t).exp()
    }
}

impl RhsCoefficients for ExponentialRhs {
    fn coefficient(&self, s: usize) -> f64 {
        let c = self.rate;
        if s == 0 {
            return self.right_coeff / (1. - c);
        }
        self.right_coeff * (c / (c - 1.)).powi(s as i32) / (1. - c)
    }
}
