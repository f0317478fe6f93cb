//! Laguerre–Sobolev coefficient recurrence.

use log::{debug, trace};
use ndarray::prelude::*;
use ndarray::s;
use thiserror::Error;

use crate::binomial::binomial_product_sum;
use crate::rhs::{ExponentialRhs, QuadratureRhs};
use crate::RhsCoefficients;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CreateSolverError {
    #[error(
        "initial conditions ({initial_conditions}) and ODE coefficients ({coeffs}) have unequal lengths"
    )]
    UnequalLengths {
        coeffs: usize,
        initial_conditions: usize,
    },
    #[error("ODE order must be at least 1")]
    ZeroOrder,
    /// The coefficients sum to −1, so Q(0) + 1 vanishes and the recurrence
    /// cannot be solved for the next coefficient.
    ///
    /// Only an exact zero is rejected; sums close to −1 are accepted and
    /// yield very large coefficients.
    #[error("ODE coefficients sum to -1; the recurrence is singular")]
    SingularRecurrence,
}

/// Solver for y^(r) + a_{r−1} y^(r−1) + … + a_0 y = h with given
/// y^(k)(0), k < r.
///
/// Immutable once constructed; every query is a pure function of the
/// coefficients, the initial conditions and the H source.
#[derive(Clone, Debug)]
pub struct OdeSolver<H> {
    /// a_0..a_{r−1}.
    coeffs: Array1<f64>,
    /// y(0), y'(0), …, y^(r−1)(0).
    initial_conditions: Array1<f64>,
    rhs: H,
}

impl<H> OdeSolver<H>
where
    H: RhsCoefficients,
{
    /// Creates a new solver.
    ///
    /// # Parameters
    ///
    /// * `coeffs`: `coeffs[i]` is a_i, the coefficient of y^(i). Its length is
    ///   the order r of the equation.
    ///
    /// * `initial_conditions`: `initial_conditions[k]` is y^(k)(0). Must have
    ///   the same length as `coeffs`.
    ///
    /// * `rhs`: Source of the Laguerre coefficients of the right-hand side.
    pub fn new(
        coeffs: Array1<f64>,
        initial_conditions: Array1<f64>,
        rhs: H,
    ) -> Result<OdeSolver<H>, CreateSolverError> {
        if coeffs.len() != initial_conditions.len() {
            return Err(CreateSolverError::UnequalLengths {
                coeffs: coeffs.len(),
                initial_conditions: initial_conditions.len(),
            });
        }
        if coeffs.is_empty() {
            return Err(CreateSolverError::ZeroOrder);
        }
        let solver = OdeSolver {
            coeffs,
            initial_conditions,
            rhs,
        };
        if solver.q(0) + 1. == 0. {
            return Err(CreateSolverError::SingularRecurrence);
        }
        debug!(
            "created order {} solver with rhs {}",
            solver.order(),
            std::any::type_name::<H>()
        );
        Ok(solver)
    }

    /// Order r of the equation.
    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coeffs(&self) -> ArrayView1<'_, f64> {
        self.coeffs.view()
    }

    pub fn initial_conditions(&self) -> ArrayView1<'_, f64> {
        self.initial_conditions.view()
    }

    pub fn rhs(&self) -> &H {
        &self.rhs
    }

    /// Q(ν) = Σ_j a_j Σ_{k=0}^{ν} (−1)^k C(ν, k) C(r + k − j − 1, k).
    ///
    /// These are the Laguerre coefficients of Σ_j a_j x^(r−j−1) / (r−j−1)!,
    /// so Q(ν) = 0 for ν ≥ r and Q(0) is the sum of the coefficients.
    pub fn q(&self, nu: usize) -> f64 {
        let r = self.order();
        self.coeffs
            .iter()
            .enumerate()
            .map(|(j, &a)| a * binomial_product_sum(nu, r - j - 1))
            .sum()
    }

    /// H(s), taken from the right-hand side strategy.
    pub fn h(&self, s: usize) -> f64 {
        self.rhs.coefficient(s)
    }

    /// P(s) = H(s) − S(s); see [`p_correction`](OdeSolver::p_correction).
    pub fn p(&self, s: usize) -> f64 {
        self.h(s) - self.p_correction(s)
    }

    /// S(s) = Σ_{ν<r} a_ν Σ_{k=0}^{r−ν−1} y^(k+ν)(0) B(s, k), where
    /// B(s, k) = Σ_{j=0}^{s} (−1)^j C(s, j) C(k + j, j).
    ///
    /// This is the contribution of the initial conditions to the Laguerre
    /// coefficients of the left-hand side.
    pub fn p_correction(&self, s: usize) -> f64 {
        let r = self.order();
        (0..r)
            .map(|nu| {
                let inner: f64 = (0..r - nu)
                    .map(|k| self.initial_conditions[k + nu] * binomial_product_sum(s, k))
                    .sum();
                self.coeffs[nu] * inner
            })
            .sum()
    }

    /// Computes the first `count` expansion coefficients.
    ///
    /// The first min(r, `count`) entries are the initial conditions. Each
    /// later entry depends on all earlier ones, so they are computed in
    /// increasing order.
    pub fn coefficients(&self, count: usize) -> Array1<f64> {
        let r = self.order();
        let fixed = r.min(count);
        let mut coeffs = Array1::zeros(count);
        coeffs
            .slice_mut(s![..fixed])
            .assign(&self.initial_conditions.slice(s![..fixed]));
        if count <= r {
            return coeffs;
        }

        let q: Vec<f64> = (0..count - r).map(|nu| self.q(nu)).collect();
        let mul = 1. / (q[0] + 1.);
        for k in 0..count - r {
            let mut value = self.p(k);
            for i in 1..=k {
                value -= (q[i] - q[i - 1]) * coeffs[r + k - i];
            }
            coeffs[r + k] = value * mul;
            trace!("coefficient {} = {:e}", r + k, coeffs[r + k]);
        }
        coeffs
    }

    /// Truncated expansion Σ_{k<count} c_k l_{r,k}(x).
    pub fn approx_solution(&self, count: usize) -> ApproxSolution {
        ApproxSolution {
            order: self.order(),
            coeffs: self.coefficients(count),
        }
    }
}

impl<F> OdeSolver<QuadratureRhs<F>>
where
    F: Fn(f64) -> f64,
{
    /// Creates a solver whose H coefficients are integrated numerically from
    /// `right` with the default rectangular rule.
    pub fn with_right_hand_side(
        right: F,
        initial_conditions: Array1<f64>,
        coeffs: Array1<f64>,
    ) -> Result<OdeSolver<QuadratureRhs<F>>, CreateSolverError> {
        OdeSolver::new(coeffs, initial_conditions, QuadratureRhs::new(right))
    }
}

impl OdeSolver<ExponentialRhs> {
    /// Creates a solver for the problem whose exact solution is e^(ct).
    ///
    /// The initial conditions are y^(k)(0) = c^k and the right-hand side is
    /// e^(cx) (c^r + Σ a_i c^i). Requires |c| < 1/2 for the expansion to
    /// converge.
    pub fn exponential(
        rate: f64,
        coeffs: Array1<f64>,
    ) -> Result<OdeSolver<ExponentialRhs>, CreateSolverError> {
        let rhs = ExponentialRhs::new(rate, coeffs.view());
        let initial_conditions = rhs.initial_conditions(coeffs.len());
        OdeSolver::new(coeffs, initial_conditions, rhs)
    }

    /// e^(ct).
    pub fn exact_solution(&self, t: f64) -> f64 {
        self.rhs.exact_solution(t)
    }
}

/// A truncated Laguerre–Sobolev expansion.
#[derive(Clone, Debug, PartialEq)]
pub struct ApproxSolution {
    order: usize,
    coeffs: Array1<f64>,
}

impl ApproxSolution {
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coeffs.view()
    }

    /// Evaluates the expansion at `x` in O(count) operations.
    ///
    /// l_{r,r+k}(x) = x^r k! / (k+r)! L_k^{(r)}(x), and L_k^{(r)} is advanced
    /// by its three-term recurrence alongside the scale factor.
    pub fn eval(&self, x: f64) -> f64 {
        let r = self.order;
        let count = self.coeffs.len();
        let fixed = r.min(count);

        let mut value = 0.;
        let mut monomial = 1.;
        for i in 0..fixed {
            value += self.coeffs[i] * monomial;
            monomial *= x / (i + 1) as f64;
        }
        if count <= r {
            return value;
        }

        let alpha = r as f64;
        let mut scale = (1..=r).fold(1., |acc, j| acc * x / j as f64);
        let mut prev = 0.;
        let mut curr = 1.;
        for k in 0..count - r {
            value += self.coeffs[r + k] * scale * curr;
            let kf = k as f64;
            let next = ((2. * kf + 1. + alpha - x) * curr - (kf + alpha) * prev) / (kf + 1.);
            prev = curr;
            curr = next;
            scale *= (kf + 1.) / (kf + 1. + alpha);
        }
        value
    }

    /// Evaluates the expansion on `points` evenly spaced abscissas from
    /// `start` to `end` inclusive, returning `(x, y)`.
    pub fn sample(&self, start: f64, end: f64, points: usize) -> (Array1<f64>, Array1<f64>) {
        let xs = Array1::linspace(start, end, points);
        let ys = xs.mapv(|x| self.eval(x));
        (xs, ys)
    }

    pub fn into_fn(self) -> impl Fn(f64) -> f64 {
        move |x| self.eval(x)
    }
}
