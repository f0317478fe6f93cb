//! Spectral solution of linear ODEs with constant coefficients.
//!
//! Solves y^(r)(x) + a_{r−1} y^(r−1)(x) + … + a_0 y(x) = h(x) on [0, ∞)
//! given y^(k)(0) for k < r. The solution is expanded in the
//! Laguerre–Sobolev basis of order r; the first r expansion coefficients are
//! the initial conditions, and the rest follow from a causal recurrence
//! driven by the Laguerre coefficients of h.
//!
//! ```
//! use laguerre_ode::OdeSolver;
//! use ndarray::array;
//!
//! // y'' + y' + y = h with h chosen so that y(t) = e^(t/4).
//! let solver = OdeSolver::exponential(0.25, array![1., 1.]).unwrap();
//! let approx = solver.approx_solution(30);
//! assert!((approx.eval(2.) - solver.exact_solution(2.)).abs() < 1e-8);
//! ```

pub mod binomial;
pub mod laguerre;
pub mod quadrature;
pub mod rhs;
pub mod solver;

pub use crate::rhs::{ExponentialRhs, QuadratureRhs};
pub use crate::solver::{ApproxSolution, CreateSolverError, OdeSolver};

/// Source of H(s), the s-th Laguerre spectral coefficient of the right-hand
/// side, ∫_0^∞ e^(−x) h(x) L_s(x) dx.
///
/// Implementations must be pure functions of `s`.
pub trait RhsCoefficients {
    fn coefficient(&self, s: usize) -> f64;
}

impl<F> RhsCoefficients for F
where
    F: Fn(usize) -> f64,
{
    fn coefficient(&self, s: usize) -> f64 {
        self(s)
    }
}
