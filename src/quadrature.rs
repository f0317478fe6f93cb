//! Approximations of the Laguerre-weighted integral ∫_0^∞ e^(−x) f(x) dx.

use lazy_static::lazy_static;
use ndarray::prelude::*;
use thiserror::Error;

use crate::laguerre::laguerre;

/// Number of subdivisions of the default rectangular rule.
pub const DEFAULT_STEPS: usize = 100_000;
/// Upper integration limit of the default rectangular rule.
pub const DEFAULT_CUTOFF: f64 = 10.;
/// Number of nodes of the shared Gauss–Laguerre rule.
pub const DEFAULT_GAUSS_NODES: usize = 32;

/// Newton iterations allowed per Gauss–Laguerre node.
const MAX_NEWTON_ITER: usize = 100;

/// Approximates ∫_0^∞ e^(−x) f(x) dx.
pub trait WeightedIntegral {
    fn integrate(&self, f: &dyn Fn(f64) -> f64) -> f64;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CreateQuadratureError {
    #[error("number of steps must be positive")]
    ZeroSteps,
    #[error("cutoff must be finite and positive (got {0})")]
    InvalidCutoff(f64),
    #[error("number of nodes must be positive")]
    ZeroNodes,
}

/// Midpoint rule for e^(−x) f(x) on the truncated interval [0, cutoff].
///
/// The tail beyond `cutoff` is dropped, so the result carries an error of
/// roughly ∫_cutoff^∞ e^(−x) |f(x)| dx on top of the discretization error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangularRule {
    steps: usize,
    cutoff: f64,
}

impl RectangularRule {
    pub fn new(steps: usize, cutoff: f64) -> Result<RectangularRule, CreateQuadratureError> {
        if steps == 0 {
            return Err(CreateQuadratureError::ZeroSteps);
        }
        if !cutoff.is_finite() || cutoff <= 0. {
            return Err(CreateQuadratureError::InvalidCutoff(cutoff));
        }
        Ok(RectangularRule { steps, cutoff })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl Default for RectangularRule {
    fn default() -> RectangularRule {
        RectangularRule {
            steps: DEFAULT_STEPS,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl WeightedIntegral for RectangularRule {
    fn integrate(&self, f: &dyn Fn(f64) -> f64) -> f64 {
        let h = self.cutoff / self.steps as f64;
        (0..self.steps)
            .map(|i| {
                let x = (i as f64 + 0.5) * h;
                (-x).exp() * f(x)
            })
            .sum::<f64>()
            * h
    }
}

/// Gauss–Laguerre rule: exact for f polynomial of degree < 2n.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussLaguerre {
    nodes: Array1<f64>,
    weights: Array1<f64>,
}

lazy_static! {
    static ref DEFAULT_RULE: GaussLaguerre = GaussLaguerre::build(DEFAULT_GAUSS_NODES);
}

impl GaussLaguerre {
    /// Computes the `n`-point rule.
    pub fn new(n: usize) -> Result<GaussLaguerre, CreateQuadratureError> {
        if n == 0 {
            return Err(CreateQuadratureError::ZeroNodes);
        }
        Ok(GaussLaguerre::build(n))
    }

    /// Shared 32-point rule, computed on first use.
    pub fn default_rule() -> &'static GaussLaguerre {
        &*DEFAULT_RULE
    }

    pub fn nodes(&self) -> ArrayView1<'_, f64> {
        self.nodes.view()
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Finds the roots of L_n by Newton iteration.
    ///
    /// Initial guesses follow the asymptotic estimates in (ref 1); each weight
    /// is 1 / (x L_n'(x)²), with L_n' taken from n L_n' = x⁻¹ n (L_n − L_{n−1}).
    ///
    /// # References
    ///
    /// 1. W. H. Press et al., "Numerical Recipes", Sec. 4.5.
    fn build(n: usize) -> GaussLaguerre {
        let nf = n as f64;
        let mut nodes = Array1::<f64>::zeros(n);
        let mut weights = Array1::<f64>::zeros(n);
        let mut z = 0.;
        for i in 0..n {
            z = match i {
                0 => 3. / (1. + 2.4 * nf),
                1 => z + 15. / (1. + 2.5 * nf),
                _ => {
                    let ai = (i - 1) as f64;
                    z + (1. + 2.55 * ai) / (1.9 * ai) * (z - nodes[i - 2])
                }
            };
            let mut deriv = 1.;
            for _ in 0..MAX_NEWTON_ITER {
                let (p, p_prev) = laguerre_pair(n, z);
                deriv = nf * (p - p_prev) / z;
                let z_old = z;
                z -= p / deriv;
                if (z - z_old).abs() <= 1e-14 * z.abs().max(1.) {
                    break;
                }
            }
            nodes[i] = z;
            weights[i] = 1. / (z * deriv * deriv);
        }
        GaussLaguerre { nodes, weights }
    }
}

/// Returns (L_n(x), L_{n−1}(x)), n ≥ 1.
fn laguerre_pair(n: usize, x: f64) -> (f64, f64) {
    let mut prev = 1.;
    let mut curr = 1. - x;
    for k in 1..n {
        let k = k as f64;
        let next = ((2. * k + 1. - x) * curr - k * prev) / (k + 1.);
        prev = curr;
        curr = next;
    }
    (curr, prev)
}

impl WeightedIntegral for GaussLaguerre {
    fn integrate(&self, f: &dyn Fn(f64) -> f64) -> f64 {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }
}

impl<'a, Q: WeightedIntegral + ?Sized> WeightedIntegral for &'a Q {
    fn integrate(&self, f: &dyn Fn(f64) -> f64) -> f64 {
        (**self).integrate(f)
    }
}

/// Lebesgue–Laguerre inner product ∫_0^∞ e^(−x) f(x) g(x) dx.
pub fn lebesgue_laguerre<F, G, Q>(f: F, g: G, rule: &Q) -> f64
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
    Q: WeightedIntegral + ?Sized,
{
    rule.integrate(&|x| f(x) * g(x))
}

/// Laguerre spectral coefficient ∫_0^∞ e^(−x) f(x) L_s(x) dx.
pub fn laguerre_coefficient<F, Q>(f: F, s: usize, rule: &Q) -> f64
where
    F: Fn(f64) -> f64,
    Q: WeightedIntegral + ?Sized,
{
    lebesgue_laguerre(f, |x| laguerre(s, x), rule)
}
