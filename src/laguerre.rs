//! Laguerre polynomials and the Laguerre–Sobolev basis.

/// Evaluates the classical Laguerre polynomial L_n(x).
///
/// Uses the three-term recurrence
/// (k + 1) L_{k+1}(x) = (2k + 1 − x) L_k(x) − k L_{k−1}(x).
pub fn laguerre(n: usize, x: f64) -> f64 {
    generalized_laguerre(n, 0., x)
}

/// Evaluates the generalized Laguerre polynomial L_n^{(α)}(x).
///
/// (k + 1) L_{k+1} = (2k + 1 + α − x) L_k − (k + α) L_{k−1}
pub fn generalized_laguerre(n: usize, alpha: f64, x: f64) -> f64 {
    if n == 0 {
        return 1.;
    }
    let mut prev = 1.;
    let mut curr = 1. + alpha - x;
    for k in 1..n {
        let k = k as f64;
        let next = ((2. * k + 1. + alpha - x) * curr - (k + alpha) * prev) / (k + 1.);
        prev = curr;
        curr = next;
    }
    curr
}

/// Laguerre–Sobolev basis function l_{r,i} of order `r` and index `i`.
///
/// For `i < r` this is the monomial x^i / i!. For `i = r + k` it is the
/// r-fold integral from 0 of L_k, which equals
/// x^r · k! / (k + r)! · L_k^{(r)}(x).
///
/// Consequently the derivatives of order below `r` of every function with
/// index ≥ `r` vanish at the origin, and its r-th derivative is L_k.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaguerreSobolev {
    order: usize,
    index: usize,
}

impl LaguerreSobolev {
    pub fn new(order: usize, index: usize) -> LaguerreSobolev {
        LaguerreSobolev { order, index }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn eval(&self, x: f64) -> f64 {
        let r = self.order;
        if self.index < r {
            let i = self.index;
            return (1..=i).fold(1., |acc, j| acc * x / j as f64);
        }
        let k = self.index - r;
        // x^r k! / (k + r)!, accumulated as a product to stay in range.
        let scale = (1..=r).fold(1., |acc, j| acc * x / (k + j) as f64);
        scale * generalized_laguerre(k, r as f64, x)
    }
}

/// Returns l_{r,i} as a closure.
pub fn laguerre_sobolev(order: usize, index: usize) -> impl Fn(f64) -> f64 {
    let basis = LaguerreSobolev::new(order, index);
    move |x| basis.eval(x)
}
