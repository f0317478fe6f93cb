use approx::assert_abs_diff_eq;
use ndarray::prelude::*;
use ndarray::{array, s};

use laguerre_ode::laguerre::{laguerre, laguerre_sobolev};
use laguerre_ode::quadrature::GaussLaguerre;
use laguerre_ode::{CreateSolverError, OdeSolver, QuadratureRhs};

fn factorial(n: usize) -> f64 {
    (2..=n).fold(1., |acc, i| acc * i as f64)
}

fn creation_error<H>(result: Result<OdeSolver<H>, CreateSolverError>) -> CreateSolverError {
    match result {
        Err(err) => err,
        Ok(_) => panic!("solver construction unexpectedly succeeded"),
    }
}

fn identity_solver(coeffs: Array1<f64>) -> OdeSolver<QuadratureRhs<fn(f64) -> f64>> {
    let initial = coeffs.clone();
    OdeSolver::with_right_hand_side((|x: f64| x) as fn(f64) -> f64, initial, coeffs).unwrap()
}

#[test]
fn unequal_lengths_are_rejected() {
    let pairs = [(1, 0), (0, 1), (2, 3), (3, 2), (1, 4)];
    for &(n_coeffs, n_initial) in &pairs {
        let err = creation_error(OdeSolver::new(
            Array1::ones(n_coeffs),
            Array1::zeros(n_initial),
            |_: usize| 0.,
        ));
        assert_eq!(
            err,
            CreateSolverError::UnequalLengths {
                coeffs: n_coeffs,
                initial_conditions: n_initial,
            }
        );
    }
}

#[test]
fn zero_order_is_rejected() {
    let err = creation_error(OdeSolver::new(
        Array1::zeros(0),
        Array1::zeros(0),
        |_: usize| 1.,
    ));
    assert_eq!(err, CreateSolverError::ZeroOrder);
}

#[test]
fn singular_recurrence_is_rejected() {
    let err = creation_error(OdeSolver::new(array![-2., 1.], array![0., 0.], |_: usize| 1.));
    assert_eq!(err, CreateSolverError::SingularRecurrence);

    // Detected through Q(0) itself, the value the recurrence divides by.
    let err = creation_error(OdeSolver::new(
        array![0.1, 0.2, -1.3],
        array![0., 0., 0.],
        |_: usize| 1.,
    ));
    assert_eq!(err, CreateSolverError::SingularRecurrence);
}

#[test]
fn nearly_singular_recurrence_is_accepted() {
    let solver = OdeSolver::new(array![-2. + 1e-9, 1.], array![0., 0.], |_: usize| 1.).unwrap();
    assert!(solver.q(0) + 1. != 0.);
    assert!(solver.coefficients(3)[2].abs() > 1e6);
}

#[test]
fn q_zero_is_coefficient_sum() {
    let solver = identity_solver(array![1., 2., 3.]);
    assert_eq!(solver.q(0), 6.);

    let solver = OdeSolver::new(array![0.5, -4., 2.25, 7.], array![0., 0., 0., 0.], |_: usize| 0.)
        .unwrap();
    assert_abs_diff_eq!(solver.q(0), 5.75, epsilon = 1e-12);
}

#[test]
fn q_vanishes_beyond_order() {
    let solver = identity_solver(array![1., 2., 3.]);
    for nu in 3..20 {
        assert_eq!(solver.q(nu), 0.);
    }
}

#[test]
fn q_is_laguerre_expansion_of_weighting_function() {
    let a = array![1., 2., 3.];
    let r = a.len();
    let weighting = |x: f64| {
        a.iter()
            .enumerate()
            .map(|(k, &a_k)| a_k * x.powi((r - k - 1) as i32) / factorial(r - k - 1))
            .sum::<f64>()
    };
    let solver = identity_solver(a.clone());
    let q: Vec<f64> = (0..r).map(|nu| solver.q(nu)).collect();
    let expansion = |x: f64| {
        q.iter()
            .enumerate()
            .map(|(k, &q_k)| q_k * laguerre(k, x))
            .sum::<f64>()
    };

    let mut t = 0.;
    while t < 100. {
        assert_abs_diff_eq!(weighting(t), expansion(t), epsilon = 1e-4);
        t += 0.1;
    }
}

#[test]
fn leading_coefficients_are_initial_conditions() {
    let initial = array![0.3, -1.2, 4.];
    let solver = OdeSolver::new(array![1., 0.5, 2.], initial.clone(), |s: usize| {
        1. / (s + 1) as f64
    })
    .unwrap();
    for n in 0..10 {
        let coeffs = solver.coefficients(n);
        assert_eq!(coeffs.len(), n);
        let fixed = n.min(3);
        assert_eq!(coeffs.slice(s![..fixed]), initial.slice(s![..fixed]));
    }
}

#[test]
fn coefficients_are_idempotent() {
    let solver = OdeSolver::new(array![2., -0.5], array![1., 1.], |s: usize| {
        0.5f64.powi(s as i32)
    })
    .unwrap();
    assert_eq!(solver.coefficients(12), solver.coefficients(12));
    // A longer run reproduces the shorter one as a prefix.
    let long = solver.coefficients(20);
    assert_eq!(long.slice(s![..12]), solver.coefficients(12));
}

#[test]
fn empty_truncation() {
    let solver = identity_solver(array![1.]);
    assert_eq!(solver.coefficients(0).len(), 0);
    assert_eq!(solver.approx_solution(0).eval(3.), 0.);
}

#[test]
fn approx_solution_matches_basis_sum() {
    let solver = OdeSolver::new(array![1., 0.5, 2.], array![0.3, -1.2, 4.], |s: usize| {
        (-0.5f64).powi(s as i32)
    })
    .unwrap();
    let approx = solver.approx_solution(12);
    let coeffs = approx.coefficients().to_owned();
    for &x in &[0., 0.25, 1., 3.5, 8.] {
        let direct: f64 = coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| c * laguerre_sobolev(3, k)(x))
            .sum();
        assert_abs_diff_eq!(approx.eval(x), direct, epsilon = 1e-9 * direct.abs().max(1.));
    }
}

#[test]
fn approx_solution_satisfies_initial_conditions() {
    let solver = OdeSolver::new(array![1., 1.], array![2., -3.], |s: usize| {
        0.2f64.powi(s as i32)
    })
    .unwrap();
    let f = solver.approx_solution(15).into_fn();
    let h = 1e-5;
    assert_abs_diff_eq!(f(0.), 2., epsilon = 1e-12);
    assert_abs_diff_eq!((f(h) - f(0.)) / h, -3., epsilon = 1e-3);
}

#[test]
fn sample_grid() {
    let solver = OdeSolver::exponential(0.25, array![1., 1.]).unwrap();
    let approx = solver.approx_solution(25);
    let (xs, ys) = approx.sample(0., 10., 1000);
    assert_eq!(xs.len(), 1000);
    assert_eq!(ys.len(), 1000);
    assert_eq!(xs[0], 0.);
    assert_abs_diff_eq!(xs[999], 10., epsilon = 1e-12);
    assert_eq!(ys[0], 1.);
    assert_eq!(ys[500], approx.eval(xs[500]));
}

#[test]
fn numeric_rhs_solves_exponential_problem() {
    // y'' + y' + y = (21/16) e^(x/4), y(0) = 1, y'(0) = 1/4.
    let rhs = QuadratureRhs::with_rule(
        |x: f64| 21. / 16. * (x / 4.).exp(),
        GaussLaguerre::default_rule(),
    );
    let solver = OdeSolver::new(array![1., 1.], array![1., 0.25], rhs).unwrap();
    let coeffs = solver.coefficients(4);
    let expected = [1., 0.25, 1. / 12., -1. / 36.];
    for (&got, &want) in coeffs.iter().zip(&expected) {
        assert_abs_diff_eq!(got, want, epsilon = 1e-8);
    }
    let approx = solver.approx_solution(25);
    for &t in &[0., 1., 4., 9.] {
        assert_abs_diff_eq!(approx.eval(t), (t / 4.).exp(), epsilon = 1e-5);
    }
}

#[test]
fn default_quadrature_rhs_is_approximate() {
    let solver = OdeSolver::with_right_hand_side(
        |x: f64| 21. / 16. * (x / 4.).exp(),
        array![1., 0.25],
        array![1., 1.],
    )
    .unwrap();
    let coeffs = solver.coefficients(3);
    assert_eq!(coeffs[0], 1.);
    assert_eq!(coeffs[1], 0.25);
    assert_abs_diff_eq!(coeffs[2], 1. / 12., epsilon = 1e-3);
}
