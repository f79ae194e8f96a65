//! Newton solve loop built on the residual assembler.
//!
//! The production setting delegates the nonlinear solve to an external
//! Newton-Krylov library that calls [`assemble_residual`] repeatedly. This
//! module is the serial stand-in for that collaborator: a dense Newton
//! iteration with a finite-difference Jacobian, factored with faer's LU.
//! It is meant for the grid sizes used in verification runs, where the
//! dense n × n Jacobian is affordable. With the limiter disabled or
//! centered the layer problem is linear and Newton converges immediately.

use faer::{linalg::solvers::Solve, Mat};
use tracing::{debug, info};

use super::residual::assemble_residual;
use crate::analysis::l2h_norm;
use crate::error::AssemblyError;
use crate::grid::{Field3, GridGeometry, HaloExchange};
use crate::problem::ProblemSpec;

/// Newton iteration controls.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Converged when the grid-scaled residual norm drops below this.
    pub tol: f64,
    /// Iteration budget.
    pub max_iters: usize,
    /// Relative finite-difference step for the Jacobian columns.
    pub fd_step: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iters: 50,
            fd_step: 1e-7,
        }
    }
}

/// Outcome of a converged Newton solve.
#[derive(Clone, Copy, Debug)]
pub struct NewtonReport {
    /// Newton steps taken before convergence.
    pub iterations: usize,
    /// Final grid-scaled residual norm.
    pub residual_norm: f64,
}

/// Solve F(u) = 0 in place, starting from the current content of `u`.
///
/// `u` must own the whole grid (the dense Jacobian spans every unknown) and
/// carry a halo wide enough for the limiter; `exchange` is invoked before
/// every residual evaluation, including the perturbed ones.
pub fn newton_solve(
    geom: &GridGeometry,
    spec: &ProblemSpec<'_>,
    exchange: &dyn HaloExchange,
    u: &mut Field3,
    config: &NewtonConfig,
) -> Result<NewtonReport, AssemblyError> {
    spec.validate()?;
    let part = u.partition();
    let cells: Vec<(isize, isize, isize)> = part.iter().collect();
    let n = cells.len();

    let mut residual = Field3::new(&part, 0);
    let mut perturbed_residual = Field3::new(&part, 0);
    let mut norm = f64::INFINITY;

    for iter in 0..=config.max_iters {
        exchange.exchange(u)?;
        assemble_residual(geom, u, spec, &mut residual)?;
        norm = l2h_norm(geom, &residual);
        info!(iter, norm, "Newton residual");
        if norm <= config.tol {
            return Ok(NewtonReport {
                iterations: iter,
                residual_norm: norm,
            });
        }
        if iter == config.max_iters {
            break;
        }

        // Column-by-column finite-difference Jacobian.
        debug!(unknowns = n, "assembling FD Jacobian");
        let mut jac = Mat::<f64>::zeros(n, n);
        let mut rhs = Mat::<f64>::zeros(n, 1);
        for (row, &(i, j, k)) in cells.iter().enumerate() {
            rhs[(row, 0)] = -residual.get(i, j, k);
        }
        for (col, &(ci, cj, ck)) in cells.iter().enumerate() {
            let base = u.get(ci, cj, ck);
            let delta = config.fd_step * (1.0 + base.abs());
            let mut perturbed = u.clone();
            perturbed.set(ci, cj, ck, base + delta);
            exchange.exchange(&mut perturbed)?;
            assemble_residual(geom, &perturbed, spec, &mut perturbed_residual)?;
            for (row, &(i, j, k)) in cells.iter().enumerate() {
                jac[(row, col)] = (perturbed_residual.get(i, j, k) - residual.get(i, j, k)) / delta;
            }
        }

        let lu = jac.as_ref().partial_piv_lu();
        let step = lu.solve(&rhs);
        for (row, &(i, j, k)) in cells.iter().enumerate() {
            u.set(i, j, k, u.get(i, j, k) + step[(row, 0)]);
        }
    }

    Err(AssemblyError::NonConvergence {
        max_iters: config.max_iters,
        norm,
    })
}
