//! Error types for assembly and solving.

use thiserror::Error;

/// Errors surfaced by residual assembly and the solve loop around it.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The diffusion coefficient must be strictly positive.
    #[error("diffusion coefficient must be positive, got eps = {eps}")]
    InvalidDiffusivity { eps: f64 },

    /// The field's ghost halo is narrower than the limiter stencil needs.
    #[error("ghost halo too narrow: have {have} layer(s), limiter needs {need}")]
    InsufficientHalo { have: usize, need: usize },

    /// The halo exchange could not service the field's partition.
    #[error("halo exchange failed: {0}")]
    HaloExchange(String),

    /// The Newton iteration ran out of budget.
    #[error("no convergence after {max_iters} iterations, residual norm {norm:.3e}")]
    NonConvergence { max_iters: usize, norm: f64 },
}
