//! # adr-rs
//!
//! Finite-difference operator assembly for steady advection-diffusion-
//! reaction problems on structured 3D grids:
//!
//! -eps Δu + div(w₀ a(x,y,z) u) = g(x,y,z,u)
//!
//! on [-1,1]³ with mixed Dirichlet/periodic boundaries. The crate's core is
//! the partition-aware residual assembler consumed by external nonlinear
//! solvers; everything around it is the bookkeeping that makes the assembly
//! correct:
//!
//! - Grid geometry, owned index blocks, and ghost-halo fields
//! - Per-axis boundary policy (Dirichlet zero/function, periodic)
//! - Upwind advective fluxes with none/centered/van Leer limiting
//! - Manufactured layer problem and the double-glazing wind for verification
//! - Grid-scaled error norms and convergence-order helpers
//! - A dense Newton stand-in for the external solver, plus a 2D Poisson
//!   variant sharing the discretization ideas

pub mod analysis;
pub mod boundary;
pub mod error;
pub mod grid;
pub mod limiter;
pub mod poisson;
pub mod problem;
pub mod solver;

// Re-export the main types for convenience
pub use analysis::{l2h_error, l2h_norm, linf_norm, observed_orders};
pub use boundary::{BoundaryKind, BoundaryPolicy};
pub use error::AssemblyError;
pub use grid::{Axis, Field3, GridGeometry, HaloExchange, MirrorExchange, Partition, SerialExchange};
pub use limiter::FluxLimiter;
pub use problem::{
    glaze::GlazeProblem, layer::LayerProblem, BoundaryTrace, ProblemSpec, SourceTerm, Wind,
    ZeroSource, ZeroTrace,
};
pub use solver::{assemble_residual, newton_solve, NewtonConfig, NewtonReport};

#[cfg(feature = "parallel")]
pub use analysis::l2h_norm_parallel;
