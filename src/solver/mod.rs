//! Residual assembly and the serial solve loop driving it.
//!
//! # Submodules
//!
//! - [`residual`]: the core assembler, `assemble_residual`
//! - [`newton`]: dense finite-difference Newton stand-in for the external
//!   nonlinear solver

pub mod newton;
pub mod residual;

pub use newton::{newton_solve, NewtonConfig, NewtonReport};
pub use residual::assemble_residual;
