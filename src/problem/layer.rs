//! Manufactured boundary-layer problem.
//!
//! A partly-manufactured exact solution with an exponential layer of width
//! eps near x = 1:
//!
//! u(x,y,z) = U(x) sin(E(y+1)) sin(F(z+1)),  U(x) = (e^{(x-1)/eps} - C)/(1 - C)
//!
//! with C = e^{-2/eps}, E = 2π, F = π/2. U satisfies -eps U'' + U' = 0 with
//! U(-1) = 0 and U(1) = 1. The y factor is periodic on the length-2 domain
//! and the z factor vanishes at z = ±1, matching the canonical boundary
//! policy. The corresponding wind is purely axial, a = (1, 0, 0), the source
//! is g = eps (E² + F²) u, and the trace is b(y,z) = u(1,y,z).

use std::f64::consts::PI;

use super::{BoundaryTrace, ProblemSpec, SourceTerm, Wind};
use crate::grid::{Axis, Field3, GridGeometry};
use crate::limiter::FluxLimiter;

const E: f64 = 2.0 * PI;
const F: f64 = PI / 2.0;

/// Exact solution u(x, y, z).
pub fn exact(x: f64, y: f64, z: f64, eps: f64) -> f64 {
    // C may gracefully underflow to 0 for small eps; that is expected.
    let c = (-2.0 / eps).exp();
    let ux = (((x - 1.0) / eps).exp() - c) / (1.0 - c);
    ux * (E * (y + 1.0)).sin() * (F * (z + 1.0)).sin()
}

/// Axial unit wind a = (1, 0, 0).
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerWind;

impl Wind for LayerWind {
    fn component(&self, _x: f64, _y: f64, _z: f64, axis: Axis) -> f64 {
        if axis == Axis::X {
            1.0
        } else {
            0.0
        }
    }
}

/// Source g = eps (E² + F²) u_exact; independent of the iterate u, which
/// keeps the layer problem linear.
#[derive(Clone, Copy, Debug)]
pub struct LayerSource {
    eps: f64,
}

impl LayerSource {
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }
}

impl SourceTerm for LayerSource {
    fn eval(&self, x: f64, y: f64, z: f64, _u: f64) -> f64 {
        let lam = self.eps * (E * E + F * F);
        lam * exact(x, y, z, self.eps)
    }
}

/// Boundary trace b(y, z) = u(1, y, z) = sin(E(y+1)) sin(F(z+1)).
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerTrace;

impl BoundaryTrace for LayerTrace {
    fn eval(&self, y: f64, z: f64) -> f64 {
        (E * (y + 1.0)).sin() * (F * (z + 1.0)).sin()
    }
}

/// The layer problem's strategy objects, bundled so a [`ProblemSpec`] can
/// borrow them for the lifetime of a solve.
#[derive(Clone, Copy, Debug)]
pub struct LayerProblem {
    pub eps: f64,
    wind: LayerWind,
    source: LayerSource,
    trace: LayerTrace,
}

impl LayerProblem {
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            wind: LayerWind,
            source: LayerSource::new(eps),
            trace: LayerTrace,
        }
    }

    /// Problem spec with the given limiter.
    pub fn spec(&self, limiter: FluxLimiter) -> ProblemSpec<'_> {
        ProblemSpec::new(self.eps, limiter, &self.wind, &self.source, &self.trace)
    }

    /// Fill every owned cell of `field` with the exact solution.
    pub fn fill_exact(&self, geom: &GridGeometry, field: &mut Field3) {
        let eps = self.eps;
        field.fill_with(|i, j, k| {
            exact(
                geom.coord(Axis::X, i),
                geom.coord(Axis::Y, j),
                geom.coord(Axis::Z, k),
                eps,
            )
        });
    }
}
