//! Double-glazing problem.
//!
//! A recirculating wind in the x-z plane (the two Dirichlet axes) driven by
//! a hot wall at x = 1:
//!
//! a = (2z(1-x²), 0, -2x(1-z²)),  g = 0,  b ≡ 1.
//!
//! The wind vanishes on the x and z end faces, so nothing is advected
//! through the Dirichlet boundaries. There is no closed-form solution; the
//! problem exercises the assembler with a genuinely multidirectional wind.

use super::{BoundaryTrace, ProblemSpec, Wind, ZeroSource};
use crate::grid::Axis;
use crate::limiter::FluxLimiter;

/// Recirculating glazing wind.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlazeWind;

impl Wind for GlazeWind {
    fn component(&self, x: f64, _y: f64, z: f64, axis: Axis) -> f64 {
        match axis {
            Axis::X => 2.0 * z * (1.0 - x * x),
            Axis::Y => 0.0,
            Axis::Z => -2.0 * x * (1.0 - z * z),
        }
    }
}

/// Hot-wall trace, b ≡ 1 on the x = 1 face.
#[derive(Clone, Copy, Debug, Default)]
pub struct HotWallTrace;

impl BoundaryTrace for HotWallTrace {
    fn eval(&self, _y: f64, _z: f64) -> f64 {
        1.0
    }
}

/// The glazing problem's strategy objects.
#[derive(Clone, Copy, Debug)]
pub struct GlazeProblem {
    pub eps: f64,
    wind: GlazeWind,
    source: ZeroSource,
    trace: HotWallTrace,
}

impl GlazeProblem {
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            wind: GlazeWind,
            source: ZeroSource,
            trace: HotWallTrace,
        }
    }

    /// Problem spec with the given limiter.
    pub fn spec(&self, limiter: FluxLimiter) -> ProblemSpec<'_> {
        ProblemSpec::new(self.eps, limiter, &self.wind, &self.source, &self.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_vanishes_on_dirichlet_faces() {
        let w = GlazeWind;
        for &t in &[-0.5, 0.0, 0.7] {
            assert_eq!(w.component(1.0, t, t, Axis::X), 0.0);
            assert_eq!(w.component(-1.0, t, t, Axis::X), 0.0);
            assert_eq!(w.component(t, t, 1.0, Axis::Z), 0.0);
            assert_eq!(w.component(t, t, -1.0, Axis::Z), 0.0);
        }
    }

    #[test]
    fn test_wind_is_divergence_free() {
        // ∂x(2z(1-x²)) + ∂z(-2x(1-z²)) = -4xz + 4xz = 0.
        let w = GlazeWind;
        let h = 1e-6;
        let (x, y, z) = (0.3, 0.1, -0.6);
        let dax = (w.component(x + h, y, z, Axis::X) - w.component(x - h, y, z, Axis::X)) / (2.0 * h);
        let daz = (w.component(x, y, z + h, Axis::Z) - w.component(x, y, z - h, Axis::Z)) / (2.0 * h);
        assert!((dax + daz).abs() < 1e-8);
    }
}
