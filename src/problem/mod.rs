//! Problem definitions: wind, source, boundary trace, parameters.
//!
//! The continuous problem is
//!
//! -eps Δu + div(w₀ a(x,y,z) u) = g(x,y,z,u)
//!
//! on [-1,1]³ with mixed Dirichlet/periodic boundaries. The wind a, source
//! g, and boundary trace b are strategy objects selected once at
//! configuration time and borrowed by the assembler for the whole solve.

pub mod glaze;
pub mod layer;

use crate::error::AssemblyError;
use crate::grid::Axis;
use crate::limiter::FluxLimiter;

/// Wind (advection velocity) field; one component per call.
pub trait Wind {
    fn component(&self, x: f64, y: f64, z: f64, axis: Axis) -> f64;
}

/// Source / reaction term g(x, y, z, u).
pub trait SourceTerm {
    fn eval(&self, x: f64, y: f64, z: f64, u: f64) -> f64;
}

/// Boundary trace b on the high face of the Dirichlet-function axis. The
/// arguments are the coordinates of the two remaining axes, in axis order.
pub trait BoundaryTrace {
    fn eval(&self, c1: f64, c2: f64) -> f64;
}

/// Zero source, the default for problems without reaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroSource;

impl SourceTerm for ZeroSource {
    fn eval(&self, _x: f64, _y: f64, _z: f64, _u: f64) -> f64 {
        0.0
    }
}

/// Homogeneous boundary trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroTrace;

impl BoundaryTrace for ZeroTrace {
    fn eval(&self, _c1: f64, _c2: f64) -> f64 {
        0.0
    }
}

/// Everything the assembler needs to know about the continuous problem.
pub struct ProblemSpec<'a> {
    /// Diffusion coefficient; must be strictly positive.
    pub eps: f64,
    /// Scale w₀ applied to every wind evaluation.
    pub wind_scale: f64,
    /// Selected flux limiter.
    pub limiter: FluxLimiter,
    /// Wind field a(x, y, z, axis).
    pub wind: &'a dyn Wind,
    /// Source term g(x, y, z, u).
    pub source: &'a dyn SourceTerm,
    /// Boundary trace b on the Dirichlet-function face.
    pub trace: &'a dyn BoundaryTrace,
}

impl<'a> ProblemSpec<'a> {
    /// Create a spec with unit wind scale.
    pub fn new(
        eps: f64,
        limiter: FluxLimiter,
        wind: &'a dyn Wind,
        source: &'a dyn SourceTerm,
        trace: &'a dyn BoundaryTrace,
    ) -> Self {
        Self {
            eps,
            wind_scale: 1.0,
            limiter,
            wind,
            source,
            trace,
        }
    }

    /// Override the wind scale w₀.
    pub fn with_wind_scale(mut self, w0: f64) -> Self {
        self.wind_scale = w0;
        self
    }

    /// Reject invalid configurations before any grid computation runs.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        if !(self.eps > 0.0) {
            return Err(AssemblyError::InvalidDiffusivity { eps: self.eps });
        }
        Ok(())
    }

    /// Scaled wind component at a point.
    #[inline]
    pub fn wind_at(&self, x: f64, y: f64, z: f64, axis: Axis) -> f64 {
        self.wind_scale * self.wind.component(x, y, z, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnitWindX;
    impl Wind for UnitWindX {
        fn component(&self, _x: f64, _y: f64, _z: f64, axis: Axis) -> f64 {
            if axis == Axis::X {
                1.0
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_validate_rejects_nonpositive_eps() {
        let wind = UnitWindX;
        for bad in [0.0, -1.0, f64::NAN] {
            let spec = ProblemSpec::new(bad, FluxLimiter::None, &wind, &ZeroSource, &ZeroTrace);
            assert!(matches!(
                spec.validate(),
                Err(AssemblyError::InvalidDiffusivity { .. })
            ));
        }
        let ok = ProblemSpec::new(0.5, FluxLimiter::None, &wind, &ZeroSource, &ZeroTrace);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_wind_scale_multiplies() {
        let wind = UnitWindX;
        let spec = ProblemSpec::new(1.0, FluxLimiter::None, &wind, &ZeroSource, &ZeroTrace)
            .with_wind_scale(2.5);
        assert!((spec.wind_at(0.0, 0.0, 0.0, Axis::X) - 2.5).abs() < 1e-14);
        assert_eq!(spec.wind_at(0.0, 0.0, 0.0, Axis::Y), 0.0);
    }
}
