//! Flux limiters for the advective terms.
//!
//! A limiter blends a second-order correction into the first-order upwind
//! flux. Given the smoothness ratio θ = (u_up - u_far)/(u_dn - u_up), the
//! blend weight w(θ) scales the correction a·w(θ)·(u_dn - u_up). The closed
//! set of variants is resolved once at configuration time; there is no
//! file-scope lookup table.

/// Flux-limiter variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FluxLimiter {
    /// No limiting: plain first-order upwind flux. The correction term is
    /// skipped entirely, not applied with weight zero.
    None,
    /// Unconditional centered second-order correction, w(θ) = 1/2.
    #[default]
    Centered,
    /// Van Leer limiter, w(θ) = (θ + |θ|) / (2(1 + |θ|)).
    VanLeer,
}

impl FluxLimiter {
    /// All variants, in option order.
    pub const ALL: [FluxLimiter; 3] = [FluxLimiter::None, FluxLimiter::Centered, FluxLimiter::VanLeer];

    /// Look up a variant by its option name.
    pub fn from_name(name: &str) -> Option<FluxLimiter> {
        match name {
            "none" => Some(FluxLimiter::None),
            "centered" => Some(FluxLimiter::Centered),
            "vanleer" => Some(FluxLimiter::VanLeer),
            _ => None,
        }
    }

    /// Option name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            FluxLimiter::None => "none",
            FluxLimiter::Centered => "centered",
            FluxLimiter::VanLeer => "vanleer",
        }
    }

    /// Whether the correction term is applied at all.
    pub fn is_active(self) -> bool {
        !matches!(self, FluxLimiter::None)
    }

    /// Whether the blend weight actually depends on θ. Callers may skip the
    /// far-upwind lookup when it does not.
    pub fn uses_ratio(self) -> bool {
        matches!(self, FluxLimiter::VanLeer)
    }

    /// Ghost-halo width the limiter's stencil needs: 2 for van Leer (second
    /// upwind neighbor), otherwise 1.
    pub fn required_ghost(self) -> usize {
        if self.uses_ratio() {
            2
        } else {
            1
        }
    }

    /// Blend weight w(θ).
    ///
    /// The van Leer formula is safe for any finite θ: the denominator
    /// 1 + |θ| is at least one. Callers guard the θ computation itself
    /// (u_dn == u_up skips the correction), so no division error can occur.
    pub fn blend(self, theta: f64) -> f64 {
        match self {
            FluxLimiter::None => 0.0,
            FluxLimiter::Centered => 0.5,
            FluxLimiter::VanLeer => 0.5 * (theta + theta.abs()) / (1.0 + theta.abs()),
        }
    }
}
