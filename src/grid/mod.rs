//! Structured-grid geometry.
//!
//! The domain is the cube [-1, 1]³ covered by a regular grid of `mx × my × mz`
//! cells. Spacing depends on each axis's boundary kind:
//!
//! - non-periodic axes are vertex-centered: `h = L/(m-1)`, `x_i = -1 + i·h`,
//!   so the end faces carry grid points;
//! - periodic axes are cell-centered with no duplicated endpoint:
//!   `h = L/m`, `x_i = -1 + (i + 1/2)·h`.

mod field;
mod partition;

pub use field::Field3;
pub use partition::{HaloExchange, MirrorExchange, Partition, SerialExchange};

use crate::boundary::BoundaryPolicy;

/// Low end of the computational domain along every axis.
pub const DOMAIN_LO: f64 = -1.0;
/// High end of the computational domain along every axis.
pub const DOMAIN_HI: f64 = 1.0;

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes, in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Positional index of the axis (x = 0, y = 1, z = 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit index offset along this axis.
    #[inline]
    pub fn offset(self) -> (isize, isize, isize) {
        match self {
            Axis::X => (1, 0, 0),
            Axis::Y => (0, 1, 0),
            Axis::Z => (0, 0, 1),
        }
    }
}

/// Global grid geometry: extents, boundary policy, spacing, coordinates.
#[derive(Clone, Copy, Debug)]
pub struct GridGeometry {
    extents: [usize; 3],
    policy: BoundaryPolicy,
}

impl GridGeometry {
    /// Create a grid of `mx × my × mz` cells under the given boundary policy.
    ///
    /// # Panics
    ///
    /// Panics if any extent is below 3; the diffusion stencil needs at least
    /// one interior cell per axis.
    pub fn new(mx: usize, my: usize, mz: usize, policy: BoundaryPolicy) -> Self {
        assert!(
            mx >= 3 && my >= 3 && mz >= 3,
            "grid extents must be at least 3, got {}x{}x{}",
            mx,
            my,
            mz
        );
        Self {
            extents: [mx, my, mz],
            policy,
        }
    }

    /// Number of cells along one axis.
    #[inline]
    pub fn extent(&self, axis: Axis) -> usize {
        self.extents[axis.index()]
    }

    /// Total number of grid cells.
    pub fn cells(&self) -> usize {
        self.extents.iter().product()
    }

    /// The boundary policy the grid was built with.
    pub fn policy(&self) -> &BoundaryPolicy {
        &self.policy
    }

    /// Grid spacing along one axis. Periodic axes divide the domain length
    /// by the extent (no duplicated endpoint); non-periodic axes place grid
    /// points on both end faces.
    pub fn spacing(&self, axis: Axis) -> f64 {
        let len = DOMAIN_HI - DOMAIN_LO;
        let m = self.extent(axis) as f64;
        if self.policy.is_periodic(axis) {
            len / m
        } else {
            len / (m - 1.0)
        }
    }

    /// Physical coordinate of grid index `i` along one axis. Signed indices
    /// extrapolate past the owned range, which is what ghost cells need.
    pub fn coord(&self, axis: Axis, i: isize) -> f64 {
        let h = self.spacing(axis);
        if self.policy.is_periodic(axis) {
            DOMAIN_LO + (i as f64 + 0.5) * h
        } else {
            DOMAIN_LO + i as f64 * h
        }
    }
}
