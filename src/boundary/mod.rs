//! Boundary-condition bookkeeping.
//!
//! Each grid axis carries exactly one [`BoundaryKind`]. The assembler asks
//! the [`BoundaryPolicy`] which cells are pinned by a Dirichlet constraint
//! and what value the constraint imposes; periodic axes never take part in
//! any Dirichlet override and instead wrap through the ghost halo.

use crate::grid::Axis;

/// Boundary classification of one grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// u = 0 on both end faces of the axis.
    DirichletZero,
    /// u = 0 on the low face, u = b(·) on the high face, where b is the
    /// problem's boundary trace function.
    DirichletFunction,
    /// Wrap-around connectivity; no end faces, no duplicated endpoint.
    Periodic,
}

impl BoundaryKind {
    /// Whether the axis wraps around.
    pub fn is_periodic(self) -> bool {
        matches!(self, BoundaryKind::Periodic)
    }
}

/// Per-axis boundary classification for the whole grid.
///
/// The canonical convention of the boundary-layer problem (see
/// [`crate::problem::layer`]) is x: [`BoundaryKind::DirichletFunction`],
/// y: [`BoundaryKind::Periodic`], z: [`BoundaryKind::DirichletZero`]. The
/// exact solution fixes this choice: sin(2π(y+1)) is periodic in y while
/// sin(π(z+1)/2) vanishes at z = ±1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryPolicy {
    kinds: [BoundaryKind; 3],
}

impl BoundaryPolicy {
    /// Build a policy from per-axis kinds.
    pub fn new(x: BoundaryKind, y: BoundaryKind, z: BoundaryKind) -> Self {
        Self { kinds: [x, y, z] }
    }

    /// The canonical Dirichlet-x / periodic-y / Dirichlet-zero-z policy.
    pub fn dirichlet_x_periodic_y() -> Self {
        Self::new(
            BoundaryKind::DirichletFunction,
            BoundaryKind::Periodic,
            BoundaryKind::DirichletZero,
        )
    }

    /// Boundary kind of one axis.
    pub fn kind(&self, axis: Axis) -> BoundaryKind {
        self.kinds[axis.index()]
    }

    /// Whether the axis wraps around.
    pub fn is_periodic(&self, axis: Axis) -> bool {
        self.kind(axis).is_periodic()
    }

    /// Whether a cell at `index` along `axis` sits on a Dirichlet end face,
    /// so its residual is overridden by the constraint.
    pub fn pins(&self, axis: Axis, index: isize, extent: usize) -> bool {
        !self.is_periodic(axis) && (index == 0 || index == extent as isize - 1)
    }

    /// Whether a cell at `index` along `axis` sits on the high face of the
    /// axis carrying the boundary trace function.
    pub fn takes_trace(&self, axis: Axis, index: isize, extent: usize) -> bool {
        self.kind(axis) == BoundaryKind::DirichletFunction && index == extent as isize - 1
    }
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self::dirichlet_x_periodic_y()
    }
}
