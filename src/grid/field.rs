//! Flat-buffer 3D field with a ghost halo.
//!
//! A [`Field3`] stores one scalar per cell over an owned index block plus
//! `ghost` layers on every side. Cells are addressed by *global* grid
//! indices, signed so that ghost reads like `u(i-1, j, k)` at the low edge
//! of a partition stay natural. Index arithmetic is centralized here with
//! debug bounds checks, so the flux bookkeeping in the assembler never does
//! raw stride math.

use super::partition::Partition;
use super::Axis;

/// Scalar field over an owned 3D index block plus ghost halo.
#[derive(Clone, Debug, PartialEq)]
pub struct Field3 {
    start: [isize; 3],
    count: [usize; 3],
    ghost: usize,
    dims: [usize; 3],
    data: Vec<f64>,
}

impl Field3 {
    /// Allocate a zeroed field over `part` with `ghost` halo layers.
    pub fn new(part: &Partition, ghost: usize) -> Self {
        let start = [
            part.start(Axis::X),
            part.start(Axis::Y),
            part.start(Axis::Z),
        ];
        let count = [
            part.count(Axis::X),
            part.count(Axis::Y),
            part.count(Axis::Z),
        ];
        let dims = [
            count[0] + 2 * ghost,
            count[1] + 2 * ghost,
            count[2] + 2 * ghost,
        ];
        Self {
            start,
            count,
            ghost,
            dims,
            data: vec![0.0; dims[0] * dims[1] * dims[2]],
        }
    }

    /// Halo width in cells.
    pub fn ghost(&self) -> usize {
        self.ghost
    }

    /// The owned index block this field covers.
    pub fn partition(&self) -> Partition {
        Partition::from_parts(self.start, self.count)
    }

    #[inline]
    fn offset(&self, i: isize, j: isize, k: isize) -> usize {
        let g = self.ghost as isize;
        let lx = i - self.start[0] + g;
        let ly = j - self.start[1] + g;
        let lz = k - self.start[2] + g;
        debug_assert!(
            lx >= 0
                && (lx as usize) < self.dims[0]
                && ly >= 0
                && (ly as usize) < self.dims[1]
                && lz >= 0
                && (lz as usize) < self.dims[2],
            "index ({}, {}, {}) outside field block (start {:?}, count {:?}, ghost {})",
            i,
            j,
            k,
            self.start,
            self.count,
            self.ghost
        );
        lx as usize + self.dims[0] * (ly as usize + self.dims[1] * lz as usize)
    }

    /// Read the value at global index (i, j, k); owned or ghost.
    #[inline]
    pub fn get(&self, i: isize, j: isize, k: isize) -> f64 {
        self.data[self.offset(i, j, k)]
    }

    /// Write the value at global index (i, j, k); owned or ghost.
    #[inline]
    pub fn set(&mut self, i: isize, j: isize, k: isize, value: f64) {
        let at = self.offset(i, j, k);
        self.data[at] = value;
    }

    /// Set every owned cell from a function of its global index. Ghost
    /// cells are untouched; refresh them through a halo exchange.
    pub fn fill_with(&mut self, mut f: impl FnMut(isize, isize, isize) -> f64) {
        let part = self.partition();
        for (i, j, k) in part.iter() {
            self.set(i, j, k, f(i, j, k));
        }
    }

    /// Zero every owned cell.
    pub fn zero_owned(&mut self) {
        self.fill_with(|_, _, _| 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryPolicy;
    use crate::grid::GridGeometry;

    fn small_partition() -> Partition {
        let geom = GridGeometry::new(4, 4, 4, BoundaryPolicy::dirichlet_x_periodic_y());
        Partition::whole(&geom)
    }

    #[test]
    fn test_roundtrip_owned_and_ghost() {
        let mut f = Field3::new(&small_partition(), 2);
        f.set(0, 0, 0, 3.5);
        f.set(3, 3, 3, -1.0);
        f.set(-2, 5, 0, 7.0); // ghost corners are addressable
        assert_eq!(f.get(0, 0, 0), 3.5);
        assert_eq!(f.get(3, 3, 3), -1.0);
        assert_eq!(f.get(-2, 5, 0), 7.0);
    }

    #[test]
    fn test_fill_with_visits_owned_only() {
        let mut f = Field3::new(&small_partition(), 1);
        f.set(-1, 0, 0, 9.0);
        f.fill_with(|i, j, k| (i + 10 * j + 100 * k) as f64);
        assert_eq!(f.get(2, 1, 3), 312.0);
        // Ghost untouched.
        assert_eq!(f.get(-1, 0, 0), 9.0);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_out_of_halo_access_panics() {
        let f = Field3::new(&small_partition(), 1);
        f.get(-2, 0, 0);
    }
}
