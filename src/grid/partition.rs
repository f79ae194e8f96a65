//! Owned index blocks and the halo-exchange seam.
//!
//! Each partition owns a disjoint contiguous block of the global grid.
//! Residual assembly over a partition is only valid after a *blocking*
//! halo exchange: every ghost cell must reflect the latest field values
//! before any cell of the residual is computed. The exchange is modeled as
//! a synchronous trait call, not a callback; the distributed (MPI-style)
//! substrate that would implement it across processes is an external
//! collaborator, and the implementations here are its serial stand-ins.

use super::field::Field3;
use super::{Axis, GridGeometry};
use crate::error::AssemblyError;

/// A disjoint contiguous block of owned grid indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    start: [isize; 3],
    count: [usize; 3],
}

impl Partition {
    pub(crate) fn from_parts(start: [isize; 3], count: [usize; 3]) -> Self {
        Self { start, count }
    }

    /// The partition owning the entire grid.
    pub fn whole(geom: &GridGeometry) -> Self {
        Self {
            start: [0, 0, 0],
            count: [
                geom.extent(Axis::X),
                geom.extent(Axis::Y),
                geom.extent(Axis::Z),
            ],
        }
    }

    /// Split the grid into `n` contiguous slabs along `axis`. Remainder
    /// cells go to the leading slabs, so the blocks cover the grid exactly.
    pub fn split(geom: &GridGeometry, axis: Axis, n: usize) -> Vec<Partition> {
        assert!(n >= 1, "need at least one partition");
        let m = geom.extent(axis);
        assert!(n <= m, "cannot split {} cells into {} slabs", m, n);
        let base = m / n;
        let extra = m % n;
        let mut parts = Vec::with_capacity(n);
        let mut at = 0usize;
        for rank in 0..n {
            let len = base + usize::from(rank < extra);
            let mut p = Self::whole(geom);
            p.start[axis.index()] = at as isize;
            p.count[axis.index()] = len;
            parts.push(p);
            at += len;
        }
        parts
    }

    /// First owned index along one axis.
    #[inline]
    pub fn start(&self, axis: Axis) -> isize {
        self.start[axis.index()]
    }

    /// Number of owned cells along one axis.
    #[inline]
    pub fn count(&self, axis: Axis) -> usize {
        self.count[axis.index()]
    }

    /// One past the last owned index along one axis.
    #[inline]
    pub fn end(&self, axis: Axis) -> isize {
        self.start(axis) + self.count(axis) as isize
    }

    /// Whether the cell (i, j, k) belongs to this block.
    #[inline]
    pub fn owns(&self, i: isize, j: isize, k: isize) -> bool {
        i >= self.start(Axis::X)
            && i < self.end(Axis::X)
            && j >= self.start(Axis::Y)
            && j < self.end(Axis::Y)
            && k >= self.start(Axis::Z)
            && k < self.end(Axis::Z)
    }

    /// Number of owned cells.
    pub fn cells(&self) -> usize {
        self.count.iter().product()
    }

    /// Whether this block is the whole grid.
    pub fn covers(&self, geom: &GridGeometry) -> bool {
        *self == Self::whole(geom)
    }

    /// Iterate owned cells in x-fastest order.
    pub fn iter(&self) -> impl Iterator<Item = (isize, isize, isize)> {
        let (xs, xe) = (self.start(Axis::X), self.end(Axis::X));
        let (ys, ye) = (self.start(Axis::Y), self.end(Axis::Y));
        let (zs, ze) = (self.start(Axis::Z), self.end(Axis::Z));
        (zs..ze).flat_map(move |k| (ys..ye).flat_map(move |j| (xs..xe).map(move |i| (i, j, k))))
    }
}

/// Blocking collective halo exchange.
///
/// Implementations must guarantee that when `exchange` returns, every ghost
/// cell of `field` holds the value currently owned by whichever partition
/// (or wrap image) it shadows. Assembly with stale ghosts is incorrect, so
/// callers treat this as a synchronization barrier.
pub trait HaloExchange {
    fn exchange(&self, field: &mut Field3) -> Result<(), AssemblyError>;
}

/// Halo exchange for a single partition owning the whole grid.
///
/// Periodic axes wrap into the owned data; ghosts past Dirichlet end faces
/// are cleared and never read by the assembler.
#[derive(Clone, Copy, Debug)]
pub struct SerialExchange {
    geom: GridGeometry,
}

impl SerialExchange {
    pub fn new(geom: GridGeometry) -> Self {
        Self { geom }
    }
}

impl HaloExchange for SerialExchange {
    fn exchange(&self, field: &mut Field3) -> Result<(), AssemblyError> {
        let part = field.partition();
        if !part.covers(&self.geom) {
            return Err(AssemblyError::HaloExchange(format!(
                "SerialExchange needs a whole-grid field, got block {:?}",
                part
            )));
        }
        fill_halo_from(&self.geom, field, |geom, f, i, j, k| {
            wrapped_read(geom, f, i, j, k)
        })
    }
}

/// Halo exchange that mirrors ghost cells out of a full-grid reference
/// field, standing in for the collective over all partitions. The reference
/// plays the role of the union of every partition's owned data.
#[derive(Clone, Copy, Debug)]
pub struct MirrorExchange<'a> {
    geom: GridGeometry,
    global: &'a Field3,
}

impl<'a> MirrorExchange<'a> {
    /// `global` must own the whole grid.
    pub fn new(geom: GridGeometry, global: &'a Field3) -> Result<Self, AssemblyError> {
        if !global.partition().covers(&geom) {
            return Err(AssemblyError::HaloExchange(
                "MirrorExchange reference field must own the whole grid".to_string(),
            ));
        }
        Ok(Self { geom, global })
    }
}

impl HaloExchange for MirrorExchange<'_> {
    fn exchange(&self, field: &mut Field3) -> Result<(), AssemblyError> {
        let global = self.global;
        fill_halo_from(&self.geom, field, |geom, _own, i, j, k| {
            wrapped_read(geom, global, i, j, k)
        })
    }
}

/// Read a whole-grid field at (i, j, k), wrapping periodic axes. Indices
/// past a Dirichlet end face have no grid image and read as zero.
fn wrapped_read(geom: &GridGeometry, field: &Field3, i: isize, j: isize, k: isize) -> f64 {
    let mut idx = [i, j, k];
    for axis in Axis::ALL {
        let m = geom.extent(axis) as isize;
        let q = &mut idx[axis.index()];
        if geom.policy().is_periodic(axis) {
            *q = q.rem_euclid(m);
        } else if *q < 0 || *q >= m {
            return 0.0;
        }
    }
    field.get(idx[0], idx[1], idx[2])
}

/// Visit every ghost cell of `field` and overwrite it with `source`.
fn fill_halo_from(
    geom: &GridGeometry,
    field: &mut Field3,
    source: impl Fn(&GridGeometry, &Field3, isize, isize, isize) -> f64,
) -> Result<(), AssemblyError> {
    let part = field.partition();
    let g = field.ghost() as isize;
    let snapshot = field.clone();
    for k in part.start(Axis::Z) - g..part.end(Axis::Z) + g {
        for j in part.start(Axis::Y) - g..part.end(Axis::Y) + g {
            for i in part.start(Axis::X) - g..part.end(Axis::X) + g {
                if part.owns(i, j, k) {
                    continue;
                }
                let v = source(geom, &snapshot, i, j, k);
                field.set(i, j, k, v);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryPolicy;

    fn geom() -> GridGeometry {
        GridGeometry::new(5, 4, 5, BoundaryPolicy::dirichlet_x_periodic_y())
    }

    #[test]
    fn test_split_covers_grid() {
        let geom = geom();
        let parts = Partition::split(&geom, Axis::Y, 3);
        assert_eq!(parts.len(), 3);
        let total: usize = parts.iter().map(|p| p.count(Axis::Y)).sum();
        assert_eq!(total, 4);
        // Contiguous, disjoint.
        assert_eq!(parts[0].start(Axis::Y), 0);
        assert_eq!(parts[1].start(Axis::Y), parts[0].end(Axis::Y));
        assert_eq!(parts[2].start(Axis::Y), parts[1].end(Axis::Y));
    }

    #[test]
    fn test_serial_exchange_wraps_periodic_axis() {
        let geom = geom();
        let part = Partition::whole(&geom);
        let mut f = Field3::new(&part, 2);
        f.fill_with(|i, j, k| (100 * i + 10 * j + k) as f64);
        SerialExchange::new(geom).exchange(&mut f).unwrap();
        // y wraps: j = -1 shadows j = 3, j = 4 shadows j = 0.
        assert_eq!(f.get(2, -1, 2), f.get(2, 3, 2));
        assert_eq!(f.get(2, 4, 2), f.get(2, 0, 2));
        assert_eq!(f.get(2, -2, 2), f.get(2, 2, 2));
        // Dirichlet ghosts cleared.
        assert_eq!(f.get(-1, 1, 1), 0.0);
        assert_eq!(f.get(5, 1, 1), 0.0);
    }

    #[test]
    fn test_serial_exchange_rejects_sub_block() {
        let geom = geom();
        let parts = Partition::split(&geom, Axis::Y, 2);
        let mut f = Field3::new(&parts[0], 1);
        assert!(SerialExchange::new(geom).exchange(&mut f).is_err());
    }

    #[test]
    fn test_mirror_exchange_fills_partition_halo() {
        let geom = geom();
        let mut global = Field3::new(&Partition::whole(&geom), 2);
        global.fill_with(|i, j, k| (100 * i + 10 * j + k) as f64);

        let parts = Partition::split(&geom, Axis::Y, 2);
        let mut local = Field3::new(&parts[1], 2);
        local.fill_with(|i, j, k| global.get(i, j, k));
        MirrorExchange::new(geom, &global)
            .unwrap()
            .exchange(&mut local)
            .unwrap();

        let ys = parts[1].start(Axis::Y);
        // Low-side ghosts shadow the neighbor partition's cells.
        assert_eq!(local.get(2, ys - 1, 2), global.get(2, ys - 1, 2));
        // High-side ghosts wrap around the periodic axis.
        let ye = parts[1].end(Axis::Y);
        assert_eq!(local.get(2, ye, 2), global.get(2, 0, 2));
    }
}
