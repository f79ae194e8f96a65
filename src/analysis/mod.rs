//! Grid-scaled norms and convergence-order helpers.
//!
//! Verification runs compare numerical solutions against the manufactured
//! exact solution using the scaled 2-norm |v|_{2,h} = |v|₂ · sqrt(hx·hy·hz),
//! which approximates the continuous L² norm and makes errors comparable
//! across refinement levels.

use crate::grid::{Axis, Field3, GridGeometry};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scaled 2-norm |v|_{2,h} over the cells the field owns.
pub fn l2h_norm(geom: &GridGeometry, field: &Field3) -> f64 {
    let sum: f64 = field
        .partition()
        .iter()
        .map(|(i, j, k)| {
            let v = field.get(i, j, k);
            v * v
        })
        .sum();
    let hvol = geom.spacing(Axis::X) * geom.spacing(Axis::Y) * geom.spacing(Axis::Z);
    (sum * hvol).sqrt()
}

/// Max-norm over the cells the field owns.
pub fn linf_norm(field: &Field3) -> f64 {
    field
        .partition()
        .iter()
        .map(|(i, j, k)| field.get(i, j, k).abs())
        .fold(0.0, f64::max)
}

/// Scaled 2-norm of the difference of two fields over the same owned block.
pub fn l2h_error(geom: &GridGeometry, a: &Field3, b: &Field3) -> f64 {
    assert_eq!(
        a.partition(),
        b.partition(),
        "fields must cover the same owned block"
    );
    let sum: f64 = a
        .partition()
        .iter()
        .map(|(i, j, k)| {
            let d = a.get(i, j, k) - b.get(i, j, k);
            d * d
        })
        .sum();
    let hvol = geom.spacing(Axis::X) * geom.spacing(Axis::Y) * geom.spacing(Axis::Z);
    (sum * hvol).sqrt()
}

/// Parallel variant of [`l2h_norm`], reduced plane by plane.
#[cfg(feature = "parallel")]
pub fn l2h_norm_parallel(geom: &GridGeometry, field: &Field3) -> f64 {
    let part = field.partition();
    let (zs, ze) = (part.start(Axis::Z), part.end(Axis::Z));
    let sum: f64 = (zs..ze)
        .into_par_iter()
        .map(|k| {
            let mut plane = 0.0;
            for j in part.start(Axis::Y)..part.end(Axis::Y) {
                for i in part.start(Axis::X)..part.end(Axis::X) {
                    let v = field.get(i, j, k);
                    plane += v * v;
                }
            }
            plane
        })
        .sum();
    let hvol = geom.spacing(Axis::X) * geom.spacing(Axis::Y) * geom.spacing(Axis::Z);
    (sum * hvol).sqrt()
}

/// Observed convergence orders log₂(e_{l-1}/e_l) for errors measured on a
/// sequence of grids whose spacing halves at each level.
pub fn observed_orders(errors: &[f64]) -> Vec<f64> {
    errors
        .windows(2)
        .map(|w| (w[0] / w[1]).log2())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryPolicy;
    use crate::grid::Partition;

    fn unit_field(m: usize) -> (GridGeometry, Field3) {
        let geom = GridGeometry::new(m, m, m, BoundaryPolicy::dirichlet_x_periodic_y());
        let mut f = Field3::new(&Partition::whole(&geom), 0);
        f.fill_with(|_, _, _| 1.0);
        (geom, f)
    }

    #[test]
    fn test_l2h_norm_of_ones() {
        // sum = m³, |v|_{2,h} = sqrt(m³ · hx·hy·hz).
        let (geom, f) = unit_field(5);
        let hvol = geom.spacing(Axis::X) * geom.spacing(Axis::Y) * geom.spacing(Axis::Z);
        let expected = ((125.0) * hvol).sqrt();
        assert!((l2h_norm(&geom, &f) - expected).abs() < 1e-14);
    }

    #[test]
    fn test_linf_norm() {
        let (_, mut f) = unit_field(5);
        f.set(2, 3, 1, -7.5);
        assert!((linf_norm(&f) - 7.5).abs() < 1e-14);
    }

    #[test]
    fn test_observed_orders() {
        let orders = observed_orders(&[1.0, 0.25, 0.0625]);
        assert_eq!(orders.len(), 2);
        assert!((orders[0] - 2.0).abs() < 1e-12);
        assert!((orders[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_norm_matches_serial() {
        let (geom, mut f) = unit_field(6);
        f.fill_with(|i, j, k| (i * 7 + j * 3 + k) as f64 * 0.1);
        let serial = l2h_norm(&geom, &f);
        let parallel = l2h_norm_parallel(&geom, &f);
        assert!((serial - parallel).abs() < 1e-12);
    }
}
