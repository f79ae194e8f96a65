//! Discrete residual assembly.
//!
//! For every owned cell the residual combines
//!
//! F(u) = -eps Δ_h u - g(x,y,z,u) + div_h(w₀ a u)
//!
//! with second-order central diffusion, a pointwise source, and limited
//! upwind advective fluxes through the east/north/top cell faces. Cells
//! pinned by a Dirichlet constraint get the override residual u - value
//! instead. Face fluxes follow an ownership rule that prevents double
//! counting across partitions: every face writes +flux/h into its low-side
//! cell and -flux/h into its high-side cell, each applied exactly once
//! globally, and a write whose target is unowned (or pinned) is dropped
//! locally because the owning partition computes that same face itself.

use crate::boundary::BoundaryPolicy;
use crate::error::AssemblyError;
use crate::grid::{Axis, Field3, GridGeometry};
use crate::problem::ProblemSpec;

/// Dirichlet value imposed at a pinned cell: the boundary trace on the high
/// face of the trace-carrying axis, zero on every other Dirichlet face.
fn dirichlet_value(geom: &GridGeometry, spec: &ProblemSpec<'_>, i: isize, j: isize, k: isize) -> f64 {
    let idx = [i, j, k];
    for axis in Axis::ALL {
        if geom
            .policy()
            .takes_trace(axis, idx[axis.index()], geom.extent(axis))
        {
            let (c1, c2) = match axis {
                Axis::X => (geom.coord(Axis::Y, j), geom.coord(Axis::Z, k)),
                Axis::Y => (geom.coord(Axis::X, i), geom.coord(Axis::Z, k)),
                Axis::Z => (geom.coord(Axis::X, i), geom.coord(Axis::Y, j)),
            };
            return spec.trace.eval(c1, c2);
        }
    }
    0.0
}

/// Whether the cell is pinned by a Dirichlet constraint on any axis.
fn pinned(geom: &GridGeometry, i: isize, j: isize, k: isize) -> bool {
    let idx = [i, j, k];
    Axis::ALL
        .iter()
        .any(|&axis| geom.policy().pins(axis, idx[axis.index()], geom.extent(axis)))
}

/// Value of the ±1 diffusion neighbor along `axis`. Pinned neighbors
/// contribute their exact Dirichlet value rather than the current iterate,
/// matching the constraint the override rows enforce.
fn diffusion_neighbor(
    geom: &GridGeometry,
    spec: &ProblemSpec<'_>,
    u: &Field3,
    i: isize,
    j: isize,
    k: isize,
    axis: Axis,
    dir: isize,
) -> f64 {
    let (di, dj, dk) = axis.offset();
    let (ni, nj, nk) = (i + dir * di, j + dir * dj, k + dir * dk);
    if pinned(geom, ni, nj, nk) {
        dirichlet_value(geom, spec, ni, nj, nk)
    } else {
        u.get(ni, nj, nk)
    }
}

/// Assemble the nonlinear residual over the cells `field` owns.
///
/// `field`'s ghost halo must have been refreshed by a blocking
/// [`crate::grid::HaloExchange`] since the last write; the assembler never
/// triggers its own exchange. `residual` must cover the same owned block.
/// The function is pure: bit-identical inputs give bit-identical output.
///
/// # Errors
///
/// [`AssemblyError::InvalidDiffusivity`] for eps ≤ 0 (checked before any
/// grid work) and [`AssemblyError::InsufficientHalo`] when the halo is
/// narrower than the active limiter's stencil.
pub fn assemble_residual(
    geom: &GridGeometry,
    field: &Field3,
    spec: &ProblemSpec<'_>,
    residual: &mut Field3,
) -> Result<(), AssemblyError> {
    spec.validate()?;
    let need = spec.limiter.required_ghost();
    if field.ghost() < need {
        return Err(AssemblyError::InsufficientHalo {
            have: field.ghost(),
            need,
        });
    }
    let part = field.partition();
    assert_eq!(
        part,
        residual.partition(),
        "residual must cover the same owned block as the field"
    );

    let policy: &BoundaryPolicy = geom.policy();
    let (hx, hy, hz) = (
        geom.spacing(Axis::X),
        geom.spacing(Axis::Y),
        geom.spacing(Axis::Z),
    );
    let (xs, ys, zs) = (
        part.start(Axis::X),
        part.start(Axis::Y),
        part.start(Axis::Z),
    );
    let (xe, ye, ze) = (part.end(Axis::X), part.end(Axis::Y), part.end(Axis::Z));

    residual.zero_owned();

    // One extra layer below the owned block in every direction, so the
    // fluxes through the block's low faces are computed here too; their
    // unowned-side writes are dropped, the owned-side writes are not.
    for k in (zs - 1)..ze {
        let z = geom.coord(Axis::Z, k);
        for j in (ys - 1)..ye {
            let y = geom.coord(Axis::Y, j);
            for i in (xs - 1)..xe {
                let x = geom.coord(Axis::X, i);
                let owned = part.owns(i, j, k);

                if owned {
                    if pinned(geom, i, j, k) {
                        let val = dirichlet_value(geom, spec, i, j, k);
                        residual.set(i, j, k, field.get(i, j, k) - val);
                    } else {
                        let uu = field.get(i, j, k);
                        let mut lap = 0.0;
                        for (axis, h) in [(Axis::X, hx), (Axis::Y, hy), (Axis::Z, hz)] {
                            let lo = diffusion_neighbor(geom, spec, field, i, j, k, axis, -1);
                            let hi = diffusion_neighbor(geom, spec, field, i, j, k, axis, 1);
                            lap += (lo - 2.0 * uu + hi) / (h * h);
                        }
                        let g = spec.source.eval(x, y, z, uu);
                        let r = residual.get(i, j, k) - (spec.eps * lap + g);
                        residual.set(i, j, k, r);
                    }
                }

                // Fluxes through the east/north/top faces of cell (i,j,k).
                for axis in Axis::ALL {
                    // Cells in the extra layer contribute only the face
                    // along their own extension axis.
                    if (i < xs && axis != Axis::X)
                        || (j < ys && axis != Axis::Y)
                        || (k < zs && axis != Axis::Z)
                    {
                        continue;
                    }
                    let idx = [i, j, k];
                    let m = geom.extent(axis) as isize;
                    let ci = idx[axis.index()];
                    // No face past a Dirichlet end of the axis.
                    if !policy.is_periodic(axis) && (ci < 0 || ci >= m - 1) {
                        continue;
                    }
                    // Pinned along an orthogonal axis: both face neighbors
                    // are override cells, nothing to accumulate.
                    if Axis::ALL.iter().any(|&other| {
                        other != axis
                            && policy.pins(other, idx[other.index()], geom.extent(other))
                    }) {
                        continue;
                    }

                    let (di, dj, dk) = axis.offset();
                    let h = geom.spacing(axis);
                    let a = spec.wind_at(
                        x + 0.5 * hx * di as f64,
                        y + 0.5 * hy * dj as f64,
                        z + 0.5 * hz * dk as f64,
                        axis,
                    );
                    let u_lo = field.get(i, j, k);
                    let u_hi = field.get(i + di, j + dj, k + dk);
                    let (u_up, u_dn) = if a >= 0.0 { (u_lo, u_hi) } else { (u_hi, u_lo) };
                    let mut flux = a * u_up;

                    // Limited correction, only where a second upwind
                    // neighbor exists on the grid ("deep" faces; periodic
                    // axes always qualify through the halo).
                    let deep = policy.is_periodic(axis) || (ci > 1 && ci < m - 2);
                    if spec.limiter.is_active() && deep && u_dn != u_up {
                        let theta = if spec.limiter.uses_ratio() {
                            let u_far = if a >= 0.0 {
                                field.get(i - di, j - dj, k - dk)
                            } else {
                                field.get(i + 2 * di, j + 2 * dj, k + 2 * dk)
                            };
                            (u_up - u_far) / (u_dn - u_up)
                        } else {
                            0.0
                        };
                        flux += a * spec.limiter.blend(theta) * (u_dn - u_up);
                    }

                    // Ownership rule: each side applied exactly once
                    // globally, unowned or pinned targets dropped locally.
                    if part.owns(i, j, k) && !pinned(geom, i, j, k) {
                        residual.set(i, j, k, residual.get(i, j, k) + flux / h);
                    }
                    let (pi, pj, pk) = (i + di, j + dj, k + dk);
                    if part.owns(pi, pj, pk) && !pinned(geom, pi, pj, pk) {
                        residual.set(pi, pj, pk, residual.get(pi, pj, pk) - flux / h);
                    }
                }
            }
        }
    }
    Ok(())
}
