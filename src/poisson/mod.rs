//! 2D structured-grid Poisson variant.
//!
//! The same discretization ideas as the 3D assembler at lower complexity:
//! a 5-point Laplacian on the unit square with Dirichlet data g on the
//! boundary, assembled as an explicit matrix and right-hand side for a
//! direct solve. Interior rows are scaled by hx·hy and their couplings to
//! boundary nodes are eliminated into the right-hand side, so the matrix
//! is symmetric:
//!
//! 2(hy/hx + hx/hy) u_ij - hy/hx (u_W + u_E) - hx/hy (u_S + u_N) = hx·hy·f_ij

use faer::{linalg::solvers::Solve, Mat};

/// Dirichlet Poisson problem -Δu = f on the unit square.
#[derive(Clone, Copy, Debug)]
pub struct Poisson2D {
    mx: usize,
    my: usize,
}

impl Poisson2D {
    /// Grid of `mx × my` points including the boundary.
    pub fn new(mx: usize, my: usize) -> Self {
        assert!(mx >= 3 && my >= 3, "need interior points, got {}x{}", mx, my);
        Self { mx, my }
    }

    /// Grid spacings (hx, hy).
    pub fn spacing(&self) -> (f64, f64) {
        (1.0 / (self.mx - 1) as f64, 1.0 / (self.my - 1) as f64)
    }

    /// Physical coordinates of grid point (i, j).
    pub fn coord(&self, i: usize, j: usize) -> (f64, f64) {
        let (hx, hy) = self.spacing();
        (i as f64 * hx, j as f64 * hy)
    }

    /// Total number of unknowns.
    pub fn unknowns(&self) -> usize {
        self.mx * self.my
    }

    #[inline]
    fn row(&self, i: usize, j: usize) -> usize {
        j * self.mx + i
    }

    fn on_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || i == self.mx - 1 || j == 0 || j == self.my - 1
    }

    /// The four stencil neighbors of (i, j) with their off-diagonal
    /// coefficients.
    fn neighbors(&self, i: usize, j: usize) -> [(usize, usize, f64); 4] {
        let (hx, hy) = self.spacing();
        [
            (i - 1, j, hy / hx),
            (i + 1, j, hy / hx),
            (i, j - 1, hx / hy),
            (i, j + 1, hx / hy),
        ]
    }

    /// Assemble the 5-point operator. Boundary rows are identity rows, and
    /// interior rows carry no coupling into boundary columns: Dirichlet
    /// neighbors are eliminated into the right-hand side instead, which
    /// keeps the matrix symmetric.
    pub fn assemble_matrix(&self) -> Mat<f64> {
        let n = self.unknowns();
        let (hx, hy) = self.spacing();
        let mut a = Mat::<f64>::zeros(n, n);
        for j in 0..self.my {
            for i in 0..self.mx {
                let r = self.row(i, j);
                if self.on_boundary(i, j) {
                    a[(r, r)] = 1.0;
                } else {
                    a[(r, r)] = 2.0 * (hy / hx + hx / hy);
                    for (ni, nj, coef) in self.neighbors(i, j) {
                        if !self.on_boundary(ni, nj) {
                            a[(r, self.row(ni, nj))] = -coef;
                        }
                    }
                }
            }
        }
        a
    }

    /// Assemble the right-hand side for source f and boundary data g.
    /// Interior rows pick up the eliminated Dirichlet couplings,
    /// `+coef * g(neighbor)` per boundary neighbor.
    pub fn assemble_rhs(
        &self,
        f: impl Fn(f64, f64) -> f64,
        g: impl Fn(f64, f64) -> f64,
    ) -> Mat<f64> {
        let n = self.unknowns();
        let (hx, hy) = self.spacing();
        let mut b = Mat::<f64>::zeros(n, 1);
        for j in 0..self.my {
            for i in 0..self.mx {
                let r = self.row(i, j);
                let (x, y) = self.coord(i, j);
                b[(r, 0)] = if self.on_boundary(i, j) {
                    g(x, y)
                } else {
                    let mut v = hx * hy * f(x, y);
                    for (ni, nj, coef) in self.neighbors(i, j) {
                        if self.on_boundary(ni, nj) {
                            let (nx, ny) = self.coord(ni, nj);
                            v += coef * g(nx, ny);
                        }
                    }
                    v
                };
            }
        }
        b
    }

    /// Assemble and solve directly; returns the solution grid point values
    /// in row-major (j outer, i inner) order.
    pub fn solve(&self, f: impl Fn(f64, f64) -> f64, g: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        let a = self.assemble_matrix();
        let b = self.assemble_rhs(f, g);
        let lu = a.as_ref().partial_piv_lu();
        let x = lu.solve(&b);
        (0..self.unknowns()).map(|r| x[(r, 0)]).collect()
    }

    /// Scaled 2-norm error against a reference function.
    pub fn l2h_error(&self, u: &[f64], exact: impl Fn(f64, f64) -> f64) -> f64 {
        let (hx, hy) = self.spacing();
        let mut sum = 0.0;
        for j in 0..self.my {
            for i in 0..self.mx {
                let (x, y) = self.coord(i, j);
                let d = u[self.row(i, j)] - exact(x, y);
                sum += d * d;
            }
        }
        (sum * hx * hy).sqrt()
    }
}
