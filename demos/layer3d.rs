//! Solve the manufactured boundary-layer problem on one grid and report
//! the error against the exact solution.
//!
//! ```text
//! cargo run --example layer3d -- [mx] [eps] [limiter]
//! ```

use adr_rs::{
    l2h_error, linf_norm, newton_solve, Axis, Field3, FluxLimiter, GridGeometry, LayerProblem,
    NewtonConfig, Partition, SerialExchange,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    // The dense Newton stand-in wants modest grids; my = mx - 1 needs mx >= 4.
    let mx: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9)
        .max(4);
    let eps: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.2);
    let limiter = args
        .next()
        .and_then(|s| FluxLimiter::from_name(&s))
        .unwrap_or(FluxLimiter::VanLeer);

    let geom = GridGeometry::new(mx, mx - 1, mx, Default::default());
    let problem = LayerProblem::new(eps);
    let spec = problem.spec(limiter);
    let exchange = SerialExchange::new(geom);
    let part = Partition::whole(&geom);

    let mut u = Field3::new(&part, limiter.required_ghost());
    let report = match newton_solve(&geom, &spec, &exchange, &mut u, &NewtonConfig::default()) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("solve failed: {err}");
            std::process::exit(1);
        }
    };

    let mut exact = Field3::new(&part, 0);
    problem.fill_exact(&geom, &mut exact);
    let mut diff = Field3::new(&part, 0);
    diff.fill_with(|i, j, k| u.get(i, j, k) - exact.get(i, j, k));

    println!(
        "done on {} x {} x {} grid (h = {:.4}, {:.4}, {:.4}), eps = {}, limiter = {}:",
        geom.extent(Axis::X),
        geom.extent(Axis::Y),
        geom.extent(Axis::Z),
        geom.spacing(Axis::X),
        geom.spacing(Axis::Y),
        geom.spacing(Axis::Z),
        eps,
        limiter.name(),
    );
    println!(
        "  newton iterations = {}, |F|_2h = {:.3e}",
        report.iterations, report.residual_norm
    );
    println!(
        "  error |u - uexact|_2h = {:.6e}, |u - uexact|_inf = {:.6e}",
        l2h_error(&geom, &u, &exact),
        linf_norm(&diff)
    );
}
