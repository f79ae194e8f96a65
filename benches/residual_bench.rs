use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use adr_rs::{
    assemble_residual, Field3, FluxLimiter, GridGeometry, HaloExchange, LayerProblem, Partition,
    SerialExchange,
};

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("residual_assembly");
    for &m in &[16usize, 32, 48] {
        for limiter in FluxLimiter::ALL {
            let geom = GridGeometry::new(m + 1, m, m + 1, Default::default());
            let problem = LayerProblem::new(0.2);
            let spec = problem.spec(limiter);
            let part = Partition::whole(&geom);
            let mut u = Field3::new(&part, limiter.required_ghost());
            problem.fill_exact(&geom, &mut u);
            SerialExchange::new(geom).exchange(&mut u).unwrap();
            let mut r = Field3::new(&part, 0);

            group.bench_with_input(
                BenchmarkId::new(limiter.name(), m),
                &m,
                |b, _| {
                    b.iter(|| {
                        assemble_residual(&geom, black_box(&u), &spec, &mut r).unwrap();
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_halo_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("halo_exchange");
    for &ghost in &[1usize, 2] {
        let geom = GridGeometry::new(33, 32, 33, Default::default());
        let exchange = SerialExchange::new(geom);
        let mut u = Field3::new(&Partition::whole(&geom), ghost);
        u.fill_with(|i, j, k| (i + j + k) as f64);

        group.bench_with_input(BenchmarkId::new("ghost", ghost), &ghost, |b, _| {
            b.iter(|| exchange.exchange(black_box(&mut u)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_assembly, bench_halo_exchange);
criterion_main!(benches);
