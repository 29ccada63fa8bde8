use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gridinterp::{errors::InterpError, Interpolant};

const BATCH: usize = 1000;

/// Non-uniform axis, denser near the lower end as is usual for wealth-like state variables.
fn curved_axis(lo: f64, hi: f64, n: usize) -> Vec<f64>
{
    (0..n).map(|i| lo + (hi - lo) * (i as f64 / (n - 1) as f64).powf(1.5)).collect()
}

fn build_3d(n: usize) -> Result<Interpolant<f64, 3>, InterpError>
{
    let grids = [curved_axis(0.0, 10.0, n), curved_axis(0.0, 5.0, n), curved_axis(0.1, 20.0, n)];
    Interpolant::from_fn(grids, |[a, b, c]| (a + 1.0).ln() + b.sqrt() * c)
}

fn run_variants(c: &mut Criterion)
{
    let mut group = c.benchmark_group("3d_last_dimension_batch");
    for n in [50, 200, 800]
    {
        let interpolant = build_3d(n).unwrap();
        let grid = interpolant.grid();
        let values = interpolant.values();
        let zs: Vec<f64> = (0..BATCH).map(|i| 0.1 + 19.9 * i as f64 / BATCH as f64).collect();
        let xs = vec![3.3; BATCH];
        let ys = vec![1.7; BATCH];
        let mut out = vec![0.0; BATCH];
        let mut prep = grid.prepare(&[3.3, 1.7], BATCH).unwrap();

        group.bench_with_input(BenchmarkId::new("vec", n), &n, |b, _| {
            b.iter(|| grid.interp_vec(values, [&xs[..], &ys[..], &zs[..]], &mut out).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("vec_prepared", n), &n, |b, _| {
            b.iter(|| grid.interp_vec_prepared(&prep, values, &zs, &mut out).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("vec_mon", n), &n, |b, _| {
            b.iter(|| grid.interp_vec_mon(&mut prep, values, &zs, &mut out).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("vec_mon_rep", n), &n, |b, _| {
            b.iter(|| grid.interp_vec_mon_rep(&prep, values, &mut out).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("vec_mon_noprep", n), &n, |b, _| {
            b.iter(|| grid.interp_vec_mon_noprep(values, [&xs[..], &ys[..], &zs[..]], &mut out).unwrap())
        });
    }
    group.finish();
}

fn run_single(c: &mut Criterion)
{
    let interpolant = build_3d(200).unwrap();
    c.bench_function("3d_single", |b| b.iter(|| interpolant.interp(std::hint::black_box([4.2, 2.2, 11.0]))));
}

criterion_group!(benches, run_variants, run_single);
criterion_main!(benches);
