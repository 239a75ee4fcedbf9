use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sp_core::Profile;
use sp_filter::{DerivativeOrder, ExtremumKind, find_local_extrema, gaussian_derivative};

fn build_staircase(len: usize) -> Profile {
    let positions: Vec<f64> = (0..len).map(|i| i as f64 * 0.02).collect();
    let values: Vec<f64> = (0..len).map(|i| ((i / 400) % 3) as f64 * 2.5).collect();
    Profile::from_samples(values, positions).expect("valid profile")
}

fn bench_derivative(c: &mut Criterion) {
    let profile = build_staircase(4096);

    c.bench_function("gaussian_derivative_first_k25_4096", |b| {
        b.iter(|| {
            let d = gaussian_derivative(black_box(&profile), 25, DerivativeOrder::First)
                .expect("odd kernel");
            black_box(d.len());
        });
    });
}

fn bench_extrema(c: &mut Criterion) {
    let profile = build_staircase(4096);
    let curvature =
        gaussian_derivative(&profile, 25, DerivativeOrder::Second).expect("odd kernel");

    c.bench_function("find_local_extrema_4096", |b| {
        b.iter(|| {
            let idx = find_local_extrema(black_box(&curvature), ExtremumKind::Max, 5, 0.01);
            black_box(idx.len());
        });
    });
}

criterion_group!(benches, bench_derivative, bench_extrema);
criterion_main!(benches);
