use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matfact::linalg::Pivoting;

// ---------------------------------------------------------------------------
// Helpers: deterministic, diagonally dominant inputs so every variant succeeds
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize, n: usize) -> f64 {
    let base = ((i * 7 + j * 13) % 17) as f64 - 8.0;
    if i == j {
        base + 10.0 * n as f64
    } else {
        base
    }
}

fn matfact_square(n: usize) -> matfact::Matrix<f64> {
    matfact::Matrix::from_fn(n, n, |i, j| entry(i, j, n))
}

fn nalgebra_square(n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(n, n, |i, j| entry(i, j, n))
}

fn matfact_tall(m: usize, n: usize) -> matfact::Matrix<f64> {
    matfact::Matrix::from_fn(m, n, |i, j| entry(i, j, n))
}

fn nalgebra_tall(m: usize, n: usize) -> nalgebra::DMatrix<f64> {
    nalgebra::DMatrix::from_fn(m, n, |i, j| entry(i, j, n))
}

const SIZES: [usize; 4] = [4, 16, 64, 128];

// ---------------------------------------------------------------------------
// LU
// ---------------------------------------------------------------------------

fn lu(c: &mut Criterion) {
    let mut g = c.benchmark_group("lu");

    for &n in &SIZES {
        let a = matfact_square(n);
        g.bench_with_input(BenchmarkId::new("matfact_no_pivot", n), &a, |b, a| {
            b.iter(|| matfact::lu_no_pivot(std::hint::black_box(a)))
        });
        g.bench_with_input(BenchmarkId::new("matfact_exact_zero", n), &a, |b, a| {
            b.iter(|| matfact::lu_with_pivot(std::hint::black_box(a)))
        });
        g.bench_with_input(BenchmarkId::new("matfact_partial", n), &a, |b, a| {
            b.iter(|| std::hint::black_box(a).lu_with(Pivoting::partial()))
        });

        let na = nalgebra_square(n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &na, |b, a| {
            b.iter(|| std::hint::black_box(a).clone().lu())
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// QR
// ---------------------------------------------------------------------------

fn qr(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr");

    for &n in &SIZES {
        let a = matfact_tall(2 * n, n);
        g.bench_with_input(BenchmarkId::new("matfact", n), &a, |b, a| {
            b.iter(|| matfact::qr_householder(std::hint::black_box(a)))
        });

        let na = nalgebra_tall(2 * n, n);
        g.bench_with_input(BenchmarkId::new("nalgebra", n), &na, |b, a| {
            b.iter(|| std::hint::black_box(a).clone().qr())
        });
    }

    g.finish();
}

criterion_group!(benches, lu, qr);
criterion_main!(benches);
