use criterion::{criterion_group, criterion_main, Criterion};

use edwards25519::constants;
use edwards25519::edwards::EdwardsPoint;
use edwards25519::scalar::Scalar;

fn scalar_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");

    let x = Scalar::from_bytes_mod_order([0x11; 32]);
    let y = Scalar::from_bytes_mod_order([0x22; 32]);
    let z = Scalar::from_bytes_mod_order([0x33; 32]);

    group.bench_function("multiply_add", |b| {
        b.iter(|| Scalar::multiply_add(&x, &y, &z))
    });

    group.bench_function("wide reduction", |b| {
        b.iter(|| Scalar::from_bytes_mod_order_wide(&[0xa7; 64]))
    });

    group.finish();
}

fn edwards_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("edwards");

    let a = Scalar::from_bytes_mod_order([0x11; 32]);
    let b_scalar = Scalar::from_bytes_mod_order([0x22; 32]);
    let B = constants::ED25519_BASEPOINT_POINT;
    let A = EdwardsPoint::mul_base(&a);
    let compressed = A.compress();

    group.bench_function("fixed-base mult", |b| {
        b.iter(|| EdwardsPoint::mul_base(&a))
    });

    group.bench_function("variable-base mult", |b| b.iter(|| &a * &B));

    group.bench_function("vartime double-base mult", |b| {
        b.iter(|| EdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &A, &b_scalar))
    });

    group.bench_function("compress", |b| b.iter(|| A.compress()));

    group.bench_function("decompress", |b| {
        b.iter(|| compressed.decompress_negate_vartime().unwrap())
    });

    group.finish();
}

criterion_group!(benches, scalar_bench, edwards_bench);
criterion_main!(benches);
