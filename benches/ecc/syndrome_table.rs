use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lincode::ecc::{derive_control_matrix, standard_form_generator, SyndromeTable};
use lincode::math::BitMatrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn control_matrix(n: usize, k: usize, seed: u64) -> BitMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let free = BitMatrix::random(k, n - k, &mut rng).unwrap();
    derive_control_matrix(&standard_form_generator(&free).unwrap()).unwrap()
}

fn bench_syndrome_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("syndrome_table");
    for &(n, k) in &[(7, 4), (15, 11), (16, 8), (20, 10), (24, 12)] {
        let h = control_matrix(n, k, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_{}", n, k)),
            &h,
            |b, h| b.iter(|| SyndromeTable::build(black_box(h)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_syndrome_table);
criterion_main!(benches);
