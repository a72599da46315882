use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lincode::ecc::{Channel, CodeParams, LinearCode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_codec(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let code = LinearCode::random(CodeParams::new(24, 12).unwrap(), &mut rng).unwrap();
    let messages: Vec<u64> = (0..1024).collect();
    let codewords = code.encode_all(&messages);

    c.bench_function("encode 1024 x (24,12)", |b| {
        b.iter(|| code.encode_all(black_box(&messages)))
    });

    let mut channel = Channel::with_rng(ChaCha8Rng::seed_from_u64(8));
    let received = channel.send_vectors(&codewords, code.n(), 0.05);
    c.bench_function("decode 1024 x (24,12) at p = 0.05", |b| {
        b.iter(|| code.decode_all(black_box(&received)))
    });

    c.bench_function("channel 1024 x 24 bits", |b| {
        b.iter(|| channel.send_vectors(black_box(&codewords), 24, 0.05))
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
