use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamming_gf2::cs::ecc::{BinaryVector, CodeParameters, HammingCode, Mode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const MESSAGE_BITS: [usize; 4] = [4, 11, 57, 120];

fn random_message(rng: &mut ChaCha20Rng, k: usize) -> BinaryVector {
    (0..k).map(|_| rng.gen::<bool>()).collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_construction");
    for k in MESSAGE_BITS {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| CodeParameters::new(black_box(k)).unwrap())
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_encode");
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    for k in MESSAGE_BITS {
        let code = HammingCode::new(k, Mode::Correct).unwrap();
        let message = random_message(&mut rng, k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &message, |b, message| {
            b.iter(|| code.encode(black_box(message)).unwrap())
        });
    }
    group.finish();
}

fn bench_check_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_check_correct");
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    for k in MESSAGE_BITS {
        let code = HammingCode::new(k, Mode::Correct).unwrap();
        let codeword = code.encode(&random_message(&mut rng, k)).unwrap();
        let received = code.simulate_1bit_flip_with(&codeword, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), &received, |b, received| {
            b.iter(|| code.check_correct(black_box(received)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_encode, bench_check_correct);
criterion_main!(benches);
