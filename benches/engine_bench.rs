use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gomoku_nn::eval::UniformBackend;
use gomoku_nn::protocol::parse_position;
use gomoku_nn::{decode_output, encode_state, InferenceEngine, RawOutput, Symmetry};

const MIDGAME_15: &str =
    "15/15/15/15/5o9/5xo8/4xxxo7/6ox7/5x1o7/15/15/15/15/15/15 x 96";

fn bench_encode(c: &mut Criterion) {
    let state = parse_position(MIDGAME_15).unwrap();
    c.bench_function("encode_15x15", |b| {
        b.iter(|| encode_state(black_box(&state)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let raw = RawOutput {
        log_policy: vec![-(225f32).ln(); 225],
        value: vec![0.1],
    };
    c.bench_function("decode_15x15", |b| {
        b.iter(|| decode_output(black_box(raw.clone()), 15).unwrap())
    });
}

fn bench_infer_uniform(c: &mut Criterion) {
    let state = parse_position(MIDGAME_15).unwrap();
    let engine = InferenceEngine::with_backend(UniformBackend);
    c.bench_function("infer_uniform_15x15", |b| {
        b.iter(|| engine.infer(black_box(&state)).unwrap())
    });
}

fn bench_symmetry(c: &mut Criterion) {
    let state = parse_position(MIDGAME_15).unwrap();
    let sym = Symmetry::new(3, true);
    c.bench_function("apply_symmetry_15x15", |b| {
        b.iter(|| sym.apply_state(black_box(&state)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_infer_uniform,
    bench_symmetry
);
criterion_main!(benches);
