use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pod_count_webhook::evaluator::{check, evaluate};
use pod_count_webhook::parsing::parse_threshold;
use pod_count_webhook::CheckRequest;

fn threshold_parsing_benchmark(c: &mut Criterion) {
    let test_values = vec!["0", "3", "50", "1000", "-1", "+42", "9223372036854775807", "abc"];

    c.bench_function("parse_threshold", |b| {
        b.iter(|| {
            for value in &test_values {
                let _ = black_box(parse_threshold("warning", black_box(value)));
            }
        })
    });
}

fn evaluation_benchmark(c: &mut Criterion) {
    let counts = [0usize, 2, 4, 5, 100, 10_000];

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            for count in counts {
                black_box(evaluate(black_box(count), Some(3), Some(5)));
            }
        })
    });

    let req = CheckRequest::new(Some("3"), Some("5"));
    c.bench_function("check", |b| {
        b.iter(|| {
            for count in counts {
                let _ = black_box(check(black_box(count), &req));
            }
        })
    });
}

criterion_group!(benches, threshold_parsing_benchmark, evaluation_benchmark);
criterion_main!(benches);
