use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examkit_core::parser::{parse_answer_key, parse_questions};

fn generate_question_source(count: usize) -> String {
    let mut s = String::new();
    for i in 0..count {
        s.push_str(&format!(
            "What is {i} + {i}?\n{}\n{}\n{}\n{}\n\n",
            i * 2,
            i * 2 + 1,
            i,
            i + 2
        ));
    }
    s
}

fn generate_key_source(count: usize) -> String {
    (0..count)
        .map(|i| if i % 7 == 0 { String::new() } else { "1".to_string() })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_question_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("question_parsing");

    let small = generate_question_source(10);
    let medium = generate_question_source(200);
    let large = generate_question_source(5000);

    group.bench_function("10_questions", |b| {
        b.iter(|| parse_questions(black_box(&small)))
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| parse_questions(black_box(&medium)))
    });

    group.bench_function("5000_questions", |b| {
        b.iter(|| parse_questions(black_box(&large)))
    });

    group.finish();
}

fn bench_key_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_parsing");
    let key = generate_key_source(5000);

    group.bench_function("5000_lines", |b| {
        b.iter(|| parse_answer_key(black_box(&key)))
    });

    group.finish();
}

criterion_group!(benches, bench_question_parsing, bench_key_parsing);
criterion_main!(benches);
