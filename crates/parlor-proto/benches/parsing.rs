//! Benchmarks for relay line classification and serialization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parlor_proto::{Command, Reply};

/// Plain chat text, the common case
const CHAT_LINE: &str = "has anyone seen the build break on main?";

/// Slash command in canonical casing
const QUIT_LINE: &str = "/QUIT";

/// Slash command in mixed casing (forces the uppercase pass)
const MIXED_CASE_LINE: &str = "/uSeRs please";

/// Server chat line as received by a client
const SERVER_CHAT_LINE: &str = "MESSAGE alice (14:03) : has anyone seen the build break?";

/// Server notice with the alignment gutter
const SERVER_NOTICE_LINE: &str = "MESSAGE        alice joined";

fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Command Classification");

    group.bench_function("chat_text", |b| {
        b.iter(|| {
            let cmd = Command::classify(black_box(CHAT_LINE));
            black_box(cmd)
        })
    });

    group.bench_function("quit", |b| {
        b.iter(|| {
            let cmd = Command::classify(black_box(QUIT_LINE));
            black_box(cmd)
        })
    });

    group.bench_function("mixed_case", |b| {
        b.iter(|| {
            let cmd = Command::classify(black_box(MIXED_CASE_LINE));
            black_box(cmd)
        })
    });

    group.finish();
}

fn benchmark_reply_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reply Construction");

    group.bench_function("chat", |b| {
        b.iter(|| {
            let reply = Reply::chat(black_box("alice"), black_box("14:03"), black_box(CHAT_LINE));
            black_box(reply)
        })
    });

    group.bench_function("joined", |b| {
        b.iter(|| {
            let reply = Reply::joined(black_box("alice"));
            black_box(reply)
        })
    });

    group.finish();
}

fn benchmark_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reply Serialization");

    let chat = Reply::chat("alice", "14:03", CHAT_LINE);
    let joined = Reply::joined("alice");

    group.bench_function("chat", |b| {
        b.iter(|| {
            let s = black_box(&chat).to_string();
            black_box(s)
        })
    });

    group.bench_function("joined", |b| {
        b.iter(|| {
            let s = black_box(&joined).to_string();
            black_box(s)
        })
    });

    group.finish();
}

fn benchmark_reply_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reply Parsing");

    let lines = vec![
        ("control", "NAMEACCEPTED"),
        ("chat", SERVER_CHAT_LINE),
        ("notice", SERVER_NOTICE_LINE),
    ];

    for (name, line) in lines {
        group.bench_with_input(BenchmarkId::new("parse", name), line, |b, s| {
            b.iter(|| {
                let reply: Reply = black_box(s).parse().unwrap();
                black_box(reply)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_classification,
    benchmark_reply_construction,
    benchmark_serialization,
    benchmark_reply_parsing,
);

criterion_main!(benches);
