//! Benchmarks for pmwiki2md conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic page bodies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pmwiki2md::convert::{resolve_emphasis, to_markdown, ConvertOptions};
use pmwiki2md::render::add_paragraph_breaks;

/// Creates a synthetic page body with the given number of sections, each
/// holding a stat block, a directive table and a pipe table.
fn create_test_body(section_count: usize) -> String {
    let mut body = String::new();

    for i in 0..section_count {
        body.push_str(&format!("!!Section {}%0a", i + 1));
        body.push_str("'''HP''' 75/99\\\\%0a'''AC''' 27%0aNeutral Medium%0aTiny size%0a%0a");
        body.push_str("(:table border=1:)%0a(:head:)Orm%0a(:head:)TAI%0a(:head:)Väringe%0a");
        body.push_str("(:cell:)+2%0a(:cell:)+1%0a(:head:)HL%0a(:cell:)+3%0a(:cell:)0%0a(:tableend:)%0a");
        body.push_str("'''Skills''' ||border=0%0a|| Acrobatics || +5 ||%0a|| Stealth || +9 ||%0a");
        body.push_str("*[[Main Page]] and [[~Abel]]%0a----%0a");
    }

    body
}

fn bench_emphasis(c: &mut Criterion) {
    let text = "This is'''bold''' and ''italic '' text\n".repeat(500);

    c.bench_function("resolve_emphasis", |b| {
        b.iter(|| resolve_emphasis(black_box(&text)))
    });
}

fn bench_reflow(c: &mut Criterion) {
    let text = "Neutral Medium\nTiny size\n\n# Heading\nSentence ends.\nLabel 8\n".repeat(500);

    c.bench_function("paragraph_reflow", |b| {
        b.iter(|| add_paragraph_breaks(black_box(&text)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let options = ConvertOptions::default();

    for section_count in [1, 10, 100] {
        let body = create_test_body(section_count);
        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| to_markdown(black_box(&body), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_emphasis, bench_reflow, bench_pipeline);
criterion_main!(benches);
