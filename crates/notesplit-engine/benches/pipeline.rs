use criterion::{Criterion, criterion_group, criterion_main};
use notesplit_engine::{SplitConfig, TokenKind, assemble::assemble, lexing::tokenize, split_note};
use std::hint::black_box;

fn sample_note(sections: usize) -> String {
    let mut text = String::from("# Benchmark note\n\nintro paragraph\n\n");
    for i in 0..sections {
        text.push_str(&format!("## Section {i}\n"));
        text.push_str("some prose line\n\n");
        text.push_str("- [ ] task one\n- [x] task two\n  - nested\n    - deeper\n\n");
        text.push_str("| a | b |\n| --- | --- |\n| 1 | 2 |\n\n");
        text.push_str("```rust\nfn f() {}\n```\n\n");
    }
    text
}

fn bench_pipeline(c: &mut Criterion) {
    let text = sample_note(100);
    let config = SplitConfig::for_kind(TokenKind::Header);

    c.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(&text))));

    c.bench_function("assemble", |b| {
        b.iter(|| assemble(tokenize(black_box(&text))).unwrap())
    });

    c.bench_function("split_note", |b| {
        b.iter(|| split_note(black_box(&text), &config).unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
