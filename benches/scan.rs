use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wikispan_registry::Registry;
use wikispan_scanner::Scanner;

fn paragraph(repeats: usize) -> String {
    "Some prose with a [[ Link | target ]], an ![[ image | pic.png ]] \
     and %% a comment %% plus [[ nested %%note%% | page ]]. "
        .repeat(repeats)
}

fn bench_scan(c: &mut Criterion) {
    let scanner = Scanner::new(Registry::with_builtins().freeze());

    let short = paragraph(1);
    c.bench_function("scan_short_paragraph", |b| {
        b.iter(|| scanner.scan(black_box(&short)))
    });

    let long = paragraph(200);
    c.bench_function("scan_long_paragraph", |b| {
        b.iter(|| scanner.scan(black_box(&long)))
    });

    let plain = "plain text without any tokens at all ".repeat(200);
    c.bench_function("scan_plain_text", |b| {
        b.iter(|| scanner.scan(black_box(&plain)))
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
