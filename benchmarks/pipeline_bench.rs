use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mkdown_core::{ConversionOptions, Converter, MarkdownRenderer, PulldownRenderer, Theme};

fn generate_large_markdown() -> String {
    let mut s = String::with_capacity(200_000);
    s.push_str("---\ntitle: Benchmark Document\n---\n# Benchmark Document\n\n");
    for i in 0..2_000 {
        s.push_str(&format!("## Section {i}\n\n"));
        s.push_str("* List item with **bold** text and https://example.com\n");
        s.push_str(&format!("* Inline math $$x_{i} + y_{i}$$ here\n\n"));
        s.push_str("```rust\nfn main() { println!(\"hi\"); }\n```\n\n");
    }
    s
}

fn benchmark_pipeline(c: &mut Criterion) {
    let input = generate_large_markdown();
    let mut group = c.benchmark_group("pipeline_throughput");
    group.throughput(Throughput::Bytes(input.len() as u64));

    // 1. Markdown rendering alone
    let renderer = PulldownRenderer::new();
    group.bench_function("markdown_only", |b| {
        b.iter(|| renderer.render(black_box(&input)).unwrap())
    });

    // 2. Full page assembly with every feature enabled
    let converter = Converter::new(ConversionOptions {
        theme: Theme::Dark,
        enable_diagrams: true,
        enable_math: true,
    });
    group.bench_function("full_page", |b| {
        b.iter(|| converter.convert(black_box(input.as_bytes())).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
