//! Terminal benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use webvt::core::{Attr, Screen};
use webvt::Terminal;

fn bench_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let text = "Hello, World! ".repeat(100);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("print_chars", |b| {
        b.iter(|| {
            let mut term = Terminal::with_size(80, 24);
            term.feed(black_box(text.as_bytes()));
            black_box(term)
        })
    });

    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let mut input = String::new();
    for i in 0..1000 {
        input.push_str(&format!("Line {}: Some text content here\r\n", i));
    }
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("scroll_into_scrollback", |b| {
        b.iter(|| {
            let mut term = Terminal::with_size(80, 24);
            term.feed(black_box(input.as_bytes()));
            black_box(term)
        })
    });

    group.finish();
}

fn bench_region_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    group.bench_function("region_scroll", |b| {
        b.iter(|| {
            let mut screen = Screen::new(80, 24, 0);
            for _ in 0..100 {
                screen.scroll_region(0, 3, 80, 18, 0, -1, Attr::DEFAULT);
                screen.scroll_region(10, 0, 60, 24, 2, 0, Attr::DEFAULT);
            }
            black_box(screen)
        })
    });

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    let content = "Hello, World!\r\n".repeat(20);

    group.bench_function("resize", |b| {
        b.iter(|| {
            let mut term = Terminal::with_size(80, 24);
            term.feed(content.as_bytes());
            term.resize(120, 40);
            term.resize(80, 24);
            term.resize(132, 50);
            black_box(term)
        })
    });

    group.finish();
}

fn bench_full_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal");

    // Simulate a full screen redraw (like vim opening)
    let mut setup_input = String::new();
    for row in 1..=24 {
        setup_input.push_str(&format!("\x1b[{};1H\x1b[{}m", row, 30 + row % 8));
        setup_input.push_str(&"X".repeat(80));
    }

    group.throughput(Throughput::Bytes(setup_input.len() as u64));

    group.bench_function("full_redraw", |b| {
        b.iter(|| {
            let mut term = Terminal::with_size(80, 24);
            term.feed(black_box(setup_input.as_bytes()));
            black_box(term)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_print,
    bench_scroll,
    bench_region_scroll,
    bench_resize,
    bench_full_redraw
);

criterion_main!(benches);
