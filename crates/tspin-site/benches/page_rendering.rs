//! Benchmarks for document rendering performance.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tspin_site::Site;
use tspin_storage::MockStorage;

/// Generate page text with the given structure.
fn generate_page(sections: usize, boards_per_section: usize) -> String {
    let mut text = String::from("<div class=\"article-title\">Benchmark</div>\n");

    for i in 0..sections {
        text.push_str(&format!("<div class=\"h2\">Section {i}</div>\n"));
        text.push_str("Some **bold** and *starred* and _italic_ text.\n");
        text.push_str("- first item\n- second item\n\n");
        for j in 0..boards_per_section {
            text.push_str(&format!("[[BOARD: board_{j}.txt]]\n"));
        }
        text.push_str("---\n");
    }
    text.push_str("SOURCE: Benchmark - https://example.com\n");
    text
}

fn site_with_page(sections: usize, boards_per_section: usize) -> Site {
    let mut storage = MockStorage::new().with_page("bench/doc", generate_page(sections, boards_per_section));
    for j in 0..boards_per_section {
        storage = storage.with_board(
            "bench/doc",
            &format!("board_{j}.txt"),
            "# PIECES: t, i\ntt________\niiii______\n",
        );
    }
    Site::new(Arc::new(storage))
}

fn bench_render_simple(c: &mut Criterion) {
    let site = site_with_page(2, 0);

    c.bench_function("render_simple_page", |b| {
        b.iter(|| site.render("bench/doc"));
    });
}

fn bench_render_with_boards(c: &mut Criterion) {
    let site = site_with_page(5, 3);

    c.bench_function("render_page_with_boards", |b| {
        b.iter(|| site.render("bench/doc"));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_by_section_count");
    for sections in [5, 20, 50] {
        let site = site_with_page(sections, 1);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &sections,
            |b, _| b.iter(|| site.render("bench/doc")),
        );
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut storage = MockStorage::new();
    for top in ["basics", "advanced", "misc"] {
        for page in 0..20 {
            storage = storage.with_page(&format!("{top}/page-{page}"), "plain text");
        }
    }
    let site = Site::new(Arc::new(storage));

    c.bench_function("build_navigation_60_pages", |b| {
        b.iter(|| site.navigation());
    });
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_render_with_boards,
    bench_render_varying_sizes,
    bench_navigation
);
criterion_main!(benches);
