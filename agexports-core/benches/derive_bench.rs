//! Criterion benchmarks for the per-interaction hot path.
//!
//! Benchmarks:
//! 1. Choropleth derivation for one category
//! 2. Breakdown derivation with a growing selection and an active hover
//! 3. Full view plus plotly JSON export

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use agexports_core::figure::plotly::view_json;
use agexports_core::{ClickEvent, DashboardContext, HoverEvent, Session};

const SAMPLE: &str = include_str!("../tests/fixtures/us_ag_exports_sample.csv");
const CODES: [&str; 10] = ["AL", "AK", "AZ", "CA", "FL", "IA", "KS", "TX", "VT", "WA"];

fn session_with(ctx: &DashboardContext, n: usize) -> Session {
    let mut session = Session::new(ctx);
    for code in CODES.iter().take(n) {
        session.click(ctx, ClickEvent::on(*code));
    }
    if let Some(first) = CODES.first().filter(|_| n > 0) {
        session.hover(HoverEvent::hover(*first, "corn"));
    }
    session
}

fn bench_choropleth(c: &mut Criterion) {
    let ctx = DashboardContext::from_csv_str(SAMPLE).unwrap();
    let session = session_with(&ctx, 3);
    c.bench_function("choropleth", |b| b.iter(|| black_box(session.choropleth(&ctx))));
}

fn bench_breakdown(c: &mut Criterion) {
    let ctx = DashboardContext::from_csv_str(SAMPLE).unwrap();
    let mut group = c.benchmark_group("breakdown");
    for n in [1usize, 5, 10] {
        let session = session_with(&ctx, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &session, |b, s| {
            b.iter(|| black_box(s.breakdown(&ctx)))
        });
    }
    group.finish();
}

fn bench_view_json(c: &mut Criterion) {
    let ctx = DashboardContext::from_csv_str(SAMPLE).unwrap();
    let session = session_with(&ctx, 10);
    c.bench_function("view_json", |b| b.iter(|| black_box(view_json(&session.view(&ctx)))));
}

criterion_group!(benches, bench_choropleth, bench_breakdown, bench_view_json);
criterion_main!(benches);
