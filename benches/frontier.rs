use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use markowitz_mc::source::PriceSource;
use markowitz_mc::source::SimulatedSource;
use markowitz_mc::FrontierConfig;
use markowitz_mc::FrontierEngine;

fn bench_frontier(c: &mut Criterion) {
  let base = FrontierConfig {
    assets: vec!["PG".into(), "^GSPC".into(), "AAPL".into(), "MSFT".into(), "GOOG".into()],
    seed: Some(1),
    ..Default::default()
  };
  let prices = SimulatedSource::demo(Some(1))
    .fetch(&base.assets, base.start_date, base.end_date)
    .unwrap();

  let mut group = c.benchmark_group("frontier");
  for &n in &[1_000usize, 5_000, 50_000] {
    for parallel in [false, true] {
      let engine = FrontierEngine::new(FrontierConfig {
        sample_count: n,
        parallel,
        ..base.clone()
      });
      let id = if parallel { "parallel" } else { "sequential" };
      group.bench_with_input(BenchmarkId::new(id, n), &prices, |b, prices| {
        b.iter(|| black_box(engine.run(prices).unwrap()))
      });
    }
  }
  group.finish();
}

criterion_group!(benches, bench_frontier);
criterion_main!(benches);
