//! # Report
//!
//! Plain-text tables of a [`FrontierRun`] for terminal display. Colouring and
//! charts are left to whatever display layer consumes the run.

use prettytable::format;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use crate::portfolio::AssetStats;
use crate::portfolio::FrontierResult;
use crate::portfolio::FrontierRun;
use crate::portfolio::PriceTable;
use crate::portfolio::ScoredPortfolio;

fn pct(x: f64) -> String {
  format!("{:.2}%", x * 100.0)
}

fn header(assets: &[String]) -> Row {
  let mut cells = vec![
    Cell::new("#"),
    Cell::new("Volatility"),
    Cell::new("Return"),
    Cell::new("Sharpe"),
  ];
  cells.extend(assets.iter().map(|a| Cell::new(a)));
  Row::new(cells)
}

fn portfolio_row(idx: usize, p: &ScoredPortfolio) -> Row {
  let mut cells = vec![
    Cell::new(&idx.to_string()),
    Cell::new(&pct(p.volatility)),
    Cell::new(&pct(p.expected_return)),
    Cell::new(&format!("{:.4}", p.sharpe)),
  ];
  cells.extend(p.weights.iter().map(|w| Cell::new(&pct(*w))));
  Row::new(cells)
}

/// Portfolios ordered by descending Sharpe ratio, at most `limit` rows.
pub fn frontier_table(frontier: &FrontierResult, assets: &[String], limit: Option<usize>) -> Table {
  let mut order: Vec<usize> = (0..frontier.len()).collect();
  let ps = frontier.portfolios();
  // NaN last; stable sort keeps draw order among equal Sharpe values
  order.sort_by(|&a, &b| {
    let (sa, sb) = (ps[a].sharpe, ps[b].sharpe);
    sa.is_nan().cmp(&sb.is_nan()).then(sb.total_cmp(&sa))
  });

  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
  table.set_titles(header(assets));
  for &i in order.iter().take(limit.unwrap_or(usize::MAX)) {
    table.add_row(portfolio_row(i, &ps[i]));
  }
  table
}

/// The max-Sharpe and min-volatility portfolios side by side.
pub fn highlights_table(frontier: &FrontierResult, assets: &[String]) -> Table {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
  let mut titles = header(assets);
  titles.insert_cell(0, Cell::new(""));
  table.set_titles(titles);

  let mut best = portfolio_row(frontier.max_sharpe_index(), frontier.max_sharpe());
  best.insert_cell(0, Cell::new("max Sharpe"));
  let mut calm = portfolio_row(frontier.min_volatility_index(), frontier.min_volatility());
  calm.insert_cell(0, Cell::new("min volatility"));

  table.add_row(best);
  table.add_row(calm);
  table
}

/// Annualized single-asset return and volatility.
pub fn asset_table(stats: &[AssetStats]) -> Table {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
  table.set_titles(Row::new(vec![
    Cell::new("Asset"),
    Cell::new("Return"),
    Cell::new("Volatility"),
  ]));
  for s in stats {
    table.add_row(Row::new(vec![
      Cell::new(&s.asset),
      Cell::new(&pct(s.annual_return)),
      Cell::new(&pct(s.annual_volatility)),
    ]));
  }
  table
}

/// Row indices spread evenly over `len` rows, always keeping the first and last.
fn spread(len: usize, max_rows: usize) -> Vec<usize> {
  if len <= max_rows {
    return (0..len).collect();
  }
  if max_rows < 2 {
    return vec![len - 1];
  }
  let mut idx: Vec<usize> = (0..max_rows)
    .map(|k| k * (len - 1) / (max_rows - 1))
    .collect();
  idx.dedup();
  idx
}

/// Rebased prices (first date = 100), at most `max_rows` dates.
pub fn performance_table(normalized: &PriceTable, max_rows: usize) -> Table {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
  let mut titles = vec![Cell::new("Date")];
  titles.extend(normalized.assets().iter().map(|a| Cell::new(a)));
  table.set_titles(Row::new(titles));

  let prices = normalized.prices();
  for i in spread(normalized.len(), max_rows) {
    let mut cells = vec![Cell::new(&normalized.dates()[i].to_string())];
    cells.extend(prices.row(i).iter().map(|p| Cell::new(&format!("{p:.2}"))));
    table.add_row(Row::new(cells));
  }
  table
}

/// Full text report of a run.
pub fn render(run: &FrontierRun, limit: Option<usize>) -> String {
  let assets = run.assets();
  format!(
    "Price performance (rebased to 100)\n{}\nAssets\n{}\nHighlights\n{}\nPortfolios ({} simulated)\n{}",
    performance_table(&run.normalized, 12),
    asset_table(&run.asset_stats),
    highlights_table(&run.frontier, assets),
    run.frontier.len(),
    frontier_table(&run.frontier, assets, limit),
  )
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use ndarray::Array2;

  use super::*;
  use crate::portfolio::aggregate;
  use crate::portfolio::FrontierEngine;
  use crate::FrontierConfig;

  fn frontier() -> FrontierResult {
    aggregate(vec![
      ScoredPortfolio {
        weights: vec![0.25, 0.75],
        volatility: 0.2,
        expected_return: 0.1,
        sharpe: 0.5,
      },
      ScoredPortfolio {
        weights: vec![0.5, 0.5],
        volatility: 0.1,
        expected_return: 0.12,
        sharpe: 1.2,
      },
    ])
    .unwrap()
  }

  #[test]
  fn frontier_table_is_sorted_and_limited() {
    let assets = vec!["A".to_string(), "B".to_string()];
    let table = frontier_table(&frontier(), &assets, Some(1));

    assert_eq!(table.len(), 1);
    let out = table.to_string();
    assert!(out.contains("1.2000"));
    assert!(!out.contains("0.5000"));
    assert!(out.contains("Volatility"));
  }

  #[test]
  fn nan_sharpe_sorts_after_numbers() {
    let assets = vec!["A".to_string()];
    let res = aggregate(vec![
      ScoredPortfolio {
        weights: vec![1.0],
        volatility: 0.1,
        expected_return: 0.1,
        sharpe: 1.0,
      },
      ScoredPortfolio {
        weights: vec![1.0],
        volatility: 0.0,
        expected_return: 0.0,
        sharpe: f64::NAN,
      },
    ])
    .unwrap();
    assert_eq!(res.max_sharpe_index(), 0);

    let out = frontier_table(&res, &assets, Some(1)).to_string();
    assert!(out.contains("1.0000"));
    assert!(!out.contains("NaN"));
  }

  #[test]
  fn performance_table_keeps_first_and_last_dates() {
    let d = |day: u32| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
    let dates: Vec<NaiveDate> = (1..=20).map(d).collect();
    let prices = Array2::from_shape_fn((20, 2), |(i, j)| 10.0 * (j + 1) as f64 + i as f64);
    let table = PriceTable::new(vec!["X".into(), "Y".into()], dates, prices).unwrap();
    let norm = table.normalized();

    let out = performance_table(&norm, 5).to_string();
    assert_eq!(performance_table(&norm, 5).len(), 5);
    assert!(out.contains("2024-02-01"));
    assert!(out.contains("2024-02-20"));
    // X: 29 / 10, Y: 39 / 20
    assert!(out.contains("290.00"));
    assert!(out.contains("195.00"));
    assert!(out.contains("100.00"));

    assert_eq!(performance_table(&norm, 50).len(), 20);
  }

  #[test]
  fn render_includes_price_performance() {
    let d = |day: u32| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
    let table = PriceTable::new(
      vec!["X".into(), "Y".into()],
      vec![d(1), d(2), d(3), d(4)],
      ndarray::array![[10.0, 20.0], [11.0, 19.0], [10.5, 21.0], [12.0, 22.0]],
    )
    .unwrap();
    let config = FrontierConfig {
      assets: vec!["X".into(), "Y".into()],
      start_date: d(1),
      end_date: d(10),
      sample_count: 100,
      seed: Some(3),
      ..Default::default()
    };
    let run = FrontierEngine::new(config).run(&table).unwrap();

    let out = render(&run, Some(3));
    assert!(out.contains("Price performance"));
    assert!(out.contains("120.00"));
    assert!(out.contains("110.00"));
    assert!(out.contains("max Sharpe"));
  }

  #[test]
  fn highlights_name_both_rows() {
    let assets = vec!["A".to_string(), "B".to_string()];
    let out = highlights_table(&frontier(), &assets).to_string();
    assert!(out.contains("max Sharpe"));
    assert!(out.contains("min volatility"));
    assert!(out.contains("50.00%"));
  }

  #[test]
  fn asset_table_formats_percentages() {
    let out = asset_table(&[AssetStats {
      asset: "PG".into(),
      annual_return: 0.0812,
      annual_volatility: 0.1834,
    }])
    .to_string();
    assert!(out.contains("PG"));
    assert!(out.contains("8.12%"));
    assert!(out.contains("18.34%"));
  }
}
