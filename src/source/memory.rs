use chrono::NaiveDate;

use super::PriceSource;
use crate::error::FrontierError;
use crate::error::Result;
use crate::portfolio::PriceSeries;
use crate::portfolio::PriceTable;

/// Source backed by series already held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
  series: Vec<PriceSeries>,
}

impl InMemorySource {
  pub fn new(series: Vec<PriceSeries>) -> Self {
    Self { series }
  }

  /// Add or replace the series of one asset.
  pub fn insert(&mut self, series: PriceSeries) {
    match self.series.iter_mut().find(|s| s.asset == series.asset) {
      Some(slot) => *slot = series,
      None => self.series.push(series),
    }
  }

  pub fn assets(&self) -> impl Iterator<Item = &str> {
    self.series.iter().map(|s| s.asset.as_str())
  }
}

impl PriceSource for InMemorySource {
  fn fetch(&self, assets: &[String], start: NaiveDate, end: NaiveDate) -> Result<PriceTable> {
    let mut picked = Vec::with_capacity(assets.len());
    for a in assets {
      let s = self
        .series
        .iter()
        .find(|s| &s.asset == a)
        .ok_or_else(|| FrontierError::data(format!("no prices for asset {a}")))?;
      let points = s
        .points
        .iter()
        .copied()
        .filter(|(d, _)| *d >= start && *d < end)
        .collect();
      picked.push(PriceSeries::new(a.clone(), points));
    }
    PriceTable::from_series(&picked)
  }
}
