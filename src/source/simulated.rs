//! # Simulated Source
//!
//! $$
//! S_{t+\Delta t} = S_t \exp\!\left((\mu-\tfrac12\sigma^2)\Delta t + \sigma\sqrt{\Delta t}\,Z\right)
//! $$
//!
//! Offline price source: independent geometric Brownian motion paths sampled on
//! business days. Useful for demos and tests without market-data access.

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Weekday;
use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::StandardNormal;
use tracing::debug;

use super::PriceSource;
use crate::config::TRADING_DAYS_PER_YEAR;
use crate::error::FrontierError;
use crate::error::Result;
use crate::portfolio::sampler::stream_seed;
use crate::portfolio::PriceTable;

/// GBM parameters of one simulated asset (annualized drift and volatility).
#[derive(ImplNew, Clone, Debug, PartialEq)]
pub struct SimulatedAsset {
  pub ticker: String,
  pub x0: f64,
  pub mu: f64,
  pub sigma: f64,
}

/// Price source generating GBM paths for a fixed universe.
#[derive(Clone, Debug)]
pub struct SimulatedSource {
  universe: Vec<SimulatedAsset>,
  seed: Option<u64>,
}

impl SimulatedSource {
  pub fn new(universe: Vec<SimulatedAsset>, seed: Option<u64>) -> Self {
    Self { universe, seed }
  }

  /// The five-ticker universe of the dashboard with rough long-run parameters.
  pub fn demo(seed: Option<u64>) -> Self {
    let universe = vec![
      SimulatedAsset::new("PG".to_string(), 120.0, 0.08, 0.18),
      SimulatedAsset::new("^GSPC".to_string(), 2700.0, 0.10, 0.19),
      SimulatedAsset::new("AAPL".to_string(), 40.0, 0.30, 0.32),
      SimulatedAsset::new("MSFT".to_string(), 85.0, 0.27, 0.29),
      SimulatedAsset::new("GOOG".to_string(), 53.0, 0.18, 0.30),
    ];
    Self::new(universe, seed)
  }

  pub fn universe(&self) -> &[SimulatedAsset] {
    &self.universe
  }

  fn path(&self, asset: &SimulatedAsset, stream: u64, base: u64, n: usize) -> Array1<f64> {
    let dt = 1.0 / TRADING_DAYS_PER_YEAR;
    let drift_dt = (asset.mu - 0.5 * asset.sigma * asset.sigma) * dt;
    let vol_sdt = asset.sigma * dt.sqrt();

    let mut rng = StdRng::seed_from_u64(stream_seed(base, stream));
    let gn = Array1::<f64>::random_using(n.saturating_sub(1), StandardNormal, &mut rng);

    let mut path = Array1::<f64>::zeros(n);
    let mut s = asset.x0;
    if n > 0 {
      path[0] = s;
    }
    for i in 1..n {
      s *= (drift_dt + vol_sdt * gn[i - 1]).exp();
      path[i] = s;
    }
    path
  }
}

/// Monday-to-Friday dates in `[start, end)`.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
  let mut out = Vec::new();
  let mut d = start;
  while d < end {
    if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
      out.push(d);
    }
    match d.succ_opt() {
      Some(next) => d = next,
      None => break,
    }
  }
  out
}

impl PriceSource for SimulatedSource {
  fn fetch(&self, assets: &[String], start: NaiveDate, end: NaiveDate) -> Result<PriceTable> {
    let dates = business_days(start, end);
    if dates.is_empty() {
      return Err(FrontierError::data(format!(
        "no business days between {start} and {end}"
      )));
    }

    let base = self.seed.unwrap_or_else(rand::random);
    let mut prices = Array2::<f64>::zeros((dates.len(), assets.len()));
    for (j, ticker) in assets.iter().enumerate() {
      let (stream, asset) = self
        .universe
        .iter()
        .enumerate()
        .find(|(_, a)| &a.ticker == ticker)
        .ok_or_else(|| FrontierError::data(format!("{ticker} is not in the simulated universe")))?;
      prices
        .column_mut(j)
        .assign(&self.path(asset, stream as u64, base, dates.len()));
    }
    debug!(assets = ?assets, dates = dates.len(), "simulated price paths");

    PriceTable::new(assets.to_vec(), dates, prices)
  }
}
