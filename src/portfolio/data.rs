//! # Portfolio Data
//!
//! $$
//! r_t = \frac{P_t}{P_{t-1}} - 1,\qquad
//! \Sigma_{ij} = \frac{1}{T-1}\sum_t (r_{i,t}-\bar r_i)(r_{j,t}-\bar r_j)
//! $$
//!
//! Date-aligned price tables, simple-return series and the sample moments
//! (mean vector, covariance matrix) the scorer consumes.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use ndarray::s;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::Axis;
use ndarray_stats::CorrelationExt;
use serde::ser::SerializeStruct;
use serde::Serialize;
use serde::Serializer;

use crate::error::FrontierError;
use crate::error::Result;

/// Adjusted close prices of a single asset, one point per date.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
  /// Asset identifier.
  pub asset: String,
  /// `(date, adjusted close)` pairs; order does not matter.
  pub points: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
  pub fn new(asset: impl Into<String>, points: Vec<(NaiveDate, f64)>) -> Self {
    Self {
      asset: asset.into(),
      points,
    }
  }
}

/// Date-aligned price table. Rows are dates (ascending), columns are assets.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceTable {
  assets: Vec<String>,
  dates: Vec<NaiveDate>,
  prices: Array2<f64>,
}

/// Serializes as `{ assets, dates, rows }`, one row of prices per date.
impl Serialize for PriceTable {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let rows: Vec<Vec<f64>> = self.prices.rows().into_iter().map(|r| r.to_vec()).collect();
    let mut state = serializer.serialize_struct("PriceTable", 3)?;
    state.serialize_field("assets", &self.assets)?;
    state.serialize_field("dates", &self.dates)?;
    state.serialize_field("rows", &rows)?;
    state.end()
  }
}

impl PriceTable {
  /// Build a table from already aligned data.
  pub fn new(assets: Vec<String>, dates: Vec<NaiveDate>, prices: Array2<f64>) -> Result<Self> {
    if prices.nrows() != dates.len() || prices.ncols() != assets.len() {
      return Err(FrontierError::data(format!(
        "price matrix is {}x{} but there are {} dates and {} assets",
        prices.nrows(),
        prices.ncols(),
        dates.len(),
        assets.len()
      )));
    }
    if dates.windows(2).any(|w| w[0] >= w[1]) {
      return Err(FrontierError::data("dates must be strictly increasing"));
    }
    check_prices(&assets, &prices)?;

    Ok(Self {
      assets,
      dates,
      prices,
    })
  }

  /// Inner-join per-asset series on their dates. Dates missing for any asset
  /// are dropped; a duplicated date keeps its last observation.
  pub fn from_series(series: &[PriceSeries]) -> Result<Self> {
    if series.is_empty() {
      return Err(FrontierError::data("no price series supplied"));
    }

    let mut by_date: Vec<BTreeMap<NaiveDate, f64>> = Vec::with_capacity(series.len());
    for ps in series {
      if ps.points.is_empty() {
        return Err(FrontierError::data(format!(
          "price series for {} is empty",
          ps.asset
        )));
      }
      by_date.push(ps.points.iter().copied().collect());
    }

    let mut common: BTreeSet<NaiveDate> = by_date[0].keys().copied().collect();
    for map in &by_date[1..] {
      common.retain(|d| map.contains_key(d));
    }
    if common.is_empty() {
      return Err(FrontierError::data("price series share no common dates"));
    }

    let dates: Vec<NaiveDate> = common.into_iter().collect();
    let mut prices = Array2::<f64>::zeros((dates.len(), series.len()));
    for (j, map) in by_date.iter().enumerate() {
      for (i, d) in dates.iter().enumerate() {
        prices[[i, j]] = map[d];
      }
    }

    let assets = series.iter().map(|ps| ps.asset.clone()).collect();
    Self::new(assets, dates, prices)
  }

  pub fn assets(&self) -> &[String] {
    &self.assets
  }

  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  pub fn prices(&self) -> &Array2<f64> {
    &self.prices
  }

  /// Number of aligned dates.
  pub fn len(&self) -> usize {
    self.dates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }

  /// Prices of one asset, if present.
  pub fn column(&self, asset: &str) -> Option<ArrayView1<'_, f64>> {
    self
      .assets
      .iter()
      .position(|a| a == asset)
      .map(|j| self.prices.column(j))
  }

  /// Keep the requested assets, in the requested order.
  pub fn select(&self, assets: &[String]) -> Result<Self> {
    let mut idx = Vec::with_capacity(assets.len());
    for a in assets {
      let j = self
        .assets
        .iter()
        .position(|x| x == a)
        .ok_or_else(|| FrontierError::data(format!("no prices for asset {a}")))?;
      idx.push(j);
    }

    Ok(Self {
      assets: assets.to_vec(),
      dates: self.dates.clone(),
      prices: self.prices.select(Axis(1), &idx),
    })
  }

  /// Restrict to dates in `[start, end)`.
  pub fn window(&self, start: NaiveDate, end: NaiveDate) -> Self {
    let lo = self.dates.partition_point(|d| *d < start);
    let hi = self.dates.partition_point(|d| *d < end).max(lo);

    Self {
      assets: self.assets.clone(),
      dates: self.dates[lo..hi].to_vec(),
      prices: self.prices.slice(s![lo..hi, ..]).to_owned(),
    }
  }

  /// Performance view: every column rebased to 100 at the first date.
  pub fn normalized(&self) -> Self {
    let mut prices = self.prices.clone();
    if let Some(first) = self.prices.rows().into_iter().next() {
      for mut row in prices.rows_mut() {
        row.zip_mut_with(&first, |p, &p0| *p = *p / p0 * 100.0);
      }
    }

    Self {
      assets: self.assets.clone(),
      dates: self.dates.clone(),
      prices,
    }
  }

  /// Period-over-period fractional returns; one row shorter than the table.
  pub fn returns(&self) -> Result<ReturnTable> {
    let n = self.len();
    if n < 2 {
      return Err(FrontierError::InsufficientData {
        required: 2,
        actual: n,
      });
    }

    let prev = self.prices.slice(s![..n - 1, ..]);
    let next = self.prices.slice(s![1.., ..]);
    let returns = &next / &prev - 1.0;

    Ok(ReturnTable {
      assets: self.assets.clone(),
      dates: self.dates[1..].to_vec(),
      returns,
    })
  }
}

fn check_prices(assets: &[String], prices: &Array2<f64>) -> Result<()> {
  for ((i, j), &p) in prices.indexed_iter() {
    if !p.is_finite() || p <= 0.0 {
      return Err(FrontierError::data(format!(
        "price {p} for {} at row {i} is not a positive finite number",
        assets[j]
      )));
    }
  }
  Ok(())
}

/// Annualized per-asset moments.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetStats {
  pub asset: String,
  pub annual_return: f64,
  pub annual_volatility: f64,
}

/// Periodic simple returns. Rows are return periods, columns are assets.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnTable {
  assets: Vec<String>,
  dates: Vec<NaiveDate>,
  returns: Array2<f64>,
}

impl ReturnTable {
  pub fn assets(&self) -> &[String] {
    &self.assets
  }

  /// Date at the end of each return period.
  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  pub fn returns(&self) -> &Array2<f64> {
    &self.returns
  }

  /// Number of return periods.
  pub fn len(&self) -> usize {
    self.returns.nrows()
  }

  pub fn is_empty(&self) -> bool {
    self.returns.nrows() == 0
  }

  /// Mean periodic return per asset.
  pub fn mean_returns(&self) -> Array1<f64> {
    self
      .returns
      .mean_axis(Axis(0))
      .unwrap_or_else(|| Array1::zeros(self.assets.len()))
  }

  /// Sample covariance of periodic returns (`T - 1` denominator).
  pub fn covariance(&self) -> Result<Array2<f64>> {
    let t = self.len();
    if t < 2 {
      return Err(FrontierError::InsufficientData {
        required: 2,
        actual: t,
      });
    }

    // variables along rows, observations along columns
    self
      .returns
      .t()
      .cov(1.0)
      .map_err(|_| FrontierError::data("return table is empty"))
  }

  /// Annualized return and volatility of every asset on its own.
  pub fn asset_stats(&self, periods_per_year: f64) -> Result<Vec<AssetStats>> {
    let mu = self.mean_returns();
    let cov = self.covariance()?;

    Ok(
      self
        .assets
        .iter()
        .enumerate()
        .map(|(i, a)| AssetStats {
          asset: a.clone(),
          annual_return: mu[i] * periods_per_year,
          annual_volatility: (cov[[i, i]].max(0.0) * periods_per_year).sqrt(),
        })
        .collect(),
    )
  }
}
