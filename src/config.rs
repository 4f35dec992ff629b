//! # Configuration
//!
//! $$
//! r_f = \frac{\text{risk\_free\_rate}}{100}
//! $$
//!
//! Immutable run parameters handed to [`crate::FrontierEngine`]. A change of any
//! field means a fresh run; nothing is carried over between runs.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::error::FrontierError;
use crate::error::Result;
use crate::portfolio::ZeroVolatilityPolicy;

/// Trading days per year for daily data.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Runtime configuration for a frontier run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierConfig {
  /// Asset identifiers (ticker symbols), in output column order.
  pub assets: Vec<String>,
  /// First date of the price window (inclusive).
  pub start_date: NaiveDate,
  /// Last date of the price window (exclusive).
  pub end_date: NaiveDate,
  /// Number of random portfolios to draw.
  pub sample_count: usize,
  /// Annual risk-free rate in percent.
  pub risk_free_rate: f64,
  /// Return periods per year used to annualize statistics.
  pub periods_per_year: f64,
  /// Seed for the weight sampler; `None` draws from OS entropy.
  pub seed: Option<u64>,
  /// What to do with zero-volatility portfolios.
  pub zero_volatility: ZeroVolatilityPolicy,
  /// Score samples on the rayon pool.
  pub parallel: bool,
}

impl Default for FrontierConfig {
  fn default() -> Self {
    Self {
      assets: vec!["PG".to_string(), "^GSPC".to_string()],
      start_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
      end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
      sample_count: 1000,
      risk_free_rate: 0.5,
      periods_per_year: TRADING_DAYS_PER_YEAR,
      seed: None,
      zero_volatility: ZeroVolatilityPolicy::Error,
      parallel: false,
    }
  }
}

impl FrontierConfig {
  /// Parse a configuration from JSON. Missing fields fall back to [`Default`].
  pub fn from_json(s: &str) -> Result<Self> {
    let config: Self =
      serde_json::from_str(s).map_err(|e| FrontierError::input(format!("config: {e}")))?;
    config.validate()?;
    Ok(config)
  }

  /// Risk-free rate as an annual fraction.
  pub fn risk_free_fraction(&self) -> f64 {
    self.risk_free_rate / 100.0
  }

  /// Check the parameters before any data is touched.
  pub fn validate(&self) -> Result<()> {
    if self.assets.is_empty() {
      return Err(FrontierError::input("asset set is empty"));
    }
    if let Some(blank) = self.assets.iter().position(|a| a.trim().is_empty()) {
      return Err(FrontierError::input(format!(
        "asset identifier at position {blank} is blank"
      )));
    }
    for (i, a) in self.assets.iter().enumerate() {
      if self.assets[..i].contains(a) {
        return Err(FrontierError::input(format!("asset {a} selected twice")));
      }
    }
    if self.end_date <= self.start_date {
      return Err(FrontierError::input(format!(
        "end date {} is not after start date {}",
        self.end_date, self.start_date
      )));
    }
    if self.sample_count == 0 {
      return Err(FrontierError::input("sample count must be > 0"));
    }
    if !self.risk_free_rate.is_finite() {
      return Err(FrontierError::input("risk-free rate must be finite"));
    }
    if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
      return Err(FrontierError::input("periods per year must be > 0"));
    }
    Ok(())
  }
}
