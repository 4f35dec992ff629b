//! # Portfolio Types
//!
//! $$
//! S = \frac{\mathbb E[R_p]-r_f}{\sigma_p}
//! $$
//!
//! Scored samples, the frontier container and the zero-volatility policy.

use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FrontierError;

/// How the scorer treats a portfolio whose volatility is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVolatilityPolicy {
  /// Abort the run with [`FrontierError::DegenerateVolatility`].
  #[default]
  Error,
  /// Keep the sample with an IEEE infinite (or NaN) Sharpe ratio.
  Infinite,
}

impl FromStr for ZeroVolatilityPolicy {
  type Err = FrontierError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "error" | "err" => Ok(Self::Error),
      "infinite" | "inf" | "ieee" => Ok(Self::Infinite),
      other => Err(FrontierError::input(format!(
        "unknown zero-volatility policy '{other}'"
      ))),
    }
  }
}

impl Display for ZeroVolatilityPolicy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ZeroVolatilityPolicy::Error => write!(f, "error"),
      ZeroVolatilityPolicy::Infinite => write!(f, "infinite"),
    }
  }
}

/// One simulated portfolio.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredPortfolio {
  /// Non-negative weights summing to one, in asset order.
  pub weights: Vec<f64>,
  /// Annualized standard deviation of returns.
  pub volatility: f64,
  /// Annualized expected return.
  pub expected_return: f64,
  /// `(expected_return - risk_free) / volatility`.
  pub sharpe: f64,
}

/// Every scored sample in draw order plus the notable entries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrontierResult {
  pub(crate) portfolios: Vec<ScoredPortfolio>,
  pub(crate) max_sharpe: usize,
  pub(crate) min_volatility: usize,
}

impl FrontierResult {
  /// All samples in the order they were drawn.
  pub fn portfolios(&self) -> &[ScoredPortfolio] {
    &self.portfolios
  }

  pub fn len(&self) -> usize {
    self.portfolios.len()
  }

  pub fn is_empty(&self) -> bool {
    self.portfolios.is_empty()
  }

  /// Index of the highest-Sharpe sample (first one on ties).
  pub fn max_sharpe_index(&self) -> usize {
    self.max_sharpe
  }

  pub fn max_sharpe(&self) -> &ScoredPortfolio {
    &self.portfolios[self.max_sharpe]
  }

  /// Index of the lowest-volatility sample (first one on ties).
  pub fn min_volatility_index(&self) -> usize {
    self.min_volatility
  }

  pub fn min_volatility(&self) -> &ScoredPortfolio {
    &self.portfolios[self.min_volatility]
  }

  pub fn into_portfolios(self) -> Vec<ScoredPortfolio> {
    self.portfolios
  }
}
