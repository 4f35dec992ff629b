//! # Portfolio Scorer
//!
//! $$
//! R_p = P\,\mathbf w^\top\mu,\qquad
//! \sigma_p = \sqrt{P\,\mathbf w^\top \Sigma \mathbf w},\qquad
//! S_p = \frac{R_p - r_f}{\sigma_p}
//! $$
//!
//! Annualized return, volatility and Sharpe ratio of a weight vector.

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;

use super::types::ScoredPortfolio;
use super::types::ZeroVolatilityPolicy;
use crate::error::FrontierError;
use crate::error::Result;

/// Annualized volatility at or below this is treated as zero.
pub const ZERO_VOLATILITY_EPS: f64 = 1e-12;

/// Scores weight vectors against fixed periodic moments.
#[derive(Clone, Debug)]
pub struct PortfolioScorer {
  mean_returns: Array1<f64>,
  covariance: Array2<f64>,
  periods_per_year: f64,
  risk_free: f64,
  policy: ZeroVolatilityPolicy,
}

impl PortfolioScorer {
  /// `risk_free` is an annual fraction (0.005 for 0.5%).
  pub fn new(
    mean_returns: Array1<f64>,
    covariance: Array2<f64>,
    periods_per_year: f64,
    risk_free: f64,
    policy: ZeroVolatilityPolicy,
  ) -> Result<Self> {
    let k = mean_returns.len();
    if k == 0 {
      return Err(FrontierError::input("mean return vector is empty"));
    }
    if covariance.dim() != (k, k) {
      let (r, c) = covariance.dim();
      return Err(FrontierError::input(format!(
        "covariance matrix is {r}x{c}, expected {k}x{k}"
      )));
    }
    if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
      return Err(FrontierError::input("periods per year must be > 0"));
    }

    Ok(Self {
      mean_returns,
      covariance,
      periods_per_year,
      risk_free,
      policy,
    })
  }

  /// Number of assets the scorer expects per weight vector.
  pub fn k(&self) -> usize {
    self.mean_returns.len()
  }

  pub fn mean_returns(&self) -> &Array1<f64> {
    &self.mean_returns
  }

  pub fn covariance(&self) -> &Array2<f64> {
    &self.covariance
  }

  /// Score a weight vector, taking ownership of it.
  pub fn score(&self, weights: Vec<f64>) -> Result<ScoredPortfolio> {
    if weights.len() != self.k() {
      return Err(FrontierError::input(format!(
        "weight vector has {} entries, expected {}",
        weights.len(),
        self.k()
      )));
    }

    let w = ArrayView1::from(&weights[..]);
    let expected_return = self.periods_per_year * w.dot(&self.mean_returns);
    // round-off can push a PSD quadratic form slightly below zero
    let variance = (self.periods_per_year * w.dot(&self.covariance.dot(&w))).max(0.0);
    let volatility = variance.sqrt();

    let sharpe = if volatility <= ZERO_VOLATILITY_EPS {
      match self.policy {
        ZeroVolatilityPolicy::Error => {
          return Err(FrontierError::DegenerateVolatility { expected_return });
        }
        ZeroVolatilityPolicy::Infinite => (expected_return - self.risk_free) / 0.0,
      }
    } else {
      (expected_return - self.risk_free) / volatility
    };

    Ok(ScoredPortfolio {
      weights,
      volatility,
      expected_return,
      sharpe,
    })
  }
}

/// One-shot convenience wrapper around [`PortfolioScorer`].
pub fn score_portfolio(
  weights: &[f64],
  mean_returns: &Array1<f64>,
  covariance: &Array2<f64>,
  periods_per_year: f64,
  risk_free: f64,
  policy: ZeroVolatilityPolicy,
) -> Result<ScoredPortfolio> {
  PortfolioScorer::new(
    mean_returns.clone(),
    covariance.clone(),
    periods_per_year,
    risk_free,
    policy,
  )?
  .score(weights.to_vec())
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn matches_closed_form() {
    let mu = array![0.001, 0.0005];
    let cov = array![[0.0004, 0.0001], [0.0001, 0.0002]];
    let w = [0.6, 0.4];

    let p = score_portfolio(&w, &mu, &cov, 252.0, 0.02, ZeroVolatilityPolicy::Error).unwrap();

    let ret: f64 = 252.0 * (0.6 * 0.001 + 0.4 * 0.0005);
    let var: f64 = 0.36 * 0.0004 + 2.0 * 0.24 * 0.0001 + 0.16 * 0.0002;
    let vol = (252.0 * var).sqrt();
    assert_abs_diff_eq!(p.expected_return, ret, epsilon = 1e-12);
    assert_abs_diff_eq!(p.volatility, vol, epsilon = 1e-12);
    assert_abs_diff_eq!(p.sharpe, (ret - 0.02) / vol, epsilon = 1e-10);
    assert_eq!(p.weights, vec![0.6, 0.4]);
  }

  #[test]
  fn single_asset_annualizes_moments() {
    let mu = array![0.0008];
    let cov = array![[0.00025]];
    let p = score_portfolio(&[1.0], &mu, &cov, 252.0, 0.0, ZeroVolatilityPolicy::Error).unwrap();

    assert_abs_diff_eq!(p.expected_return, 252.0 * 0.0008, epsilon = 1e-12);
    assert_abs_diff_eq!(p.volatility, (252.0f64 * 0.00025).sqrt(), epsilon = 1e-12);
  }

  #[test]
  fn zero_variance_is_an_error_by_default() {
    let mu = array![0.01, 0.01];
    let cov = Array2::<f64>::zeros((2, 2));
    let err =
      score_portfolio(&[0.5, 0.5], &mu, &cov, 252.0, 0.0, ZeroVolatilityPolicy::Error).unwrap_err();

    match err {
      FrontierError::DegenerateVolatility { expected_return } => {
        assert_abs_diff_eq!(expected_return, 2.52, epsilon = 1e-12)
      }
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn zero_variance_is_infinite_under_ieee_policy() {
    let mu = array![0.01];
    let cov = array![[0.0]];
    let p = score_portfolio(&[1.0], &mu, &cov, 252.0, 0.0, ZeroVolatilityPolicy::Infinite).unwrap();
    assert_eq!(p.volatility, 0.0);
    assert_eq!(p.sharpe, f64::INFINITY);

    let neg = score_portfolio(&[1.0], &mu, &cov, 252.0, 5.0, ZeroVolatilityPolicy::Infinite).unwrap();
    assert_eq!(neg.sharpe, f64::NEG_INFINITY);
  }

  #[test]
  fn dimension_mismatch_is_rejected() {
    let mu = array![0.01, 0.02];
    let cov = array![[1.0, 0.0], [0.0, 1.0]];
    assert!(matches!(
      score_portfolio(&[1.0], &mu, &cov, 252.0, 0.0, ZeroVolatilityPolicy::Error),
      Err(FrontierError::Input { .. })
    ));

    let bad_cov = array![[1.0]];
    assert!(PortfolioScorer::new(mu, bad_cov, 252.0, 0.0, ZeroVolatilityPolicy::Error).is_err());
  }

  #[test]
  fn volatility_is_never_negative() {
    // slightly non-PSD from round-off
    let mu = array![0.0, 0.0];
    let cov = array![[1e-20, -1.0000001e-20], [-1.0000001e-20, 1e-20]];
    let p = score_portfolio(&[0.5, 0.5], &mu, &cov, 252.0, 0.0, ZeroVolatilityPolicy::Infinite).unwrap();
    assert!(p.volatility >= 0.0);
  }
}
