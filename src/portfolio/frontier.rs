//! # Frontier Aggregator
//!
//! $$
//! i^\* = \min\{\,i : S_i = \max_j S_j\,\}
//! $$
//!
//! Single pass over scored samples that keeps them all and remembers the
//! max-Sharpe and min-volatility entries.

use super::types::FrontierResult;
use super::types::ScoredPortfolio;
use crate::error::FrontierError;
use crate::error::Result;

/// Incremental collector of scored portfolios.
#[derive(Clone, Debug, Default)]
pub struct FrontierAggregator {
  portfolios: Vec<ScoredPortfolio>,
  max_sharpe: Option<usize>,
  min_volatility: Option<usize>,
}

/// Strictly better only, so ties keep the earlier sample. NaN never beats a number.
fn beats(candidate: f64, current: f64) -> bool {
  if current.is_nan() {
    !candidate.is_nan()
  } else {
    candidate > current
  }
}

impl FrontierAggregator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(n: usize) -> Self {
    Self {
      portfolios: Vec::with_capacity(n),
      ..Self::default()
    }
  }

  pub fn len(&self) -> usize {
    self.portfolios.len()
  }

  pub fn is_empty(&self) -> bool {
    self.portfolios.is_empty()
  }

  pub fn push(&mut self, portfolio: ScoredPortfolio) {
    let idx = self.portfolios.len();

    let best_sharpe = self
      .max_sharpe
      .map_or(true, |i| beats(portfolio.sharpe, self.portfolios[i].sharpe));
    if best_sharpe {
      self.max_sharpe = Some(idx);
    }

    let lowest_vol = self
      .min_volatility
      .map_or(true, |i| beats(-portfolio.volatility, -self.portfolios[i].volatility));
    if lowest_vol {
      self.min_volatility = Some(idx);
    }

    self.portfolios.push(portfolio);
  }

  pub fn finish(self) -> Result<FrontierResult> {
    match (self.max_sharpe, self.min_volatility) {
      (Some(max_sharpe), Some(min_volatility)) => Ok(FrontierResult {
        portfolios: self.portfolios,
        max_sharpe,
        min_volatility,
      }),
      _ => Err(FrontierError::input("no portfolios to aggregate")),
    }
  }
}

impl Extend<ScoredPortfolio> for FrontierAggregator {
  fn extend<I: IntoIterator<Item = ScoredPortfolio>>(&mut self, iter: I) {
    for p in iter {
      self.push(p);
    }
  }
}

/// Aggregate an ordered sequence of scored portfolios.
pub fn aggregate<I>(portfolios: I) -> Result<FrontierResult>
where
  I: IntoIterator<Item = ScoredPortfolio>,
{
  let iter = portfolios.into_iter();
  let mut agg = FrontierAggregator::with_capacity(iter.size_hint().0);
  agg.extend(iter);
  agg.finish()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sp(volatility: f64, sharpe: f64) -> ScoredPortfolio {
    ScoredPortfolio {
      weights: vec![1.0],
      volatility,
      expected_return: sharpe * volatility,
      sharpe,
    }
  }

  #[test]
  fn picks_highest_sharpe() {
    let res = aggregate(vec![sp(0.2, 0.5), sp(0.3, 1.2), sp(0.1, 0.9)]).unwrap();

    assert_eq!(res.len(), 3);
    assert_eq!(res.max_sharpe_index(), 1);
    assert_eq!(res.max_sharpe().sharpe, 1.2);
    assert_eq!(res.min_volatility_index(), 2);
  }

  #[test]
  fn ties_keep_first_occurrence() {
    let res = aggregate(vec![sp(0.2, 0.7), sp(0.2, 1.0), sp(0.3, 1.0), sp(0.2, 0.1)]).unwrap();
    assert_eq!(res.max_sharpe_index(), 1);
    assert_eq!(res.min_volatility_index(), 0);
  }

  #[test]
  fn single_sample_is_its_own_best() {
    let res = aggregate(vec![sp(0.25, -0.3)]).unwrap();
    assert_eq!(res.max_sharpe_index(), 0);
    assert_eq!(res.min_volatility_index(), 0);
    assert_eq!(res.max_sharpe(), &res.portfolios()[0]);
  }

  #[test]
  fn nan_sharpe_never_wins() {
    let res = aggregate(vec![sp(0.0, f64::NAN), sp(0.1, -2.0), sp(0.1, f64::NAN)]).unwrap();
    assert_eq!(res.max_sharpe_index(), 1);

    let inf = aggregate(vec![sp(0.1, 3.0), sp(0.0, f64::INFINITY)]).unwrap();
    assert_eq!(inf.max_sharpe_index(), 1);
  }

  #[test]
  fn empty_input_is_an_error() {
    assert!(aggregate(Vec::new()).is_err());
    assert!(FrontierAggregator::new().finish().is_err());
  }

  #[test]
  fn keeps_insertion_order() {
    let input = vec![sp(0.3, 0.1), sp(0.1, 0.2), sp(0.2, 0.3)];
    let res = aggregate(input.clone()).unwrap();
    assert_eq!(res.into_portfolios(), input);
  }
}
