//! # Errors
//!
//! Every failure of a frontier run is terminal for that parameter set: nothing
//! is retried, the error is surfaced to the caller.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FrontierError>;

/// Errors raised while building or scoring a frontier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrontierError {
  /// Invalid user input (empty asset set, inverted date range, zero samples, ...).
  #[error("invalid input: {reason}")]
  Input {
    /// Description of the invalid input.
    reason: String,
  },

  /// Price data is empty, misaligned or otherwise unusable.
  #[error("invalid price data: {reason}")]
  Data {
    /// Description of the data problem.
    reason: String,
  },

  /// Too few aligned observations (prices or return periods).
  #[error("insufficient data: need at least {required} observations, got {actual}")]
  InsufficientData {
    /// Minimum number of observations.
    required: usize,
    /// Number of observations available.
    actual: usize,
  },

  /// Portfolio volatility is exactly zero so the Sharpe ratio is undefined.
  #[error("degenerate volatility: zero-variance portfolio (annualized return {expected_return:.6})")]
  DegenerateVolatility {
    /// Annualized return of the offending portfolio.
    expected_return: f64,
  },

  /// The price source collaborator failed.
  #[error("price source failed: {0}")]
  Source(String),
}

impl FrontierError {
  pub(crate) fn input(reason: impl Into<String>) -> Self {
    Self::Input {
      reason: reason.into(),
    }
  }

  pub(crate) fn data(reason: impl Into<String>) -> Self {
    Self::Data {
      reason: reason.into(),
    }
  }
}
