//! # Price Sources
//!
//! $$
//! \{(t, P_{i,t})\}_{t\in[t_0,t_1)} \mapsto \text{aligned table}
//! $$
//!
//! The market-data collaborator. A source returns a fully materialized,
//! date-aligned table of adjusted closes before any simulation starts.

use chrono::NaiveDate;

use crate::error::Result;
use crate::portfolio::PriceTable;

pub mod memory;
pub mod simulated;
#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use memory::InMemorySource;
pub use simulated::SimulatedAsset;
pub use simulated::SimulatedSource;
#[cfg(feature = "yahoo")]
pub use yahoo::YahooSource;

/// Provider of adjusted close prices.
pub trait PriceSource {
  /// Aligned adjusted closes of `assets` (in that column order) for `[start, end)`.
  fn fetch(&self, assets: &[String], start: NaiveDate, end: NaiveDate) -> Result<PriceTable>;
}
