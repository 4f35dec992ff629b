//! # markowitz-mc
//!
//! $$
//! \max_{\mathbf w \in \Delta^{k-1}} \frac{P\,\mathbf w^\top\mu - r_f}{\sqrt{P\,\mathbf w^\top\Sigma\mathbf w}}
//! \quad\text{approximated by sampling}
//! $$
//!
//! Monte Carlo exploration of the Markowitz efficient frontier.
//!
//! ## Modules
//!
//! | Module        | Description                                                                 |
//! |---------------|-----------------------------------------------------------------------------|
//! | [`config`]    | Immutable run parameters ([`FrontierConfig`]).                              |
//! | [`error`]     | [`FrontierError`] taxonomy.                                                 |
//! | [`portfolio`] | Price tables, returns, weight sampling, scoring, aggregation and the engine. |
//! | [`source`]    | Price source collaborators (in-memory, simulated GBM, Yahoo behind `yahoo`). |
//! | [`report`]    | Terminal tables of a run.                                                   |
//!
//! ## Features
//!
//! - `yahoo`: enables `source::YahooSource` backed by `yahoo_finance_api`
//!
//! ## Example Usage
//!
//! ```rust
//! use markowitz_mc::FrontierConfig;
//! use markowitz_mc::FrontierEngine;
//! use markowitz_mc::source::SimulatedSource;
//!
//! let config = FrontierConfig {
//!   sample_count: 500,
//!   seed: Some(42),
//!   ..Default::default()
//! };
//! let run = FrontierEngine::new(config)
//!   .run_with_source(&SimulatedSource::demo(Some(1)))
//!   .unwrap();
//! assert_eq!(run.frontier.len(), 500);
//! ```

pub mod config;
pub mod error;
pub mod portfolio;
pub mod report;
pub mod source;

pub use config::FrontierConfig;
pub use error::FrontierError;
pub use error::Result;
pub use portfolio::FrontierEngine;
pub use portfolio::FrontierResult;
pub use portfolio::FrontierRun;
pub use portfolio::ScoredPortfolio;
