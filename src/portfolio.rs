//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Monte Carlo approximation of the Markowitz frontier: random long-only
//! weights, each scored by annualized return, volatility and Sharpe ratio.

pub mod data;
pub mod engine;
pub mod frontier;
pub mod sampler;
pub mod scorer;
pub mod types;

pub use data::AssetStats;
pub use data::PriceSeries;
pub use data::PriceTable;
pub use data::ReturnTable;
pub use engine::FrontierEngine;
pub use engine::FrontierRun;
pub use frontier::aggregate;
pub use frontier::FrontierAggregator;
pub use sampler::WeightSampler;
pub use scorer::score_portfolio;
pub use scorer::PortfolioScorer;
pub use types::FrontierResult;
pub use types::ScoredPortfolio;
pub use types::ZeroVolatilityPolicy;
