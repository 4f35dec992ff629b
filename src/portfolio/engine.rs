//! # Frontier Engine
//!
//! $$
//! P \to r \to (\mu, \Sigma) \to \{(\mathbf w_n, \sigma_n, R_n, S_n)\}_{n=1}^N \to \arg\max_n S_n
//! $$
//!
//! High-level orchestration: price table in, frontier out. Every call is a
//! fresh run; the engine holds nothing but its configuration.

use ndarray::Array1;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use serde::Serializer;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::data::AssetStats;
use super::data::PriceTable;
use super::frontier::FrontierAggregator;
use super::sampler::stream_seed;
use super::sampler::WeightSampler;
use super::scorer::PortfolioScorer;
use super::types::FrontierResult;
use super::types::ScoredPortfolio;
use crate::config::FrontierConfig;
use crate::error::FrontierError;
use crate::error::Result;
use crate::source::PriceSource;

/// Samples per generator stream in parallel mode.
pub const PARALLEL_CHUNK: usize = 256;

/// Everything a display layer needs from one run.
#[derive(Clone, Debug, Serialize)]
pub struct FrontierRun {
  /// Prices of the selected window rebased to 100.
  pub normalized: PriceTable,
  /// Mean periodic return per asset.
  #[serde(serialize_with = "vector")]
  pub mean_returns: Array1<f64>,
  /// Sample covariance of periodic returns.
  #[serde(serialize_with = "matrix")]
  pub covariance: Array2<f64>,
  /// Annualized single-asset statistics.
  pub asset_stats: Vec<AssetStats>,
  /// All simulated portfolios.
  pub frontier: FrontierResult,
}

impl FrontierRun {
  pub fn assets(&self) -> &[String] {
    self.normalized.assets()
  }

  pub fn max_sharpe(&self) -> &ScoredPortfolio {
    self.frontier.max_sharpe()
  }
}

fn vector<S: Serializer>(v: &Array1<f64>, s: S) -> std::result::Result<S::Ok, S::Error> {
  s.collect_seq(v.iter())
}

fn matrix<S: Serializer>(m: &Array2<f64>, s: S) -> std::result::Result<S::Ok, S::Error> {
  s.collect_seq(m.rows().into_iter().map(|r| r.to_vec()))
}

/// Single entry point for frontier simulations.
#[derive(Clone, Debug)]
pub struct FrontierEngine {
  config: FrontierConfig,
}

impl FrontierEngine {
  /// Construct a new engine with explicit configuration.
  pub fn new(config: FrontierConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &FrontierConfig {
    &self.config
  }

  /// Fetch prices for the configured window from `source` and run.
  pub fn run_with_source<S: PriceSource + ?Sized>(&self, source: &S) -> Result<FrontierRun> {
    self.config.validate()?;
    let prices = source.fetch(
      &self.config.assets,
      self.config.start_date,
      self.config.end_date,
    )?;
    self.run(&prices)
  }

  /// Run the full pipeline on a price table containing at least the configured assets.
  pub fn run(&self, prices: &PriceTable) -> Result<FrontierRun> {
    let cfg = &self.config;
    cfg.validate()?;
    if !(100..=5000).contains(&cfg.sample_count) {
      warn!(
        sample_count = cfg.sample_count,
        "sample count outside the usual 100..=5000 range"
      );
    }

    let table = prices
      .select(&cfg.assets)?
      .window(cfg.start_date, cfg.end_date);
    if table.is_empty() {
      return Err(FrontierError::data(format!(
        "no prices between {} and {}",
        cfg.start_date, cfg.end_date
      )));
    }
    info!(
      assets = ?cfg.assets,
      dates = table.len(),
      samples = cfg.sample_count,
      "simulating frontier"
    );

    let returns = table.returns()?;
    let mean_returns = returns.mean_returns();
    let covariance = returns.covariance()?;
    let asset_stats = returns.asset_stats(cfg.periods_per_year)?;
    debug!(?mean_returns, ?covariance, "periodic moments");

    let scorer = PortfolioScorer::new(
      mean_returns.clone(),
      covariance.clone(),
      cfg.periods_per_year,
      cfg.risk_free_fraction(),
      cfg.zero_volatility,
    )?;
    let frontier = if cfg.parallel {
      self.simulate_parallel(&scorer)?
    } else {
      self.simulate(&scorer)?
    };

    let best = frontier.max_sharpe();
    info!(
      index = frontier.max_sharpe_index(),
      sharpe = best.sharpe,
      expected_return = best.expected_return,
      volatility = best.volatility,
      "max-Sharpe portfolio"
    );

    Ok(FrontierRun {
      normalized: table.normalized(),
      mean_returns,
      covariance,
      asset_stats,
      frontier,
    })
  }

  /// Sequential sample → score → accumulate loop.
  pub fn simulate(&self, scorer: &PortfolioScorer) -> Result<FrontierResult> {
    let n = self.config.sample_count;
    let sampler = WeightSampler::new(scorer.k(), n, self.config.seed)?;

    let mut agg = FrontierAggregator::with_capacity(n);
    for w in sampler {
      agg.push(scorer.score(w)?);
    }
    agg.finish()
  }

  /// Chunked rayon variant. Each chunk owns a generator stream derived from the
  /// seed and the chunk index, so the result does not depend on thread count.
  pub fn simulate_parallel(&self, scorer: &PortfolioScorer) -> Result<FrontierResult> {
    let n = self.config.sample_count;
    let k = scorer.k();
    let base = self.config.seed.unwrap_or_else(rand::random);
    let n_chunks = n.div_ceil(PARALLEL_CHUNK);

    let chunks = (0..n_chunks)
      .into_par_iter()
      .map(|c| {
        let len = PARALLEL_CHUNK.min(n - c * PARALLEL_CHUNK);
        let rng = StdRng::seed_from_u64(stream_seed(base, c as u64));
        WeightSampler::with_rng(k, len, rng)?
          .map(|w| scorer.score(w))
          .collect::<Result<Vec<_>>>()
      })
      .collect::<Result<Vec<_>>>()?;

    let mut agg = FrontierAggregator::with_capacity(n);
    agg.extend(chunks.into_iter().flatten());
    agg.finish()
  }
}
