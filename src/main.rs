//! `markowitz` - simulate random portfolios and print the frontier.
//!
//! ```bash
//! markowitz --assets PG,^GSPC,AAPL --start 2018-01-01 --end 2023-12-31 --samples 2000 --risk-free 0.5
//! markowitz --config run.json --seed 7 --top 20
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use clap::ValueEnum;
use markowitz_mc::portfolio::ZeroVolatilityPolicy;
use markowitz_mc::report;
use markowitz_mc::source::PriceSource;
use markowitz_mc::source::SimulatedSource;
use markowitz_mc::FrontierConfig;
use markowitz_mc::FrontierEngine;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceKind {
  /// Seeded geometric Brownian motion paths.
  Simulated,
  /// Yahoo Finance adjusted closes (needs the `yahoo` feature).
  Yahoo,
}

/// Monte Carlo Markowitz frontier explorer
#[derive(Parser, Debug)]
#[command(name = "markowitz", version, about, long_about = None)]
struct Args {
  /// JSON configuration file; flags below override its fields
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Comma-separated asset identifiers
  #[arg(short, long, value_delimiter = ',')]
  assets: Option<Vec<String>>,

  /// Window start (inclusive), YYYY-MM-DD
  #[arg(long)]
  start: Option<NaiveDate>,

  /// Window end (exclusive), YYYY-MM-DD
  #[arg(long)]
  end: Option<NaiveDate>,

  /// Number of random portfolios
  #[arg(short = 'n', long)]
  samples: Option<usize>,

  /// Annual risk-free rate in percent
  #[arg(short, long)]
  risk_free: Option<f64>,

  /// Return periods per year
  #[arg(long)]
  periods: Option<f64>,

  /// Seed for the weight sampler and the simulated source
  #[arg(long)]
  seed: Option<u64>,

  /// Zero-volatility policy: error | infinite
  #[arg(long)]
  zero_volatility: Option<ZeroVolatilityPolicy>,

  /// Score samples on all cores
  #[arg(long)]
  parallel: bool,

  /// Price source
  #[arg(long, value_enum, default_value_t = SourceKind::Simulated)]
  source: SourceKind,

  /// Portfolio rows to print, best Sharpe first
  #[arg(long, default_value_t = 10)]
  top: usize,

  /// Print the whole run (normalized prices, moments, frontier) as JSON
  #[arg(long)]
  json: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

impl Args {
  fn config(&self) -> Result<FrontierConfig> {
    let mut config = match &self.config {
      Some(path) => {
        let raw = fs::read_to_string(path)
          .with_context(|| format!("reading config {}", path.display()))?;
        FrontierConfig::from_json(&raw)?
      }
      None => FrontierConfig::default(),
    };

    if let Some(assets) = &self.assets {
      config.assets = assets.clone();
    }
    if let Some(start) = self.start {
      config.start_date = start;
    }
    if let Some(end) = self.end {
      config.end_date = end;
    }
    if let Some(n) = self.samples {
      config.sample_count = n;
    }
    if let Some(rf) = self.risk_free {
      config.risk_free_rate = rf;
    }
    if let Some(p) = self.periods {
      config.periods_per_year = p;
    }
    if self.seed.is_some() {
      config.seed = self.seed;
    }
    if let Some(policy) = self.zero_volatility {
      config.zero_volatility = policy;
    }
    config.parallel |= self.parallel;

    config.validate()?;
    Ok(config)
  }
}

fn source(kind: SourceKind, seed: Option<u64>) -> Result<Box<dyn PriceSource>> {
  match kind {
    SourceKind::Simulated => Ok(Box::new(SimulatedSource::demo(seed))),
    #[cfg(feature = "yahoo")]
    SourceKind::Yahoo => Ok(Box::new(markowitz_mc::source::YahooSource::new()?)),
    #[cfg(not(feature = "yahoo"))]
    SourceKind::Yahoo => anyhow::bail!("built without the `yahoo` feature"),
  }
}

fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
    .with_writer(std::io::stderr)
    .init();

  let config = args.config()?;
  let src = source(args.source, config.seed)?;
  let run = FrontierEngine::new(config).run_with_source(src.as_ref())?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&run)?);
  } else {
    println!("{}", report::render(&run, Some(args.top)));
  }
  Ok(())
}
