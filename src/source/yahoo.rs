//! Yahoo Finance daily adjusted closes (feature `yahoo`).

use chrono::DateTime;
use chrono::NaiveDate;
use time::OffsetDateTime;
use tracing::info;
use tracing::warn;
use yahoo_finance_api as yahoo;

use super::PriceSource;
use crate::error::FrontierError;
use crate::error::Result;
use crate::portfolio::PriceSeries;
use crate::portfolio::PriceTable;

/// Blocking wrapper over the async Yahoo connector.
pub struct YahooSource {
  connector: yahoo::YahooConnector,
}

impl YahooSource {
  pub fn new() -> Result<Self> {
    let connector = yahoo::YahooConnector::new().map_err(|e| FrontierError::Source(e.to_string()))?;
    Ok(Self { connector })
  }

  fn history(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> anyhow::Result<PriceSeries> {
    let from = to_offset(start)?;
    let to = to_offset(end)?;
    let resp = tokio_test::block_on(self.connector.get_quote_history(ticker, from, to))?;
    let quotes = resp.quotes()?;

    let mut points = Vec::with_capacity(quotes.len());
    for q in quotes {
      let Some(ts) = DateTime::from_timestamp(q.timestamp as i64, 0) else {
        warn!(ticker, timestamp = q.timestamp, "skipping quote with bad timestamp");
        continue;
      };
      let date = ts.date_naive();
      if date >= start && date < end {
        points.push((date, q.adjclose));
      }
    }
    Ok(PriceSeries::new(ticker, points))
  }
}

fn to_offset(date: NaiveDate) -> anyhow::Result<OffsetDateTime> {
  let secs = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
  Ok(OffsetDateTime::from_unix_timestamp(secs)?)
}

impl PriceSource for YahooSource {
  fn fetch(&self, assets: &[String], start: NaiveDate, end: NaiveDate) -> Result<PriceTable> {
    let mut series = Vec::with_capacity(assets.len());
    for a in assets {
      let s = self
        .history(a, start, end)
        .map_err(|e| FrontierError::Source(format!("{a}: {e:#}")))?;
      info!(ticker = %a, points = s.points.len(), "downloaded price history");
      series.push(s);
    }
    PriceTable::from_series(&series)
  }
}
