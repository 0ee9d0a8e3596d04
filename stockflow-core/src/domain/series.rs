//! PriceSeries: the table returned by one fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bar::PriceBar;
use super::ticker::Ticker;

/// Column headers in display and export order. `Date` is the index column.
pub const COLUMNS: [&str; 7] = ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"];

/// Daily price table for one ticker, indexed by trading date.
///
/// A series is created fresh by every fetch and may be empty when the
/// provider has nothing for the requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, ordering bars by date.
    pub fn new(ticker: Ticker, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { ticker, bars }
    }

    pub fn empty(ticker: Ticker) -> Self {
        Self {
            ticker,
            bars: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of trading-day rows.
    pub fn row_count(&self) -> usize {
        self.bars.len()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// First and last trading dates, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.bars.first()?;
        let last = self.bars.last()?;
        Some((first.date, last.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32) -> PriceBar {
        PriceBar::complete(
            NaiveDate::from_ymd_opt(2015, 1, day).unwrap(),
            10.0,
            11.0,
            9.0,
            10.5,
            10.5,
            1_000,
        )
    }

    #[test]
    fn new_orders_by_date() {
        let series = PriceSeries::new(Ticker::AAPL, vec![bar(6), bar(2), bar(5)]);
        let days: Vec<u32> = series.bars.iter().map(|b| chrono::Datelike::day(&b.date)).collect();
        assert_eq!(days, vec![2, 5, 6]);
        assert_eq!(series.row_count(), 3);
    }

    #[test]
    fn empty_series_has_no_span() {
        let series = PriceSeries::empty(Ticker::TSLA);
        assert!(series.is_empty());
        assert_eq!(series.date_span(), None);
        assert_eq!(series.columns().len(), 7);
    }

    #[test]
    fn date_span_covers_first_and_last() {
        let series = PriceSeries::new(Ticker::MSFT, vec![bar(2), bar(9)]);
        let (first, last) = series.date_span().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2015, 1, 2).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2015, 1, 9).unwrap());
    }
}
