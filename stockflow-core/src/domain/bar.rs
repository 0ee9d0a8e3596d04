//! PriceBar: one trading day of a price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV record as returned by the provider.
///
/// Price and volume cells are optional: the provider reports `null` for fields
/// it has no value for, and those cells are exported as empty CSV fields. The
/// serde field names are the export column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: Option<f64>,
    #[serde(rename = "High")]
    pub high: Option<f64>,
    #[serde(rename = "Low")]
    pub low: Option<f64>,
    #[serde(rename = "Close")]
    pub close: Option<f64>,
    #[serde(rename = "Adj Close")]
    pub adj_close: Option<f64>,
    #[serde(rename = "Volume")]
    pub volume: Option<u64>,
}

impl PriceBar {
    /// A bar with every value present.
    pub fn complete(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: f64,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            adj_close: Some(adj_close),
            volume: Some(volume),
        }
    }

    /// True if the provider sent no value at all for this day.
    pub fn is_blank(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
    }

    /// Display cells in column order, date first.
    pub fn display_cells(&self) -> [String; 7] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            price_cell(self.open),
            price_cell(self.high),
            price_cell(self.low),
            price_cell(self.close),
            price_cell(self.adj_close),
            self.volume.map(|v| v.to_string()).unwrap_or_default(),
        ]
    }
}

fn price_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}
