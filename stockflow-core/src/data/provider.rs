//! Market data gateway trait and structured error types.
//!
//! The gateway abstracts over the remote provider so the fetch workflow can be
//! driven by the Yahoo client in production and by a scripted gateway in tests.

use thiserror::Error;

use crate::domain::{DateRange, PriceSeries, Ticker};

/// Failures reported by a gateway.
///
/// An empty result is not one of them: "no data for this range" is an `Ok`
/// with an empty [`PriceSeries`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("provider returned HTTP {status} for {symbol}")]
    HttpStatus { symbol: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Black-box retrieval interface of the market data provider.
pub trait MarketDataGateway: Send + Sync {
    /// Human-readable name of this gateway.
    fn name(&self) -> &str;

    /// Fetch daily bars for `ticker` over `range`.
    ///
    /// Returns an empty series when the provider has no rows for the request.
    fn fetch(&self, ticker: Ticker, range: DateRange) -> Result<PriceSeries, DataError>;
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, ticker: Ticker, range: DateRange) -> Result<PriceSeries, DataError> {
        (**self).fetch(ticker, range)
    }
}

impl<G: MarketDataGateway + ?Sized> MarketDataGateway for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, ticker: Ticker, range: DateRange) -> Result<PriceSeries, DataError> {
        (**self).fetch(ticker, range)
    }
}
