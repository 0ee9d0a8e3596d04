//! StockFlow Core: the fetch-and-export workflow behind the dashboard.
//!
//! - Domain types: the ticker allow-list, date ranges, daily bars and series
//! - The market data gateway trait and its Yahoo Finance implementation
//! - CSV export artifacts and their decoder
//! - The result state machine (idle / empty / populated)
//! - Application configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod workflow;

pub use config::{AppConfig, ConfigError, PageLayout, SidebarState};
pub use data::{DataError, ExportArtifact, ExportError, MarketDataGateway, YahooProvider};
pub use domain::{DateRange, PriceBar, PriceSeries, Ticker};
pub use workflow::{FetchError, FetchWorkflow, ResultView, Selection};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types the UI moves between threads are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<Selection>();
        require_sync::<Selection>();
        require_send::<DataError>();
        require_sync::<DataError>();
        require_send::<YahooProvider>();
        require_sync::<YahooProvider>();
        require_send::<Box<dyn MarketDataGateway>>();
    }
}
