//! Domain types: tickers, date ranges, price bars and series.

pub mod bar;
pub mod date_range;
pub mod series;
pub mod ticker;

pub use bar::PriceBar;
pub use date_range::{DateRange, RangeBound};
pub use series::{PriceSeries, COLUMNS};
pub use ticker::Ticker;
