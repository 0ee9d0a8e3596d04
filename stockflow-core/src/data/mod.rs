//! Market data retrieval and CSV export.

pub mod export;
pub mod provider;
pub mod yahoo;

pub use export::{decode_csv, encode_csv, ExportArtifact, ExportError, CSV_MIME};
pub use provider::{DataError, MarketDataGateway};
pub use yahoo::YahooProvider;
