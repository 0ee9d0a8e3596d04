//! StockFlow TUI: terminal dashboard for fetching and exporting stock data.
//!
//! Sections:
//! 1. Fetch Stock Data: ticker and date pickers, fetch, table preview, CSV download
//! 2. About Me: static description

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;
