//! Ticker allow-list: the fixed set of large-cap equities the picker offers.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Equity symbols offered by the ticker picker, in display order.
#[allow(missing_docs, clippy::upper_case_acronyms)]
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    #[default]
    AAPL,
    MSFT,
    AMZN,
    GOOGL,
    META,
    TSLA,
    #[strum(to_string = "BRK-B")]
    #[serde(rename = "BRK-B")]
    BRKB,
    NVDA,
    JPM,
    V,
    UNH,
    XOM,
    MA,
    HD,
    PG,
    NFLX,
    LLY,
    WMT,
    TSM,
    DIS,
}

impl Ticker {
    /// Every ticker in picker order.
    pub fn all() -> Vec<Ticker> {
        Ticker::iter().collect()
    }

    /// The exchange symbol, as shown to the user and sent to the provider.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Position in the allow-list.
    pub fn index(self) -> usize {
        Ticker::iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Option<Ticker> {
        Ticker::iter().nth(i)
    }

    /// Next ticker in picker order, wrapping at the end.
    pub fn next(self) -> Ticker {
        Ticker::from_index((self.index() + 1) % Ticker::COUNT).unwrap_or(self)
    }

    /// Previous ticker in picker order, wrapping at the start.
    pub fn prev(self) -> Ticker {
        Ticker::from_index((self.index() + Ticker::COUNT - 1) % Ticker::COUNT).unwrap_or(self)
    }

    /// File name of the CSV artifact for this ticker: `AAPL_data.csv`.
    pub fn export_file_name(self) -> String {
        format!("{}_data.csv", self.as_str())
    }
}
