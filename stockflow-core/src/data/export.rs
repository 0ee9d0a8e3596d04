//! CSV export of a fetched price series.
//!
//! The artifact has a header row, the `Date` index column first and the OHLCV
//! columns after it. Missing cells are empty fields. Floats are written in
//! their shortest round-trip form, so decoding an artifact gives back the
//! series it was made from.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{PriceBar, PriceSeries, Ticker, COLUMNS};

/// MIME type of the export artifact.
pub const CSV_MIME: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: no populated result is held")]
    NothingToExport,

    #[error("CSV encoding failed: {0}")]
    Encode(String),

    #[error("CSV decoding failed: {0}")]
    Decode(String),

    #[error("unexpected CSV header: expected {expected:?}, found {found:?}")]
    Header {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A downloadable CSV rendering of one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub content: String,
}

impl ExportArtifact {
    /// Serialize `series` into an artifact named after its ticker.
    pub fn from_series(series: &PriceSeries) -> Result<Self, ExportError> {
        Ok(Self {
            file_name: series.ticker.export_file_name(),
            mime: CSV_MIME,
            content: encode_csv(series)?,
        })
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Write the artifact into `dir` under its file name, creating `dir` if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Encode a series as CSV text with a header row.
pub fn encode_csv(series: &PriceSeries) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written explicitly so an empty series still gets its header row.
    writer
        .write_record(COLUMNS)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    for bar in &series.bars {
        writer
            .serialize(bar)
            .map_err(|e| ExportError::Encode(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encode(e.to_string()))
}

/// Decode CSV text produced by [`encode_csv`] back into a series for `ticker`.
pub fn decode_csv(ticker: Ticker, content: &str) -> Result<PriceSeries, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ExportError::Decode(e.to_string()))?;
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(ExportError::Header {
            expected: COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: headers.iter().map(String::from).collect(),
        });
    }

    let bars = reader
        .deserialize::<PriceBar>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ExportError::Decode(e.to_string()))?;

    Ok(PriceSeries { ticker, bars })
}

impl PriceSeries {
    /// Build the CSV export artifact for this series.
    pub fn to_artifact(&self) -> Result<ExportArtifact, ExportError> {
        ExportArtifact::from_series(self)
    }

    /// Reconstruct a series from an exported CSV artifact.
    pub fn from_csv(ticker: Ticker, content: &str) -> Result<Self, ExportError> {
        decode_csv(ticker, content)
    }
}
