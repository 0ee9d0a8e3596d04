//! Yahoo Finance gateway.
//!
//! Fetches daily bars from Yahoo's v8 chart API. The end date is exclusive:
//! `period2` is midnight UTC at the start of the end date, so the last row
//! returned is the trading day before it.
//!
//! Yahoo has no official API. Responses that mean "nothing for this request"
//! come in several shapes (no timestamps, an empty result array, a chart error
//! object on a 4xx) and all of them map to an empty series.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::provider::{DataError, MarketDataGateway};
use crate::domain::{DateRange, PriceBar, PriceSeries, Ticker};

const CHART_ENDPOINT: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

impl ChartError {
    /// Whether the error only says there are no rows for the request.
    fn means_no_data(&self) -> bool {
        let description = self.description.to_ascii_lowercase();
        self.code == "Not Found"
            || description.contains("no data found")
            || description.contains("data doesn't exist")
    }
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance gateway over a blocking HTTP client.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol and an end-exclusive date range.
    pub(crate) fn chart_url(ticker: Ticker, range: DateRange) -> String {
        let period1 = midnight_utc(range.start);
        let period2 = midnight_utc(range.end);
        format!(
            "{CHART_ENDPOINT}/{ticker}\
             ?period1={period1}&period2={period2}&interval=1d\
             &includeAdjustedClose=true&events=div%2Csplits"
        )
    }

    /// Turn a decoded chart response into bars.
    pub(crate) fn parse_response(
        ticker: Ticker,
        resp: ChartResponse,
    ) -> Result<Vec<PriceBar>, DataError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return match resp.chart.error {
                    Some(err) if err.means_no_data() => {
                        debug!(%ticker, code = %err.code, "provider reports no data");
                        Ok(Vec::new())
                    }
                    Some(err) => Err(DataError::ResponseFormatChanged(format!(
                        "{}: {}",
                        err.code, err.description
                    ))),
                    None => Ok(Vec::new()),
                };
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };

        // No timestamps means no trading days in the window.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let bar = PriceBar {
                date,
                open: quote.open.get(i).copied().flatten(),
                high: quote.high.get(i).copied().flatten(),
                low: quote.low.get(i).copied().flatten(),
                close: quote.close.get(i).copied().flatten(),
                adj_close: adj_closes.as_ref().and_then(|v| v.get(i).copied().flatten()),
                volume: quote.volume.get(i).copied().flatten(),
            };

            // Holidays come back as all-null rows.
            if bar.is_blank() {
                continue;
            }
            bars.push(bar);
        }

        Ok(bars)
    }

    fn request(&self, ticker: Ticker, range: DateRange) -> Result<Vec<PriceBar>, DataError> {
        let url = Self::chart_url(ticker, range);
        debug!(%url, "requesting chart");

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                DataError::NetworkUnreachable(format!("request timed out: {e}"))
            } else {
                DataError::NetworkUnreachable(e.to_string())
            }
        })?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        Self::decode_body(ticker, status, &body)
    }

    /// Classify a chart API answer by HTTP status and body.
    pub(crate) fn decode_body(
        ticker: Ticker,
        status: StatusCode,
        body: &str,
    ) -> Result<Vec<PriceBar>, DataError> {
        if !status.is_success() {
            // Yahoo answers "no data" with a 4xx carrying a chart error body.
            if let Ok(chart) = serde_json::from_str::<ChartResponse>(body) {
                if chart.chart.error.as_ref().is_some_and(ChartError::means_no_data) {
                    return Self::parse_response(ticker, chart);
                }
            }
            return Err(DataError::HttpStatus {
                symbol: ticker.to_string(),
                status: status.as_u16(),
            });
        }

        let chart: ChartResponse = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {ticker}: {e}"))
        })?;

        Self::parse_response(ticker, chart)
    }
}

impl MarketDataGateway for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, ticker: Ticker, range: DateRange) -> Result<PriceSeries, DataError> {
        // End is exclusive, so an inverted or zero-length window has no rows.
        if range.start >= range.end {
            warn!(%ticker, start = %range.start, end = %range.end, "empty date window, skipping request");
            return Ok(PriceSeries::empty(ticker));
        }

        let bars = self.request(ticker, range)?;
        info!(%ticker, rows = bars.len(), "yahoo fetch complete");
        Ok(PriceSeries::new(ticker, bars))
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn parse(json: &str) -> Result<Vec<PriceBar>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response(Ticker::AAPL, resp)
    }

    #[test]
    fn chart_url_uses_midnight_bounds() {
        let range = DateRange::new(d(2015, 1, 1), d(2015, 1, 10));
        let url = YahooProvider::chart_url(Ticker::AAPL, range);
        assert!(url.starts_with("https://query2.finance.yahoo.com/v8/finance/chart/AAPL?"));
        assert!(url.contains("period1=1420070400"));
        assert!(url.contains("period2=1420848000"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn chart_url_keeps_class_share_symbol() {
        let range = DateRange::new(d(2020, 1, 1), d(2020, 2, 1));
        let url = YahooProvider::chart_url(Ticker::BRKB, range);
        assert!(url.contains("/chart/BRK-B?"));
    }

    #[test]
    fn parses_rows_and_skips_blank_days() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1420209000,1420468200,1420554600],
            "indicators":{
                "quote":[{
                    "open":[27.8475,null,26.635],
                    "high":[27.86,null,26.8575],
                    "low":[26.8375,null,26.1575],
                    "close":[27.3325,null,26.565],
                    "volume":[212818400,null,263188400]
                }],
                "adjclose":[{"adjclose":[24.3473,null,23.6636]}]
            }
        }],"error":null}}"#;

        let bars = parse(json).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, d(2015, 1, 2));
        assert_eq!(bars[0].open, Some(27.8475));
        assert_eq!(bars[0].adj_close, Some(24.3473));
        assert_eq!(bars[0].volume, Some(212_818_400));
        assert_eq!(bars[1].date, d(2015, 1, 6));
    }

    #[test]
    fn partial_nulls_are_kept_as_missing_cells() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1420209000],
            "indicators":{"quote":[{
                "open":[27.8475],"high":[null],"low":[26.8375],"close":[27.3325],"volume":[100]
            }]}
        }],"error":null}}"#;

        let bars = parse(json).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].high, None);
        assert_eq!(bars[0].adj_close, None);
    }

    #[test]
    fn missing_timestamps_mean_empty() {
        let json = r#"{"chart":{"result":[{"indicators":{"quote":[{}],"adjclose":[{}]}}],"error":null}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn no_data_error_means_empty() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Data doesn't exist for startDate = 1893456000, endDate = 1893542400"}}}"#;
        assert!(parse(json).unwrap().is_empty());

        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn other_chart_errors_propagate() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Internal Server Error","description":"boom"}}}"#;
        match parse(json) {
            Err(DataError::ResponseFormatChanged(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected ResponseFormatChanged, got {other:?}"),
        }
    }

    #[test]
    fn bad_request_without_data_is_empty() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Data doesn't exist for startDate = 1893456000, endDate = 1893542400"}}}"#;
        let bars = YahooProvider::decode_body(Ticker::TSLA, StatusCode::BAD_REQUEST, body).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn not_found_is_empty() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let bars = YahooProvider::decode_body(Ticker::AAPL, StatusCode::NOT_FOUND, body).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn server_error_is_http_status() {
        let body = "<html>Internal Server Error</html>";
        match YahooProvider::decode_body(Ticker::V, StatusCode::INTERNAL_SERVER_ERROR, body) {
            Err(DataError::HttpStatus { symbol, status }) => {
                assert_eq!(symbol, "V");
                assert_eq!(status, 500);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn client_error_with_other_chart_error_is_http_status() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Unprocessable Entity","description":"Invalid interval"}}}"#;
        let err = YahooProvider::decode_body(Ticker::AAPL, StatusCode::UNPROCESSABLE_ENTITY, body)
            .unwrap_err();
        assert!(matches!(err, DataError::HttpStatus { status: 422, .. }));
    }

    #[test]
    fn success_with_garbage_body_is_format_change() {
        let err = YahooProvider::decode_body(Ticker::BRKB, StatusCode::OK, "not json").unwrap_err();
        match err {
            DataError::ResponseFormatChanged(msg) => assert!(msg.contains("BRK-B")),
            other => panic!("expected ResponseFormatChanged, got {other:?}"),
        }
    }

    #[test]
    fn success_body_is_parsed() {
        let body = r#"{"chart":{"result":[{
            "timestamp":[1420209000],
            "indicators":{"quote":[{
                "open":[27.8475],"high":[27.86],"low":[26.8375],"close":[27.3325],"volume":[212818400]
            }]}
        }],"error":null}}"#;
        let bars = YahooProvider::decode_body(Ticker::AAPL, StatusCode::OK, body).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, d(2015, 1, 2));
    }

    #[test]
    fn empty_window_skips_request() {
        let provider = YahooProvider::new(Duration::from_secs(1)).unwrap();
        let same_day = DateRange::new(d(2020, 1, 1), d(2020, 1, 1));
        assert!(provider.fetch(Ticker::TSLA, same_day).unwrap().is_empty());

        let inverted = DateRange::new(d(2020, 1, 2), d(2020, 1, 1));
        let series = provider.fetch(Ticker::TSLA, inverted).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.ticker, Ticker::TSLA);
    }
}
