//! Fetch-and-export workflow.
//!
//! One explicit trigger produces exactly one gateway call. The result view
//! starts `Idle`, is reset to `Idle` when a trigger begins, and settles into
//! `EmptyResult` or `Populated` when the call returns. Only a populated view
//! can be exported.
//!
//! The trigger is split into [`FetchWorkflow::begin`] and
//! [`FetchWorkflow::complete`] so a UI can run the blocking call on a worker
//! thread; [`FetchWorkflow::trigger`] does both in place.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::data::{DataError, ExportArtifact, ExportError, MarketDataGateway};
use crate::domain::{DateRange, PriceSeries, Ticker};

pub const FETCHING_MESSAGE: &str = "Fetching data... please wait.";
pub const SUCCESS_MESSAGE: &str = "Data fetched successfully!";
pub const EMPTY_RESULT_WARNING: &str = "No data available for the selected date range!";

/// The inputs handed to the gateway when the user triggers a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub ticker: Ticker,
    pub range: DateRange,
}

impl Selection {
    pub fn new(ticker: Ticker, range: DateRange) -> Self {
        Self { ticker, range }
    }
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultView {
    /// No fetch has completed for the current selection.
    #[default]
    Idle,
    /// The fetch completed with zero rows.
    EmptyResult { selection: Selection },
    /// The fetch completed with at least one row.
    Populated {
        selection: Selection,
        series: PriceSeries,
    },
}

impl ResultView {
    /// Settle a completed fetch into the matching state.
    pub fn resolve(selection: Selection, series: PriceSeries) -> Self {
        if series.is_empty() {
            ResultView::EmptyResult { selection }
        } else {
            ResultView::Populated { selection, series }
        }
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            ResultView::Populated { series, .. } => Some(series),
            _ => None,
        }
    }

    /// Export is offered only when there are rows to export.
    pub fn can_export(&self) -> bool {
        matches!(self, ResultView::Populated { .. })
    }

    /// User-facing message for this state.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ResultView::Idle => None,
            ResultView::EmptyResult { .. } => Some(EMPTY_RESULT_WARNING),
            ResultView::Populated { .. } => Some(SUCCESS_MESSAGE),
        }
    }

    /// Serialize the held series into a CSV artifact.
    pub fn export(&self) -> Result<ExportArtifact, ExportError> {
        match self {
            ResultView::Populated { series, .. } => ExportArtifact::from_series(series),
            _ => Err(ExportError::NothingToExport),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("a fetch is already in progress")]
    Busy,

    #[error("no fetch is in progress")]
    NotStarted,

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Owner of the single most recent result.
#[derive(Debug, Default)]
pub struct FetchWorkflow {
    view: ResultView,
    pending: Option<Selection>,
}

impl FetchWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// The selection currently being fetched.
    pub fn pending(&self) -> Option<Selection> {
        self.pending
    }

    /// Start a fetch: drop the previous result and mark `selection` in flight.
    pub fn begin(&mut self, selection: Selection) -> Result<Selection, FetchError> {
        if self.pending.is_some() {
            return Err(FetchError::Busy);
        }
        if selection.range.is_inverted() {
            warn!(
                ticker = %selection.ticker,
                start = %selection.range.start,
                end = %selection.range.end,
                "start date is after end date, passing range through to the gateway"
            );
        }
        info!(
            ticker = %selection.ticker,
            start = %selection.range.start,
            end = %selection.range.end,
            days = selection.range.span_days(),
            "fetch triggered"
        );
        self.view = ResultView::Idle;
        self.pending = Some(selection);
        Ok(selection)
    }

    /// Finish the in-flight fetch with the gateway's answer.
    ///
    /// A gateway error leaves the view `Idle` and is handed back untranslated.
    pub fn complete(
        &mut self,
        result: Result<PriceSeries, DataError>,
    ) -> Result<&ResultView, FetchError> {
        let selection = self.pending.take().ok_or(FetchError::NotStarted)?;
        match result {
            Ok(series) => {
                if series.is_empty() {
                    warn!(ticker = %selection.ticker, "fetch returned no rows");
                } else {
                    info!(ticker = %selection.ticker, rows = series.row_count(), "fetch returned rows");
                }
                self.view = ResultView::resolve(selection, series);
                Ok(&self.view)
            }
            Err(e) => {
                error!(ticker = %selection.ticker, error = %e, "fetch failed");
                Err(FetchError::Data(e))
            }
        }
    }

    /// Run one fetch to completion on the calling thread.
    pub fn trigger<G: MarketDataGateway + ?Sized>(
        &mut self,
        gateway: &G,
        selection: Selection,
    ) -> Result<&ResultView, FetchError> {
        let selection = self.begin(selection)?;
        let result = gateway.fetch(selection.ticker, selection.range);
        self.complete(result)
    }

    /// Forget the current result after the selection changed.
    ///
    /// Ignored while a fetch is in flight.
    pub fn reset(&mut self) {
        if self.pending.is_none() {
            self.view = ResultView::Idle;
        }
    }

    pub fn export(&self) -> Result<ExportArtifact, ExportError> {
        self.view.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn selection() -> Selection {
        Selection::new(Ticker::AAPL, DateRange::new(d(2015, 1, 1), d(2015, 1, 10)))
    }

    fn one_row() -> PriceSeries {
        PriceSeries::new(
            Ticker::AAPL,
            vec![PriceBar::complete(d(2015, 1, 2), 1.0, 2.0, 0.5, 1.5, 1.5, 10)],
        )
    }

    #[test]
    fn starts_idle_without_export() {
        let wf = FetchWorkflow::new();
        assert_eq!(wf.view(), &ResultView::Idle);
        assert!(!wf.view().can_export());
        assert!(matches!(wf.export(), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn begin_clears_previous_result() {
        let mut wf = FetchWorkflow::new();
        wf.begin(selection()).unwrap();
        wf.complete(Ok(one_row())).unwrap();
        assert!(wf.view().can_export());

        wf.begin(selection()).unwrap();
        assert_eq!(wf.view(), &ResultView::Idle);
        assert!(wf.is_fetching());
    }

    #[test]
    fn second_begin_while_in_flight_is_refused() {
        let mut wf = FetchWorkflow::new();
        wf.begin(selection()).unwrap();
        assert!(matches!(wf.begin(selection()), Err(FetchError::Busy)));
    }

    #[test]
    fn complete_without_begin_is_refused() {
        let mut wf = FetchWorkflow::new();
        assert!(matches!(
            wf.complete(Ok(one_row())),
            Err(FetchError::NotStarted)
        ));
    }

    #[test]
    fn gateway_error_leaves_view_idle() {
        let mut wf = FetchWorkflow::new();
        wf.begin(selection()).unwrap();
        let err = wf
            .complete(Err(DataError::NetworkUnreachable("down".into())))
            .unwrap_err();
        assert!(matches!(err, FetchError::Data(DataError::NetworkUnreachable(_))));
        assert_eq!(wf.view(), &ResultView::Idle);
        assert!(!wf.is_fetching());
    }

    #[test]
    fn reset_is_ignored_while_fetching() {
        let mut wf = FetchWorkflow::new();
        wf.begin(selection()).unwrap();
        wf.reset();
        assert!(wf.is_fetching());
        wf.complete(Ok(one_row())).unwrap();
        wf.reset();
        assert_eq!(wf.view(), &ResultView::Idle);
    }

    #[test]
    fn messages_follow_state() {
        assert_eq!(ResultView::Idle.message(), None);
        let empty = ResultView::resolve(selection(), PriceSeries::empty(Ticker::AAPL));
        assert_eq!(empty.message(), Some(EMPTY_RESULT_WARNING));
        let full = ResultView::resolve(selection(), one_row());
        assert_eq!(full.message(), Some(SUCCESS_MESSAGE));
    }
}
