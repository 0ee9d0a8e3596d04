//! Application state: single-owner, main-thread only.
//!
//! All dashboard state lives here. The fetch worker communicates via channels.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDate;
use tracing::{error, info, warn};

use stockflow_core::config::{AppConfig, SidebarState};
use stockflow_core::domain::date_range::{shift_days, shift_months};
use stockflow_core::domain::{DateRange, RangeBound, Ticker};
use stockflow_core::workflow::{FetchWorkflow, ResultView, Selection, FETCHING_MESSAGE};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which sidebar section is shown in the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    FetchStockData,
    AboutMe,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::FetchStockData, Section::AboutMe];

    pub fn label(self) -> &'static str {
        match self {
            Section::FetchStockData => "Fetch Stock Data",
            Section::AboutMe => "About Me",
        }
    }

    pub fn next(self) -> Section {
        match self {
            Section::FetchStockData => Section::AboutMe,
            Section::AboutMe => Section::FetchStockData,
        }
    }
}

/// Input control with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ticker,
    StartDate,
    EndDate,
}

impl Field {
    pub fn next(self) -> Field {
        match self {
            Field::Ticker => Field::StartDate,
            Field::StartDate => Field::EndDate,
            Field::EndDate => Field::EndDate,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::Ticker => Field::Ticker,
            Field::StartDate => Field::Ticker,
            Field::EndDate => Field::StartDate,
        }
    }

    /// The range bound a date field edits.
    pub fn bound(self) -> Option<RangeBound> {
        match self {
            Field::Ticker => None,
            Field::StartDate => Some(RangeBound::Start),
            Field::EndDate => Some(RangeBound::End),
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Typing a date for one end of the range.
    DateEntry { bound: RangeBound, input: String },
    Help,
}

/// Ticker and date pickers.
#[derive(Debug, Clone)]
pub struct InputState {
    pub ticker: Ticker,
    pub range: DateRange,
    pub focus: Field,
}

impl InputState {
    pub fn new(default_start: NaiveDate, today: NaiveDate) -> Self {
        Self {
            ticker: Ticker::default(),
            range: DateRange::default_for(default_start, today),
            focus: Field::Ticker,
        }
    }

    pub fn date(&self, bound: RangeBound) -> NaiveDate {
        match bound {
            RangeBound::Start => self.range.start,
            RangeBound::End => self.range.end,
        }
    }

    fn date_mut(&mut self, bound: RangeBound) -> &mut NaiveDate {
        match bound {
            RangeBound::Start => &mut self.range.start,
            RangeBound::End => &mut self.range.end,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub running: bool,

    // Navigation
    pub section: Section,
    pub sidebar_visible: bool,
    pub overlay: Overlay,

    // Fetch section
    pub input: InputState,
    pub workflow: FetchWorkflow,
    pub table_scroll: usize,
    pub last_export: Option<PathBuf>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub tick: usize,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        today: NaiveDate,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let sidebar_visible = config.initial_sidebar_state == SidebarState::Expanded;
        let input = InputState::new(config.default_start, today);
        Self {
            config,
            running: true,
            section: Section::FetchStockData,
            sidebar_visible,
            overlay: Overlay::None,
            input,
            workflow: FetchWorkflow::new(),
            table_scroll: 0,
            last_export: None,
            worker_tx,
            worker_rx,
            status_message: None,
            tick: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.input.ticker, self.input.range)
    }

    pub fn view(&self) -> &ResultView {
        self.workflow.view()
    }

    pub fn is_fetching(&self) -> bool {
        self.workflow.is_fetching()
    }

    // ── Input Collector ──────────────────────────────────────────────

    /// Any edit to the selection invalidates the displayed result.
    fn selection_changed(&mut self) {
        self.workflow.reset();
        self.table_scroll = 0;
        self.last_export = None;
    }

    /// Selection edits are refused while a fetch is in flight.
    fn can_edit(&mut self) -> bool {
        if self.is_fetching() {
            self.set_warning(FETCHING_MESSAGE);
            return false;
        }
        true
    }

    pub fn cycle_ticker(&mut self, forward: bool) {
        if !self.can_edit() {
            return;
        }
        self.input.ticker = if forward {
            self.input.ticker.next()
        } else {
            self.input.ticker.prev()
        };
        self.selection_changed();
    }

    pub fn shift_date_days(&mut self, bound: RangeBound, days: i64) {
        if !self.can_edit() {
            return;
        }
        let date = self.input.date_mut(bound);
        *date = shift_days(*date, days);
        self.selection_changed();
    }

    pub fn shift_date_months(&mut self, bound: RangeBound, months: i32) {
        if !self.can_edit() {
            return;
        }
        let date = self.input.date_mut(bound);
        *date = shift_months(*date, months);
        self.selection_changed();
    }

    pub fn set_date(&mut self, bound: RangeBound, date: NaiveDate) {
        if !self.can_edit() {
            return;
        }
        *self.input.date_mut(bound) = date;
        self.selection_changed();
    }

    // ── Fetch trigger ────────────────────────────────────────────────

    /// Explicit fetch trigger: hand the current selection to the worker.
    pub fn trigger_fetch(&mut self) {
        let selection = self.selection();
        let selection = match self.workflow.begin(selection) {
            Ok(selection) => selection,
            Err(e) => {
                self.set_warning(e.to_string());
                return;
            }
        };
        self.table_scroll = 0;
        self.last_export = None;

        if self.worker_tx.send(WorkerCommand::Fetch(selection)).is_err() {
            error!("fetch worker is gone");
            // Release the pending selection so the inputs stay usable.
            let stopped = stockflow_core::data::DataError::Other("fetch worker stopped".into());
            match self.workflow.complete(Err(stopped)) {
                Err(e) => self.set_error(format!("Fetch failed: {e}")),
                Ok(_) => self.set_error("Fetch worker stopped"),
            }
            return;
        }
        self.set_status(FETCHING_MESSAGE);
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::FetchDone { selection, result } => {
                if self.workflow.pending() != Some(selection) {
                    warn!(ticker = %selection.ticker, "dropping response for a fetch that is not in flight");
                    return;
                }
                let status = match self.workflow.complete(result) {
                    Ok(ResultView::Populated { series, .. }) => (
                        format!(
                            "Data fetched successfully! {} rows for {}",
                            series.row_count(),
                            series.ticker
                        ),
                        StatusLevel::Success,
                    ),
                    Ok(view) => (
                        view.message().unwrap_or_default().to_string(),
                        StatusLevel::Warning,
                    ),
                    Err(e) => (format!("Fetch failed: {e}"), StatusLevel::Error),
                };
                self.status_message = Some(status);
            }
        }
    }

    // ── Exporter ─────────────────────────────────────────────────────

    /// Write `{TICKER}_data.csv` into the download directory.
    pub fn export_csv(&mut self) {
        let artifact = match self.workflow.export() {
            Ok(artifact) => artifact,
            Err(e) => {
                self.set_warning(e.to_string());
                return;
            }
        };
        match artifact.write_to(&self.config.download_dir) {
            Ok(path) => {
                info!(path = %path.display(), bytes = artifact.len(), "exported CSV");
                self.set_success(format!("Saved {}", path.display()));
                self.last_export = Some(path);
            }
            Err(e) => {
                error!(error = %e, "CSV export failed");
                self.set_error(e.to_string());
            }
        }
    }

    // ── Table scrolling ──────────────────────────────────────────────

    pub fn scroll_table(&mut self, delta: isize) {
        let rows = self.view().series().map_or(0, |s| s.row_count());
        let max = rows.saturating_sub(1);
        let next = self.table_scroll as isize + delta;
        self.table_scroll = next.clamp(0, max as isize) as usize;
    }

    pub fn scroll_table_to(&mut self, end: bool) {
        let rows = self.view().series().map_or(0, |s| s.row_count());
        self.table_scroll = if end { rows.saturating_sub(1) } else { 0 };
    }

    // ── Status bar ───────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Success));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    /// Advance the animation clock (spinner).
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}
