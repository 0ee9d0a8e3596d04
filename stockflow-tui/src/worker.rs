//! Fetch worker: runs the blocking gateway call off the render thread.
//!
//! The UI sends at most one `Fetch` at a time and keeps drawing the spinner
//! until the matching `FetchDone` arrives.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use tracing::{debug, info};

use stockflow_core::data::{DataError, MarketDataGateway};
use stockflow_core::domain::PriceSeries;
use stockflow_core::workflow::Selection;

/// Commands from the UI thread.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch(Selection),
    Shutdown,
}

/// Responses to the UI thread.
#[derive(Debug)]
pub enum WorkerResponse {
    FetchDone {
        selection: Selection,
        result: Result<PriceSeries, DataError>,
    },
}

/// Spawn the worker thread that owns the gateway.
pub fn spawn_worker(
    gateway: Box<dyn MarketDataGateway>,
    cmd_rx: Receiver<WorkerCommand>,
    resp_tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("fetch-worker".into())
        .spawn(move || worker_loop(gateway.as_ref(), cmd_rx, resp_tx))
}

/// Ask the worker to stop and wait for it.
///
/// With a fetch in flight the worker is blocked inside the gateway call until
/// the HTTP timeout, so it is left to end with the process instead. Returns
/// whether the thread was joined.
pub fn shutdown_worker(
    cmd_tx: &Sender<WorkerCommand>,
    handle: JoinHandle<()>,
    in_flight: bool,
) -> bool {
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    if in_flight {
        debug!("fetch in flight, not waiting for the worker");
        return false;
    }
    handle.join().is_ok()
}

fn worker_loop(
    gateway: &dyn MarketDataGateway,
    cmd_rx: Receiver<WorkerCommand>,
    resp_tx: Sender<WorkerResponse>,
) {
    info!(gateway = gateway.name(), "fetch worker started");
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Fetch(selection) => {
                debug!(ticker = %selection.ticker, "worker fetching");
                let result = gateway.fetch(selection.ticker, selection.range);
                if resp_tx
                    .send(WorkerResponse::FetchDone { selection, result })
                    .is_err()
                {
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
    info!("fetch worker stopped");
}
