//! Periodic notification generation.
//!
//! The loop runs the generator immediately, then once per interval until it
//! is told to stop (message on the stop channel, or sender dropped) or the
//! optional run limit is reached.

use crate::core::notify::{GenerationReport, NotificationGenerator};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info};
use chrono::Utc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Convert a configured interval in minutes, rejecting zero and values too
/// large to represent.
pub fn interval_from_minutes(minutes: u64) -> AppResult<Duration> {
    if minutes == 0 {
        return Err(AppError::Validation(
            "the check interval must be at least 1 minute".into(),
        ));
    }
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| AppError::Validation(format!("check interval too large: {minutes} minutes")))
}

/// Blocking generator loop. Returns the number of completed runs.
///
/// `on_run` is called after each pass with its report.
pub fn run_loop<F>(
    pool: &mut DbPool,
    interval: Duration,
    max_runs: Option<usize>,
    stop: &Receiver<()>,
    mut on_run: F,
) -> usize
where
    F: FnMut(usize, &GenerationReport),
{
    let mut runs = 0;

    loop {
        match NotificationGenerator::run(pool, Utc::now()) {
            Ok(report) => on_run(runs + 1, &report),
            Err(e) => {
                // plants could not be read: try again next tick
                error(format!("Watering check failed: {}", e));
                ttlog_quiet(&pool.conn, "watch_failed", "", &e.to_string());
            }
        }
        runs += 1;

        if max_runs.is_some_and(|m| runs >= m) {
            break;
        }

        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                info("Watering check loop stopped.");
                break;
            }
        }
    }

    runs
}

/// Handle to a generator loop running on a background thread.
pub struct WatchHandle {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<usize>>,
}

impl WatchHandle {
    /// Cancel the loop and wait for it. Returns the number of completed runs.
    pub fn stop(mut self) -> AppResult<usize> {
        self.stop_tx.take();
        match self.handle.take() {
            Some(h) => h
                .join()
                .map_err(|_| AppError::Other("watch thread panicked".into())),
            None => Ok(0),
        }
    }

    /// Wait for a loop started with a run limit to finish on its own.
    pub fn join(mut self) -> AppResult<usize> {
        match self.handle.take() {
            Some(h) => h
                .join()
                .map_err(|_| AppError::Other("watch thread panicked".into())),
            None => Ok(0),
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.stop_tx.take();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

/// Start the generator loop on its own connection and thread.
pub fn spawn(db_path: &str, interval: Duration, max_runs: Option<usize>) -> AppResult<WatchHandle> {
    let mut pool = DbPool::new(db_path)?;
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        run_loop(&mut pool, interval, max_runs, &stop_rx, |_, _| {})
    });

    Ok(WatchHandle {
        stop_tx: Some(stop_tx),
        handle: Some(handle),
    })
}
