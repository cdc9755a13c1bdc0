//! Live query subscriptions.
//!
//! A subscription owns its own connection on a background thread, re-runs a
//! query every `poll` interval and pushes a fresh snapshot through a channel
//! whenever the result changes. Dropping the subscription (or calling
//! [`Subscription::unsubscribe`]) stops the thread.

use crate::db::pool::DbPool;
use crate::db::queries::{load_notifications, load_plants};
use crate::errors::AppResult;
use crate::models::notification::Notification;
use crate::models::plant::Plant;
use crate::ui::messages::error;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct Subscription<T> {
    rx: Receiver<Vec<T>>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl<T> Subscription<T> {
    /// Block until the next snapshot. `None` once the worker has stopped.
    pub fn recv(&self) -> Option<Vec<T>> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Vec<T>> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn unsubscribe(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // dropping the sender wakes the worker immediately
        self.stop_tx.take();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Subscribe to an arbitrary query. The initial snapshot is delivered
/// immediately; later ones only when they differ from the previous one.
pub fn subscribe<T, F>(db_path: &str, poll: Duration, mut query: F) -> AppResult<Subscription<T>>
where
    T: PartialEq + Clone + Send + 'static,
    F: FnMut(&mut DbPool) -> AppResult<Vec<T>> + Send + 'static,
{
    let mut pool = DbPool::new(db_path)?;
    let mut last = query(&mut pool)?;

    let (tx, rx) = mpsc::channel();
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    // the receiver is still in our hands, this cannot fail
    let _ = tx.send(last.clone());

    let handle = thread::spawn(move || {
        loop {
            match stop_rx.recv_timeout(poll) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }

            match query(&mut pool) {
                Ok(snapshot) if snapshot != last => {
                    if tx.send(snapshot.clone()).is_err() {
                        break;
                    }
                    last = snapshot;
                }
                Ok(_) => {}
                Err(e) => error(format!("Subscription query failed: {}", e)),
            }
        }
    });

    Ok(Subscription {
        rx,
        stop_tx: Some(stop_tx),
        handle: Some(handle),
    })
}

/// Live view of the plant collection, most recently added first.
pub fn subscribe_plants(db_path: &str, poll: Duration) -> AppResult<Subscription<Plant>> {
    subscribe(db_path, poll, load_plants)
}

/// Live view of the notification collection, newest first.
pub fn subscribe_notifications(
    db_path: &str,
    poll: Duration,
    unread_only: bool,
) -> AppResult<Subscription<Notification>> {
    subscribe(db_path, poll, move |pool| load_notifications(pool, unread_only))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::insert_plant;
    use crate::models::frequency::WateringFrequency;
    use crate::models::plant::NewPlant;

    fn temp_db(name: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_ecopot_sub.sqlite", name));
        let p = path.to_string_lossy().to_string();
        std::fs::remove_file(&p).ok();
        let pool = DbPool::new(&p).unwrap();
        init_db(&pool.conn).unwrap();
        p
    }

    #[test]
    fn pushes_initial_snapshot_then_changes() {
        let db = temp_db("pushes_changes");
        let sub = subscribe_plants(&db, Duration::from_millis(20)).unwrap();

        let first = sub.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(first.is_empty());

        let writer = DbPool::new(&db).unwrap();
        insert_plant(
            &writer.conn,
            &NewPlant::new("Monstera", "Monstera deliciosa", WateringFrequency::Weekly),
        )
        .unwrap();

        let next = sub.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].name, "Monstera");

        sub.unsubscribe();
    }

    #[test]
    fn unchanged_results_are_not_redelivered() {
        let db = temp_db("no_redelivery");
        let sub = subscribe_notifications(&db, Duration::from_millis(10), false).unwrap();

        assert!(sub.recv_timeout(Duration::from_secs(2)).is_some());
        assert!(sub.recv_timeout(Duration::from_millis(100)).is_none());
    }
}
