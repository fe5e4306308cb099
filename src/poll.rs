//! Periodic tick source for position polling.
//!
//! The control surface refreshes its position readout on a fixed interval.
//! Instead of an implicit recurring callback, the tick source is an explicit
//! handle: a background thread sends unit ticks over a channel until the
//! handle is cancelled or dropped, and cancellation joins the thread so no
//! tick is delivered after teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::error::{Result, VarispeedError};

/// Default poll period for the position readout.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running periodic ticker.
///
/// Dropping the handle cancels the ticker and waits for its thread.
#[derive(Debug)]
pub struct Ticker {
    cancelled: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker that sends `()` every `interval`.
    ///
    /// The first tick arrives after one full interval, not immediately.
    ///
    /// # Errors
    /// Returns [`VarispeedError::ZeroPollInterval`] for a zero interval,
    /// which would spin the thread.
    pub fn spawn(interval: Duration) -> Result<(Self, Receiver<()>)> {
        if interval.is_zero() {
            return Err(VarispeedError::ZeroPollInterval);
        }

        let (tx, rx): (SyncSender<()>, Receiver<()>) = mpsc::sync_channel(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let thread_cancelled = Arc::clone(&cancelled);

        let thread = thread::spawn(move || {
            // Sleep in short slices so cancellation is honored promptly even
            // with long intervals.
            let slice = interval.min(Duration::from_millis(20));
            let mut elapsed = Duration::ZERO;
            loop {
                if thread_cancelled.load(Ordering::Relaxed) {
                    break;
                }
                thread::sleep(slice);
                elapsed += slice;
                if elapsed < interval {
                    continue;
                }
                elapsed = Duration::ZERO;
                if thread_cancelled.load(Ordering::Relaxed) {
                    break;
                }
                // A full bounded channel means the consumer is behind; skip
                // the tick rather than queue a backlog of stale ones.
                let _ = tx.try_send(());
            }
        });

        Ok((
            Self {
                cancelled,
                thread: Some(thread),
            },
            rx,
        ))
    }

    /// Stop the ticker and join its thread. Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
            debug!("[POLL] Ticker stopped");
        }
    }

    /// Whether the ticker has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
