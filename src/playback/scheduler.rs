use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use crate::foundation::error::{StudioError, StudioResult};

/// Cancellable preview scheduler cycling the current-frame cursor.
///
/// While playing, a worker thread publishes frame indices in order,
/// waiting the duration of the frame just entered before advancing and
/// wrapping to index 0 after the last one. The worker only ever writes the
/// cursor; it never touches scene data. [`Scheduler::stop`] is synchronous:
/// it joins the worker, so no cursor write can be observed after it
/// returns.
#[derive(Debug)]
pub struct Scheduler {
    cursor: Arc<AtomicUsize>,
    worker: Option<Worker>,
}

#[derive(Debug)]
struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: thread::JoinHandle<()>,
}

impl Scheduler {
    /// A stopped scheduler with the cursor at 0.
    pub fn new() -> Self {
        Self {
            cursor: Arc::new(AtomicUsize::new(0)),
            worker: None,
        }
    }

    /// Whether a playback worker is currently running.
    pub fn is_playing(&self) -> bool {
        self.worker.is_some()
    }

    /// Last frame index published by the worker.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Start cycling through `durations_ms`, one entry per frame.
    ///
    /// Rejected when already playing or when the duration list is empty.
    pub fn start(&mut self, durations_ms: Vec<u64>) -> StudioResult<()> {
        if self.worker.is_some() {
            return Err(StudioError::guard("playback is already running"));
        }
        if durations_ms.is_empty() {
            return Err(StudioError::guard("nothing to play: no frames"));
        }

        self.cursor.store(0, Ordering::Release);
        let cursor = Arc::clone(&self.cursor);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                for (index, ms) in durations_ms.iter().enumerate() {
                    cursor.store(index, Ordering::Release);
                    match stop_rx.recv_timeout(Duration::from_millis(*ms)) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // Stop signal, or the scheduler was dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        });

        self.worker = Some(Worker { stop_tx, handle });
        Ok(())
    }

    /// Stop playback and wait for the worker to exit.
    ///
    /// A no-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.handle.join();
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
