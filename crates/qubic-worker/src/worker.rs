//! Background search thread
//!
//! The searcher lives behind a mutex shared with the main loop. Exactly one
//! search thread holds it at a time; the main loop only locks it for
//! `clear-cache` while idle.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use qubic_core::{Position, SearchError, SearchLimits, SearchOutcome, SearchProgress, Searcher, Side};

/// Messages from worker thread to main thread
#[derive(Debug)]
pub enum WorkerMessage {
    /// A depth was completed
    Progress {
        search_id: u64,
        progress: SearchProgress,
    },
    /// Search finished (deadline, stop, max depth or forced result)
    Finished {
        search_id: u64,
        outcome: SearchOutcome,
    },
    /// Search could not run or panicked
    Failed {
        search_id: u64,
        message: String,
    },
}

/// Everything a search thread needs
#[derive(Debug, Clone)]
pub struct SearchJob {
    pub search_id: u64,
    pub position: Position,
    pub side: Side,
    pub limits: SearchLimits,
    /// Clear the transposition table before searching
    pub clear_cache: bool,
}

/// Lock the searcher, recovering from a poisoned mutex
///
/// A panic mid-search can leave the table half-written, so it is cleared.
pub fn lock_or_recover_searcher(mutex: &Mutex<Searcher>) -> MutexGuard<'_, Searcher> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::error!("Searcher mutex was poisoned, clearing transposition table");
            mutex.clear_poison();
            let mut guard = poisoned.into_inner();
            guard.clear_tt();
            guard
        }
    }
}

/// Start a search on a new thread
pub fn spawn_search(
    searcher: Arc<Mutex<Searcher>>,
    job: SearchJob,
    tx: Sender<WorkerMessage>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let search_id = job.search_id;
        log::debug!("Search worker {search_id} started: {job:?}");

        let result = panic::catch_unwind(AssertUnwindSafe(|| run_search(&searcher, &job, &tx)));
        let message = match result {
            Ok(Ok(outcome)) => WorkerMessage::Finished { search_id, outcome },
            Ok(Err(e)) => WorkerMessage::Failed {
                search_id,
                message: e.to_string(),
            },
            Err(payload) => WorkerMessage::Failed {
                search_id,
                message: format!("search panicked: {}", panic_message(payload.as_ref())),
            },
        };

        if tx.send(message).is_err() {
            log::debug!("Main loop is gone, dropping result of search {search_id}");
        }
    })
}

fn run_search(
    searcher: &Mutex<Searcher>,
    job: &SearchJob,
    tx: &Sender<WorkerMessage>,
) -> Result<SearchOutcome, SearchError> {
    let mut searcher = lock_or_recover_searcher(searcher);
    if job.clear_cache {
        searcher.clear_tt();
    }

    let search_id = job.search_id;
    let outcome = searcher.think(&job.position, job.side, &job.limits, |progress| {
        let _ = tx.send(WorkerMessage::Progress {
            search_id,
            progress: *progress,
        });
    })?;

    log::info!(
        "Search {search_id} done: depth={} score={} nodes={} time={}ms aborted={} tt_entries={}",
        outcome.completed_depth,
        outcome.score(),
        outcome.stats.nodes,
        outcome.elapsed.as_millis(),
        outcome.aborted,
        searcher.tt().len()
    );
    Ok(outcome)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
