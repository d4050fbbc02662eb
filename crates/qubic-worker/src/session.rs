//! Per-search bookkeeping
//!
//! Tracks the best move confirmed by the last completed depth and makes sure
//! the `result` event for a search goes out exactly once, whether it is
//! triggered by `stop` or by the search finishing.

use qubic_core::{BestMove, SearchProgress};

use crate::protocol::Event;

#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Unique id of the search this session belongs to
    pub id: u64,
    /// Best move of the last completed depth
    committed: Option<BestMove>,
    result_sent: bool,
}

impl SearchSession {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            committed: None,
            result_sent: false,
        }
    }

    /// Record a completed depth
    pub fn commit_iteration(&mut self, progress: &SearchProgress) {
        self.committed = Some(BestMove {
            cell: progress.best,
            score: progress.score,
            depth: progress.depth,
        });
    }

    pub fn committed(&self) -> Option<BestMove> {
        self.committed
    }

    #[cfg(test)]
    fn result_sent(&self) -> bool {
        self.result_sent
    }

    /// Result to emit right away on `stop`
    ///
    /// `None` when nothing has been confirmed yet; the result then waits for the
    /// search to finish.
    pub fn take_stop_result(&mut self) -> Option<Event> {
        if self.result_sent {
            return None;
        }
        let best = self.committed?;
        self.result_sent = true;
        Some(Event::result(Some(best)))
    }

    /// Result to emit when the search thread finishes (`None` if already sent)
    pub fn take_final_result(&mut self, best: Option<BestMove>) -> Option<Event> {
        if self.result_sent {
            return None;
        }
        self.result_sent = true;
        Some(Event::result(best))
    }
}
