//! Main-loop state: reacts to host requests and worker messages
//!
//! Invariants:
//! - at most one search thread runs at a time
//! - every accepted `start-search` produces exactly one `result` event
//! - `progress` is forwarded only for the current search and only until a stop is requested

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, unbounded};
use qubic_core::config::validate_depth;
use qubic_core::{SearchConfig, SearchError, SearchLimits, Searcher, StopHandle};

use crate::output::write_event;
use crate::protocol::{Event, ProtocolError, Request, StartSearch};
use crate::session::SearchSession;
use crate::state::SearchState;
use crate::worker::{SearchJob, WorkerMessage, lock_or_recover_searcher, spawn_search};

pub struct Host<W: Write> {
    config: SearchConfig,
    searcher: Arc<Mutex<Searcher>>,
    worker_tx: Sender<WorkerMessage>,
    worker_rx: Receiver<WorkerMessage>,
    out: W,
    state: SearchState,
    session: Option<SearchSession>,
    stop: Option<StopHandle>,
    worker_handle: Option<JoinHandle<()>>,
    search_id_counter: u64,
    /// `clear-cache` received while searching
    pending_clear: bool,
}

impl<W: Write> Host<W> {
    pub fn new(config: SearchConfig, out: W) -> Result<Self, SearchError> {
        let searcher = Searcher::new(config)?;
        let (worker_tx, worker_rx) = unbounded();
        Ok(Self {
            config,
            searcher: Arc::new(Mutex::new(searcher)),
            worker_tx,
            worker_rx,
            out,
            state: SearchState::Idle,
            session: None,
            stop: None,
            worker_handle: None,
            search_id_counter: 0,
            pending_clear: false,
        })
    }

    /// Receiver the main loop selects on
    pub fn worker_receiver(&self) -> Receiver<WorkerMessage> {
        self.worker_rx.clone()
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn emit(&mut self, event: &Event) -> io::Result<()> {
        write_event(&mut self.out, event)
    }

    pub fn handle_request(&mut self, request: Request) -> io::Result<()> {
        log::info!("Request received: {}", request.name());
        match request {
            Request::StartSearch(params) => self.start_search(params),
            Request::Stop => self.request_stop(),
            Request::ClearCache => {
                if self.state.is_searching() {
                    log::warn!("clear-cache received during a search; deferring until it finishes");
                    self.pending_clear = true;
                } else {
                    lock_or_recover_searcher(&self.searcher).clear_tt();
                }
                Ok(())
            }
        }
    }

    fn start_search(&mut self, params: StartSearch) -> io::Result<()> {
        if self.state.is_searching() {
            log::info!("start-search while searching; stopping the running search first");
            self.request_stop()?;
            self.wait_for_search()?;
        }

        let job = match self.build_job(&params) {
            Ok(job) => job,
            Err(e) => {
                log::warn!("Rejected start-search: {e}");
                return self.emit(&Event::error(e.to_string()));
            }
        };

        log::info!(
            "Starting search {} (stones={}, side={:?}, max_depth={:?}, time_limit={:?})",
            job.search_id,
            job.position.stone_count(),
            job.side,
            job.limits.max_depth,
            job.limits.time_limit
        );
        self.stop = job.limits.stop.clone();
        self.session = Some(SearchSession::new(job.search_id));
        self.state = SearchState::Searching;
        self.worker_handle = Some(spawn_search(self.searcher.clone(), job, self.worker_tx.clone()));
        Ok(())
    }

    fn build_job(&mut self, params: &StartSearch) -> Result<SearchJob, ProtocolError> {
        let position = params.position()?;
        let max_depth = params.max_depth.unwrap_or(self.config.max_depth);
        validate_depth(max_depth)?;

        let stop = StopHandle::new();
        let limits = SearchLimits::new()
            .max_depth(max_depth)
            .time_limit_ms(params.time_limit_ms_or(self.config.default_time_limit_ms))
            .stop_handle(stop);

        self.search_id_counter += 1;
        Ok(SearchJob {
            search_id: self.search_id_counter,
            position,
            side: params.side(),
            limits,
            clear_cache: params.clear_cache,
        })
    }

    fn request_stop(&mut self) -> io::Result<()> {
        if self.state != SearchState::Searching {
            log::debug!("stop ignored in state {:?}", self.state);
            return Ok(());
        }
        if let Some(stop) = &self.stop {
            stop.request_stop();
        }
        self.state = SearchState::StopRequested;

        // Answer right away with the last confirmed depth, if any
        let event = self.session.as_mut().and_then(SearchSession::take_stop_result);
        if let Some(event) = event {
            self.emit(&event)?;
        }
        Ok(())
    }

    pub fn handle_worker_message(&mut self, msg: WorkerMessage) -> io::Result<()> {
        let current = self.session.as_ref().map(|s| s.id);
        match msg {
            WorkerMessage::Progress { search_id, progress } => {
                if current != Some(search_id) || !self.state.forwards_progress() {
                    log::trace!("Suppressed progress from search {search_id} (current: {current:?})");
                    return Ok(());
                }
                if let Some(session) = self.session.as_mut() {
                    session.commit_iteration(&progress);
                }
                self.emit(&Event::Progress {
                    depth: progress.depth,
                    score: progress.score.raw(),
                })
            }
            WorkerMessage::Finished { search_id, outcome } => {
                if current != Some(search_id) {
                    log::trace!("Ignoring result of old search {search_id}");
                    return Ok(());
                }
                let event = self.session.as_mut().and_then(|s| s.take_final_result(outcome.best));
                if let Some(event) = event {
                    self.emit(&event)?;
                }
                self.finish_search();
                Ok(())
            }
            WorkerMessage::Failed { search_id, message } => {
                if current != Some(search_id) {
                    return Ok(());
                }
                log::error!("Search {search_id} failed: {message}");
                self.emit(&Event::error(message))?;
                // Still answer the request with whatever was confirmed
                let event = self.session.as_mut().and_then(|s| {
                    let committed = s.committed();
                    s.take_final_result(committed)
                });
                if let Some(event) = event {
                    self.emit(&event)?;
                }
                self.finish_search();
                Ok(())
            }
        }
    }

    fn finish_search(&mut self) {
        if let Some(handle) = self.worker_handle.take() {
            if handle.join().is_err() {
                log::error!("Search thread panicked outside the search");
            }
        }
        self.state = SearchState::Idle;
        self.session = None;
        self.stop = None;

        if self.pending_clear {
            self.pending_clear = false;
            log::info!("Applying deferred clear-cache");
            lock_or_recover_searcher(&self.searcher).clear_tt();
        }
    }

    /// Block until the running search (if any) has finished and its result was emitted
    pub fn wait_for_search(&mut self) -> io::Result<()> {
        while self.state.is_searching() {
            match self.worker_rx.recv() {
                Ok(msg) => self.handle_worker_message(msg)?,
                Err(_) => {
                    log::error!("Worker channel closed while a search was running");
                    self.finish_search();
                }
            }
        }
        Ok(())
    }

    /// Input closed: let the running search finish, then return
    pub fn shutdown(&mut self) -> io::Result<()> {
        if self.state.is_searching() {
            log::info!("Input closed; waiting for the running search");
        }
        self.wait_for_search()?;
        log::debug!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::protocol::parse_request;

    fn host() -> Host<Vec<u8>> {
        Host::new(SearchConfig::default(), Vec::new()).unwrap()
    }

    fn events(host: &Host<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(host.output())
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn send(host: &mut Host<Vec<u8>>, line: &str) {
        host.handle_request(parse_request(line).unwrap()).unwrap();
    }

    #[test]
    fn test_search_emits_progress_then_one_result() {
        let mut host = host();
        send(
            &mut host,
            r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":true,"maxDepth":2}"#,
        );
        assert_eq!(host.state(), SearchState::Searching);
        host.wait_for_search().unwrap();
        assert_eq!(host.state(), SearchState::Idle);

        let events = events(&host);
        let kinds: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, ["progress", "progress", "result"]);
        assert_eq!(events[0]["depth"], 1);
        assert_eq!(events[2]["move"]["depth"], 2);
    }

    #[test]
    fn test_zero_time_limit_runs_on_default_budget() {
        let mut host = host();
        let Request::StartSearch(params) = parse_request(
            r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":true,"timeLimitMs":0}"#,
        )
        .unwrap() else {
            panic!("expected start-search");
        };
        let job = host.build_job(&params).unwrap();
        let default_ms = SearchConfig::default().default_time_limit_ms;
        assert_eq!(job.limits.time_limit, Some(Duration::from_millis(default_ms)));
    }

    #[test]
    fn test_full_board_reports_null_move() {
        let mut host = host();
        send(
            &mut host,
            r#"{"type":"start-search","p1Mask":"6148914691236517205","p2Mask":"12297829382473034410","aiIsPlayer1":false}"#,
        );
        host.wait_for_search().unwrap();
        let events = events(&host);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "result");
        assert!(events[0]["move"].is_null());
    }

    #[test]
    fn test_invalid_requests_emit_errors() {
        let mut host = host();
        send(&mut host, r#"{"type":"start-search","p1Mask":3,"p2Mask":1,"aiIsPlayer1":true}"#);
        send(&mut host, r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":true,"maxDepth":0}"#);
        assert_eq!(host.state(), SearchState::Idle);

        let events = events(&host);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e["type"] == "error"));
        assert!(events[0]["message"].as_str().unwrap().contains("overlap"));
    }

    #[test]
    fn test_stop_and_clear_cache_when_idle() {
        let mut host = host();
        send(&mut host, r#"{"type":"stop"}"#);
        send(&mut host, r#"{"type":"clear-cache"}"#);
        assert!(events(&host).is_empty());
        assert_eq!(host.state(), SearchState::Idle);
    }

    #[test]
    fn test_restart_stops_running_search_and_emits_both_results() {
        let mut host = host();
        let long = r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":true,"maxDepth":20,"timeLimitMs":60000}"#;
        send(&mut host, long);
        send(&mut host, r#"{"type":"clear-cache"}"#);
        send(
            &mut host,
            r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":false,"maxDepth":1}"#,
        );
        host.wait_for_search().unwrap();

        let events = events(&host);
        let results = events.iter().filter(|e| e["type"] == "result").count();
        assert_eq!(results, 2, "{events:?}");
        assert_eq!(events.last().unwrap()["move"]["depth"], 1);
    }
}
