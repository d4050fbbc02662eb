/// Search state tracked by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search is active
    #[default]
    Idle,
    /// Search is actively running
    Searching,
    /// Stop has been requested but the search thread has not finished yet
    StopRequested,
}

impl SearchState {
    /// Check if a search thread is alive
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching | SearchState::StopRequested)
    }

    /// Progress is forwarded only while nobody asked to stop
    pub fn forwards_progress(&self) -> bool {
        matches!(self, SearchState::Searching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(!SearchState::Idle.is_searching());
        assert!(SearchState::Searching.is_searching());
        assert!(SearchState::StopRequested.is_searching());

        assert!(SearchState::Searching.forwards_progress());
        assert!(!SearchState::StopRequested.forwards_progress());
        assert_eq!(SearchState::default(), SearchState::Idle);
    }
}
