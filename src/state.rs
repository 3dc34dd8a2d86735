//! Session-scoped state. What the page kept in ambient globals (query
//! history, current chart, loading flags) lives here on one explicit object
//! owned by the controller.

use std::sync::Mutex;

use crate::controller::QueryOutcome;
use crate::error::{Error, Result};
use crate::models::{HistoryEntry, ResultSet};

/// Where the session is in the submit cycle. Every submission leaves
/// `Loading` before control returns to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// State for one interactive session. Lives for the process lifetime; nothing
/// here is persisted.
pub struct SessionState {
    phase: Mutex<QueryPhase>,
    history: Mutex<Vec<HistoryEntry>>,
    last_sql: Mutex<Option<String>>,
    outcome: Mutex<Option<QueryOutcome>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            phase: Mutex::new(QueryPhase::Idle),
            history: Mutex::new(Vec::new()),
            last_sql: Mutex::new(None),
            outcome: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> QueryPhase {
        *self.phase.lock().unwrap()
    }

    /// Enter the loading state, discarding the previous result. Refused while
    /// a request is already in flight; this is the disabled-submit-button
    /// guard.
    pub fn begin_loading(&self) -> Result<()> {
        let mut phase = self.phase.lock().unwrap();
        if *phase == QueryPhase::Loading {
            return Err(Error::Busy);
        }
        *phase = QueryPhase::Loading;
        *self.outcome.lock().unwrap() = None;
        Ok(())
    }

    /// Leave the loading state. Called exactly once per submission, on every
    /// exit path.
    pub fn finish(&self, phase: QueryPhase) {
        *self.phase.lock().unwrap() = phase;
    }

    pub fn set_outcome(&self, outcome: QueryOutcome) {
        *self.outcome.lock().unwrap() = Some(outcome);
    }

    /// The most recent successful outcome, if the last submission produced
    /// one.
    pub fn outcome(&self) -> Option<QueryOutcome> {
        self.outcome.lock().unwrap().clone()
    }

    pub fn set_last_sql(&self, sql: String) {
        *self.last_sql.lock().unwrap() = Some(sql);
    }

    /// The generated SQL of the most recent successful query.
    pub fn last_sql(&self) -> Option<String> {
        self.last_sql.lock().unwrap().clone()
    }

    /// Append one completed query to the session history. Append-only: no
    /// deduplication, no capacity bound.
    pub fn record_history(&self, query: &str, sql: Option<String>, result: &ResultSet) {
        let entry = HistoryEntry::new(query, sql, result.clone());
        self.history.lock().unwrap().push(entry);
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().unwrap().clone()
    }

    /// Drop the displayed result and SQL, returning to idle. History is kept.
    pub fn clear(&self) {
        *self.outcome.lock().unwrap() = None;
        *self.last_sql.lock().unwrap() = None;
        *self.phase.lock().unwrap() = QueryPhase::Idle;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_guard_rejects_overlap() {
        let state = SessionState::new();
        assert!(state.begin_loading().is_ok());
        assert!(matches!(state.begin_loading(), Err(Error::Busy)));
        state.finish(QueryPhase::Error);
        assert!(state.begin_loading().is_ok());
    }

    #[test]
    fn history_is_append_only() {
        let state = SessionState::new();
        let result = ResultSet::default();
        state.record_history("q1", None, &result);
        state.record_history("q1", None, &result);

        let history = state.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].query, "q1");
        assert_ne!(history[0].id, history[1].id);
    }

    #[test]
    fn clear_keeps_history() {
        let state = SessionState::new();
        state.record_history("q", None, &ResultSet::default());
        state.set_last_sql("SELECT 1".to_string());
        state.clear();

        assert_eq!(state.phase(), QueryPhase::Idle);
        assert!(state.last_sql().is_none());
        assert_eq!(state.history().len(), 1);
    }
}
