//! Mock backend for driving the controller without a server. Queues scripted
//! responses and records every query it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::client::{QueryBackend, QueryResponse};
use crate::error::{Error, Result};

#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<VecDeque<Result<QueryResponse>>>,
    queries: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend::default()
    }

    /// Queue a response for the next query.
    pub fn push_response(&self, response: QueryResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a transport-level failure for the next query.
    pub fn push_error(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Every query text this backend has been asked to run, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn next_response(&self, query: &str) -> Result<QueryResponse> {
        self.queries.lock().unwrap().push(query.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Http("no scripted response".to_string())))
    }

    fn canned_suggestions(input: &str) -> Vec<String> {
        vec![
            format!("Show all records where the first column contains {input}"),
            format!("Count records grouped by {input}"),
        ]
    }
}

impl QueryBackend for MockBackend {
    async fn run_query(&self, query: &str) -> Result<QueryResponse> {
        self.next_response(query)
    }

    async fn suggest(&self, input: &str) -> Result<Vec<String>> {
        Ok(MockBackend::canned_suggestions(input))
    }
}

// Tests hold on to the mock while the controller owns a reference to it.
impl QueryBackend for &MockBackend {
    async fn run_query(&self, query: &str) -> Result<QueryResponse> {
        self.next_response(query)
    }

    async fn suggest(&self, input: &str) -> Result<Vec<String>> {
        Ok(MockBackend::canned_suggestions(input))
    }
}
