use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ResultSet;

/// One completed query kept for re-display within the session. Entries are
/// append-only and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub query: String,
    /// The SQL the server generated for this query, when it reported one.
    pub sql: Option<String>,
    pub row_count: usize,
    pub result: ResultSet,
    pub executed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(query: &str, sql: Option<String>, result: ResultSet) -> Self {
        HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.to_string(),
            sql,
            row_count: result.len(),
            result,
            executed_at: Utc::now(),
        }
    }
}
