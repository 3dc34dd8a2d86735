//! The submit cycle: validate input, call the backend, branch on the
//! envelope, and hand the rows to the renderer and the chart advisor.

use crate::api::QueryBackend;
use crate::chart::{self, ChartSpec};
use crate::error::{Error, Result};
use crate::models::ResultSet;
use crate::render::{self, TableView};
use crate::state::{QueryPhase, SessionState};

/// Everything a successful submission produces: the raw rows, the formatted
/// table, and a chart spec when the advisor found one.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub query: String,
    pub sql: Option<String>,
    /// Server-side caveat, e.g. when it fell back to degraded execution.
    pub note: Option<String>,
    pub results: ResultSet,
    pub table: TableView,
    pub chart: Option<ChartSpec>,
}

/// Drives one session against a query backend. Owns the session state; the
/// presentation layer reads results back through [`SessionState`].
pub struct QueryController<B> {
    backend: B,
    state: SessionState,
}

impl<B: QueryBackend> QueryController<B> {
    pub fn new(backend: B) -> Self {
        QueryController {
            backend,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Submit one query. Empty input is rejected before any request is
    /// issued; overlapping submissions are refused while one is in flight.
    /// The session phase always leaves `Loading` before this returns.
    pub async fn submit(&self, input: &str) -> Result<QueryOutcome> {
        let query = input.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        self.state.begin_loading()?;
        let result = self.run(query).await;
        match &result {
            Ok(outcome) => {
                self.state.set_outcome(outcome.clone());
                self.state.finish(QueryPhase::Success);
            }
            Err(e) => {
                log::error!("query failed: {}", e);
                self.state.finish(QueryPhase::Error);
            }
        }
        result
    }

    async fn run(&self, query: &str) -> Result<QueryOutcome> {
        let response = self.backend.run_query(query).await?;

        if !response.success {
            return Err(Error::Api(
                response
                    .error
                    .unwrap_or_else(|| "Failed to execute query".to_string()),
            ));
        }

        // The page showed the generated SQL even when the result set turned
        // out empty; keep that ordering.
        if let Some(sql) = &response.sql_query {
            self.state.set_last_sql(sql.clone());
        }

        let records = response.data.unwrap_or_default();
        if records.is_empty() {
            return Err(Error::NoResults);
        }

        if let Some(note) = &response.note {
            log::warn!("server note: {}", note);
        }

        let results = ResultSet::new(records);
        log::info!("query returned {} rows", results.len());

        let table = render::render_table(&results);
        let chart = chart::suggest_chart(&results).map(|kind| chart::build_chart(&results, kind));

        self.state
            .record_history(query, response.sql_query.clone(), &results);

        Ok(QueryOutcome {
            query: query.to_string(),
            sql: response.sql_query,
            note: response.note,
            results,
            table,
            chart,
        })
    }

    /// Fetch server-side query suggestions for partial input.
    pub async fn suggest(&self, input: &str) -> Result<Vec<String>> {
        self.backend.suggest(input.trim()).await
    }
}
