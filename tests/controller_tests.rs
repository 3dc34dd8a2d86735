//! Controller tests against the mock backend: validation, the four-way error
//! taxonomy, and the success path through renderer, advisor, and history.

use serde_json::json;

use lantern::api::{MockBackend, QueryResponse};
use lantern::chart::ChartKind;
use lantern::models::Record;
use lantern::{Error, QueryController, QueryPhase};

fn records(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

fn ok_response(data: serde_json::Value, sql: &str) -> QueryResponse {
    QueryResponse {
        success: true,
        data: Some(records(data)),
        sql_query: Some(sql.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn empty_query_issues_no_request() {
    let backend = MockBackend::new();
    let controller = QueryController::new(&backend);

    let err = controller.submit("   \n").await.unwrap_err();
    assert!(matches!(err, Error::EmptyQuery));
    assert!(controller.state().history().is_empty());
    assert_eq!(controller.state().phase(), QueryPhase::Idle);

    // The backend never saw a query.
    assert!(backend.queries().is_empty());
}

#[tokio::test]
async fn submitted_queries_are_trimmed_on_the_wire() {
    let backend = MockBackend::new();
    backend.push_response(ok_response(json!([{"n": 1}]), "SELECT 1"));
    let controller = QueryController::new(&backend);

    controller.submit("  count rows  ").await.unwrap();
    assert_eq!(backend.queries(), vec!["count rows"]);
}

#[tokio::test]
async fn transport_failure_leaves_error_phase() {
    let backend = MockBackend::new();
    backend.push_error(Error::Http("connection refused".to_string()));
    let controller = QueryController::new(backend);

    let err = controller.submit("show sales").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.to_string(), "connection refused");

    // Loading is cleared and no result is displayed.
    assert_eq!(controller.state().phase(), QueryPhase::Error);
    assert!(controller.state().outcome().is_none());
}

#[tokio::test]
async fn application_failure_uses_server_message() {
    let backend = MockBackend::new();
    backend.push_response(QueryResponse {
        success: false,
        error: Some("No data loaded. Please upload a file first.".to_string()),
        ..Default::default()
    });
    let controller = QueryController::new(backend);

    let err = controller.submit("show sales").await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));
    assert_eq!(
        err.to_string(),
        "No data loaded. Please upload a file first."
    );
}

#[tokio::test]
async fn application_failure_without_message_gets_generic_one() {
    let backend = MockBackend::new();
    backend.push_response(QueryResponse {
        success: false,
        ..Default::default()
    });
    let controller = QueryController::new(backend);

    let err = controller.submit("show sales").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to execute query");
}

#[tokio::test]
async fn empty_data_is_no_results_not_a_hard_error() {
    let backend = MockBackend::new();
    backend.push_response(QueryResponse {
        success: true,
        data: Some(Vec::new()),
        sql_query: Some("SELECT 1 WHERE 1 = 0".to_string()),
        ..Default::default()
    });
    let controller = QueryController::new(backend);

    let err = controller.submit("find nothing").await.unwrap_err();
    assert!(matches!(err, Error::NoResults));
    assert_eq!(controller.state().phase(), QueryPhase::Error);

    // The generated SQL was still shown before the rows were inspected.
    assert_eq!(
        controller.state().last_sql().as_deref(),
        Some("SELECT 1 WHERE 1 = 0")
    );
}

#[tokio::test]
async fn missing_data_field_is_no_results() {
    let backend = MockBackend::new();
    backend.push_response(QueryResponse {
        success: true,
        ..Default::default()
    });
    let controller = QueryController::new(backend);

    let err = controller.submit("anything").await.unwrap_err();
    assert!(matches!(err, Error::NoResults));
}

#[tokio::test]
async fn successful_query_renders_charts_and_records_history() {
    let backend = MockBackend::new();
    backend.push_response(ok_response(
        json!([
            {"month": "Jan", "total_sales": 1200},
            {"month": "Feb", "total_sales": 900},
        ]),
        "SELECT month, total_sales FROM sales",
    ));
    let controller = QueryController::new(backend);

    let outcome = controller.submit("  sales by month  ").await.unwrap();

    assert_eq!(outcome.query, "sales by month");
    assert_eq!(outcome.table.header, vec!["Month", "Total Sales"]);
    assert_eq!(outcome.table.rows[0], vec!["Jan", "1,200"]);
    assert_eq!(outcome.chart.as_ref().map(|c| c.kind), Some(ChartKind::Pie));

    assert_eq!(controller.state().phase(), QueryPhase::Success);
    assert!(controller.state().outcome().is_some());

    let history = controller.state().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "sales by month");
    assert_eq!(history[0].row_count, 2);
    assert_eq!(
        history[0].sql.as_deref(),
        Some("SELECT month, total_sales FROM sales")
    );
}

#[tokio::test]
async fn wide_results_suggest_no_pie() {
    let backend = MockBackend::new();
    backend.push_response(ok_response(
        json!([
            {"region": "east", "q1": 10, "q2": 20},
        ]),
        "SELECT region, q1, q2 FROM sales",
    ));
    let controller = QueryController::new(backend);

    let outcome = controller.submit("quarterly sales").await.unwrap();
    assert_eq!(outcome.chart.as_ref().map(|c| c.kind), Some(ChartKind::Bar));
    assert_eq!(outcome.chart.unwrap().data.datasets.len(), 2);
}

#[tokio::test]
async fn history_accumulates_across_submissions() {
    let backend = MockBackend::new();
    backend.push_response(ok_response(json!([{"n": 1}]), "SELECT 1"));
    backend.push_response(ok_response(json!([{"n": 2}]), "SELECT 2"));
    let controller = QueryController::new(backend);

    controller.submit("first").await.unwrap();
    controller.submit("second").await.unwrap();

    let history = controller.state().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].query, "first");
    assert_eq!(history[1].query, "second");
}

#[tokio::test]
async fn failure_discards_previous_result() {
    let backend = MockBackend::new();
    backend.push_response(ok_response(json!([{"n": 1}]), "SELECT 1"));
    backend.push_error(Error::Http("connection reset".to_string()));
    let controller = QueryController::new(backend);

    controller.submit("first").await.unwrap();
    assert!(controller.state().outcome().is_some());

    let _ = controller.submit("second").await.unwrap_err();
    assert!(controller.state().outcome().is_none());
}
