//! Chart suggestion and data reshaping. The advisor picks a category from a
//! result set's shape; the builder packs the rows into the `{labels,
//! datasets}` structure a Chart.js-style renderer consumes. Actual drawing is
//! someone else's job.

use serde::Serialize;
use serde_json::Value;

use crate::models::{ColumnDef, ColumnKind, ResultSet};

/// Slice/series colors, cycled when there are more entries than colors.
pub const PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

/// Result sets with at most this many rows get a pie instead of a bar when
/// the one-category-one-value rule fires.
const PIE_ROW_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named series. Field presence varies by chart kind, so everything
/// optional is skipped when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// Pie slices carry one color per slice; bar and line series carry a single
/// color each.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    One(&'static str),
    PerSlice(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A chosen chart category plus the reshaped series for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
}

/// Pick a chart category for a result set, or `None` when it has nothing to
/// plot. Decided entirely from the first record's column classification plus
/// the row count:
///
/// 1. no numeric column -> no chart
/// 2. exactly one categorical and one numeric column -> pie for small sets,
///    bar otherwise
/// 3. any date-like column -> line
/// 4. anything else with a numeric column -> bar
///
/// A date-like column does not count as categorical in rule 2; that is what
/// routes time series past the pie/bar rule and onto the line rule.
pub fn suggest_chart(results: &ResultSet) -> Option<ChartKind> {
    if results.is_empty() {
        return None;
    }

    let columns = results.columns();
    let numeric = count_kind(&columns, ColumnKind::Numeric);
    let categorical = count_kind(&columns, ColumnKind::Categorical);
    let date_like = count_kind(&columns, ColumnKind::DateLike);

    if numeric == 0 {
        return None;
    }

    if columns.len() == 2 && categorical == 1 && numeric == 1 {
        return Some(if results.len() <= PIE_ROW_LIMIT {
            ChartKind::Pie
        } else {
            ChartKind::Bar
        });
    }

    if date_like > 0 {
        return Some(ChartKind::Line);
    }

    Some(ChartKind::Bar)
}

/// Reshape a result set into the series structure for the chosen category.
/// Labels come from the first non-numeric column in row order, falling back
/// to row numbers when every column is numeric. Each numeric column becomes
/// one series holding its raw values in row order.
pub fn build_chart(results: &ResultSet, kind: ChartKind) -> ChartSpec {
    let columns = results.columns();
    let numeric: Vec<&ColumnDef> = columns
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .collect();

    let labels = match columns.iter().find(|c| c.kind != ColumnKind::Numeric) {
        Some(col) => results
            .records
            .iter()
            .map(|record| label_string(record.get(&col.name)))
            .collect(),
        None => (1..=results.len()).map(|i| i.to_string()).collect(),
    };

    let datasets = match kind {
        ChartKind::Pie => {
            // One dataset, one slice per record, colors cycling the palette.
            let col = numeric.first();
            let data = results
                .records
                .iter()
                .map(|record| column_value(record, col))
                .collect();
            let colors = (0..results.len())
                .map(|i| PALETTE[i % PALETTE.len()])
                .collect();
            vec![Dataset {
                label: None,
                data,
                background_color: Some(ColorSpec::PerSlice(colors)),
                border_color: None,
                fill: None,
            }]
        }
        ChartKind::Bar => series_per_numeric_column(results, &numeric, false),
        ChartKind::Line => series_per_numeric_column(results, &numeric, true),
    };

    ChartSpec {
        kind,
        data: ChartData { labels, datasets },
    }
}

fn series_per_numeric_column(
    results: &ResultSet,
    numeric: &[&ColumnDef],
    line: bool,
) -> Vec<Dataset> {
    numeric
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let color = PALETTE[i % PALETTE.len()];
            let data = results
                .records
                .iter()
                .map(|record| column_value(record, Some(col)))
                .collect();
            Dataset {
                label: Some(col.name.clone()),
                data,
                background_color: if line {
                    None
                } else {
                    Some(ColorSpec::One(color))
                },
                border_color: Some(color),
                fill: line.then_some(false),
            }
        })
        .collect()
}

fn column_value(record: &crate::models::Record, col: Option<&&ColumnDef>) -> Value {
    col.and_then(|c| record.get(&c.name))
        .cloned()
        .unwrap_or(Value::Null)
}

fn label_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => crate::format::NULL_PLACEHOLDER.to_string(),
        Some(other) => other.to_string(),
    }
}

fn count_kind(columns: &[ColumnDef], kind: ColumnKind) -> usize {
    columns.iter().filter(|c| c.kind == kind).count()
}
