use thiserror::Error;

/// Everything that can go wrong between a submitted query and a rendered
/// result. Each variant is terminal where it is detected; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The trimmed input was empty; no request is issued.
    #[error("Please enter a query")]
    EmptyQuery,

    /// A request is already in flight for this session.
    #[error("A query is already running")]
    Busy,

    /// Transport failure or non-2xx status. Carries the server-provided
    /// message when the error body parsed, otherwise a generic one.
    #[error("{0}")]
    Http(String),

    /// The server answered 2xx but reported `success: false`.
    #[error("{0}")]
    Api(String),

    /// The query succeeded but returned no rows.
    #[error("No results found for your query")]
    NoResults,

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
