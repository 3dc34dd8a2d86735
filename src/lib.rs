pub mod api;
pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod render;
pub mod state;

pub use controller::{QueryController, QueryOutcome};
pub use error::{Error, Result};
pub use state::{QueryPhase, SessionState};
