use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration. With a query argument the binary runs once and
/// exits; without one it starts the interactive shell.
#[derive(Debug, Parser)]
#[command(
    name = "lantern",
    version,
    about = "Ask a natural-language SQL service questions from the terminal"
)]
pub struct Config {
    /// Natural-language query to run once
    pub query: Option<String>,

    /// Base URL of the query server
    #[arg(long, env = "LANTERN_ENDPOINT", default_value = "http://127.0.0.1:5000")]
    pub endpoint: String,

    /// Write one-shot query results to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Print the suggested chart specification as JSON after the results
    #[arg(long)]
    pub chart: bool,
}
