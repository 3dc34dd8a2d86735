use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;

use lantern::api::{ApiClient, QueryBackend};
use lantern::config::Config;
use lantern::controller::{QueryController, QueryOutcome};
use lantern::export;

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = Config::parse();
    let controller = QueryController::new(ApiClient::new(&config.endpoint));

    let code = match &config.query {
        Some(query) => run_once(&controller, query, &config).await,
        None => repl(&controller).await,
    };
    std::process::exit(code);
}

/// One-shot mode: run a single query, print everything, exit non-zero on
/// failure.
async fn run_once<B: QueryBackend>(
    controller: &QueryController<B>,
    query: &str,
    config: &Config,
) -> i32 {
    match controller.submit(query).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            if config.chart {
                print_chart(&outcome);
            }
            if let Some(path) = &config.csv {
                match export_table(&outcome, path) {
                    Ok(rows) => println!("exported {} rows to {}", rows, path.display()),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return 1;
                    }
                }
            }
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

/// Interactive shell. A plain line submits a query; dot-commands stand in for
/// the page's buttons.
async fn repl<B: QueryBackend>(controller: &QueryController<B>) -> i32 {
    println!("lantern — ask questions in plain English (.help for commands)");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break, // EOF
            Ok(_) => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('.') {
            if !dispatch(controller, command).await {
                break;
            }
        } else {
            submit_and_print(controller, input).await;
        }
    }
    0
}

/// Run one dot-command. Returns false when the shell should exit.
async fn dispatch<B: QueryBackend>(controller: &QueryController<B>, command: &str) -> bool {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" => return false,
        "help" => print_help(),
        "sql" => match controller.state().last_sql() {
            Some(sql) => println!("{sql}"),
            None => println!("no generated SQL yet"),
        },
        "history" => print_history(controller),
        "rerun" => rerun(controller, rest).await,
        "export" => {
            let path = if rest.is_empty() {
                Path::new(export::DEFAULT_EXPORT_FILE)
            } else {
                Path::new(rest)
            };
            match controller.state().outcome() {
                Some(outcome) => match export_table(&outcome, path) {
                    Ok(rows) => println!("exported {} rows to {}", rows, path.display()),
                    Err(e) => eprintln!("error: {e}"),
                },
                None => eprintln!("error: no results to export"),
            }
        }
        "chart" => match controller.state().outcome() {
            Some(outcome) => print_chart(&outcome),
            None => eprintln!("error: no results to chart"),
        },
        "clear" => {
            controller.state().clear();
            println!("cleared");
        }
        "suggest" => {
            if rest.is_empty() {
                eprintln!("usage: .suggest <partial input>");
            } else {
                match controller.suggest(rest).await {
                    Ok(suggestions) => {
                        for s in suggestions {
                            println!("  {s}");
                        }
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
        }
        other => eprintln!("unknown command: .{other} (.help for commands)"),
    }
    true
}

async fn submit_and_print<B: QueryBackend>(controller: &QueryController<B>, query: &str) {
    match controller.submit(query).await {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => eprintln!("error: {e}"),
    }
}

async fn rerun<B: QueryBackend>(controller: &QueryController<B>, arg: &str) {
    let history = controller.state().history();
    let index = match arg.parse::<usize>() {
        Ok(n) if n >= 1 && n <= history.len() => n - 1,
        _ => {
            eprintln!("usage: .rerun <1..{}>", history.len().max(1));
            return;
        }
    };

    let query = history[index].query.clone();
    println!("> {query}");
    submit_and_print(controller, &query).await;
}

fn print_outcome(outcome: &QueryOutcome) {
    if let Some(sql) = &outcome.sql {
        println!("SQL: {sql}");
    }
    if let Some(note) = &outcome.note {
        println!("note: {note}");
    }

    print_table(&outcome.table.header, &outcome.table.rows);
    println!("{} rows", outcome.table.row_count());

    if let Some(chart) = &outcome.chart {
        println!("suggested chart: {} (.chart prints the spec)", chart.kind);
    }
}

fn print_table(header: &[String], rows: &[Vec<String>]) {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(header.to_vec());
    for row in rows {
        builder.push_record(row.clone());
    }
    println!(
        "{}",
        builder.build().with(tabled::settings::Style::rounded())
    );
}

fn print_chart(outcome: &QueryOutcome) {
    match &outcome.chart {
        Some(chart) => match serde_json::to_string_pretty(chart) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("error: {e}"),
        },
        None => println!("no chart suggested for this result set"),
    }
}

fn print_history<B: QueryBackend>(controller: &QueryController<B>) {
    let history = controller.state().history();
    if history.is_empty() {
        println!("no queries yet");
        return;
    }

    let mut builder = tabled::builder::Builder::default();
    builder.push_record(["#".to_string(), "Time".to_string(), "Rows".to_string(), "Query".to_string()]);
    for (i, entry) in history.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            entry.executed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.row_count.to_string(),
            entry.query.clone(),
        ]);
    }
    println!(
        "{}",
        builder.build().with(tabled::settings::Style::rounded())
    );
    println!("rerun one with .rerun <#>");
}

fn export_table(outcome: &QueryOutcome, path: &Path) -> lantern::Result<usize> {
    export::export_csv(&outcome.table, path)?;
    Ok(outcome.table.row_count())
}

fn print_help() {
    println!("  <text>           submit a query");
    println!("  .sql             print the generated SQL for the last query");
    println!("  .history         list this session's queries");
    println!("  .rerun <#>       re-submit a query from the history");
    println!("  .export [path]   write the current results as CSV ({})", export::DEFAULT_EXPORT_FILE);
    println!("  .chart           print the suggested chart spec as JSON");
    println!("  .suggest <text>  ask the server for query suggestions");
    println!("  .clear           drop the current results");
    println!("  .quit            exit");
}
