use clap::Parser;
use orderbook::FeedHandler;
use std::fs;
use std::process::ExitCode;

/// Replays a market-data feed file through the order book, line by line.
#[derive(Parser)]
#[command(name = "replay")]
#[command(about = "Replays a feed file through the order book and prints its output")]
struct Cli {
    /// Feed file to replay, one command per line.
    file: String,
    /// Restrict processing to this symbol; every other symbol is silently dropped.
    symbol: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let contents = match fs::read_to_string(&cli.file) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!(file = %cli.file, error = %e, "failed to open feed file");
            eprintln!("error: could not open {}: {}", cli.file, e);
            return ExitCode::FAILURE;
        }
    };

    let mut handler = FeedHandler::new(
        cli.symbol,
        |line: &str| println!("{line}"),
        |line: &str, err: &str| eprintln!("error: {err}; line: {line}"),
    );

    let mut lines = 0usize;
    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }
        handler.process_command(line);
        lines += 1;
    }
    tracing::info!(lines, "replay complete");

    ExitCode::SUCCESS
}
