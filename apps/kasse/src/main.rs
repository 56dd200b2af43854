//! # Kasse Entry Point
//!
//! Parses the command line, sets up logging and hands over to
//! [`kasse::run`]. The database layer is async, but a till does one thing
//! at a time, so a current-thread runtime is enough.

use std::process::ExitCode;

use clap::Parser;
use kasse::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    kasse::init_tracing();

    match kasse::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                if let Ok(text) = serde_json::to_string_pretty(&e) {
                    println!("{}", text);
                }
            }
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
