use std::process;

use serde::Serialize;
use stepflow_rust::cli::{parse_args, Command, USAGE};
use stepflow_rust::demo::{run_bills, run_call, run_onboarding};
use stepflow_rust::{AppError, CONFIG};
use tracing_subscriber::EnvFilter;

fn print_report<T: Serialize>(report: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| AppError::Io(std::io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}

async fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Bills(args) => print_report(&run_bills(&args)?),
        Command::Onboarding(args) => print_report(&run_onboarding(&args)?),
        Command::Call(args) => print_report(&run_call(&args, CONFIG.to_call_timings()).await?),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_new(&CONFIG.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[stepflow] {e}\n{USAGE}");
            process::exit(e.exit_code());
        }
    };
    if let Err(e) = run(command).await {
        eprintln!("[stepflow] {e}");
        process::exit(e.exit_code());
    }
}
