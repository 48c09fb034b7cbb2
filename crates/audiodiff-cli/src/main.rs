use std::io::{self, IsTerminal};
use std::process::ExitCode;

use audiodiff_engine::Outcome;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
    let cli = cli::Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("audiodiff: {e}");
            return exit_code(Outcome::Error);
        }
    };
    let code = runtime.block_on(run_until_interrupted(cli));
    // The comparison thread may still be blocked on a decoder; do not wait for it.
    runtime.shutdown_background();
    code
}

/// Run the comparison on a blocking thread, racing it against Ctrl-C.
async fn run_until_interrupted(cli: cli::Cli) -> ExitCode {
    let task = tokio::task::spawn_blocking(move || commands::run(&cli));
    tokio::select! {
        joined = task => match joined {
            Ok(Ok(outcome)) => exit_code(outcome),
            Ok(Err(e)) => {
                eprintln!("audiodiff: {e:#}");
                exit_code(Outcome::Error)
            }
            Err(e) => {
                error!(error = %e, "comparison task failed");
                exit_code(Outcome::Error)
            }
        },
        _ = interrupted() => {
            info!("Received Ctrl+C, stopping");
            ExitCode::from(commands::INTERRUPTED_EXIT_CODE)
        }
    }
}

async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "cannot install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

fn exit_code(outcome: Outcome) -> ExitCode {
    ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(2))
}
