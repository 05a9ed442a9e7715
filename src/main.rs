use anyhow::Result;
use banner_patcher::patcher::{Patcher, DEFAULT_TARGET};
use banner_patcher::report::{self, EXIT_FAILURE};
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "banner-patcher")]
#[command(
    about = "Replace the startup banner of the installed CLI",
    long_about = "Replaces HERO'S QUEST with HYRULE CODE and TRIFORCE POWER ACTIVATED \
                  with TRIFORCE AWAKENED in the installed CLI entry script. \
                  Running it again is a no-op."
)]
#[command(version)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_logging();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            println!("❌ {} {:#}", "Error patching file:".red(), e);
            EXIT_FAILURE
        }
    };

    ExitCode::from(code as u8)
}

fn run() -> Result<i32> {
    let patcher = Patcher::new(DEFAULT_TARGET)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = report::execute(&patcher, &mut out);
    out.flush()?;
    Ok(code)
}

/// Logs go to stderr so stdout carries only the status message.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
