mod cli;
mod color;
mod data;
mod error;
mod plot;
mod runner;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let summary = runner::run(&args);
    summary.report();

    // Per-stage failures never abort the other stages, but the process
    // still reflects them in its exit status.
    if summary.any_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
