//! Replay host entry point.

use clap::Parser;
use floorplan_app::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match floorplan_app::run(&args) {
        Ok(plan) => {
            log::info!("Done: '{}' with {} elements", plan.name, plan.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
