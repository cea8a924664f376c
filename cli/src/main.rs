//! Command-line host for the vehicle inventory client.
//!
//! Executes the core's requests with ureq and prints each result, or the
//! failure line, to standard output.

mod cli;
mod commands;
mod transport;

use std::process::ExitCode;

use clap::Parser;
use vehicle_core::VehicleManager;

use crate::cli::Cli;
use crate::transport::UreqTransport;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("using vehicle service at {}", cli.url);

    let manager = VehicleManager::new(&cli.url, UreqTransport::new());
    match commands::run(cli.command, &manager) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
