// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ringer`: assign custom ringtones to contacts and SIM cards from the
//! command line, and manage the library of imported ringtone files.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod adapters;
mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(err) = init_tracing() {
        eprintln!("warning: logging disabled: {err}");
    }

    match app::App::open(&cli.config).and_then(|app| app.run(cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
