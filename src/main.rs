use std::{path::Path, process};

use chrono::Local;
use clap::Parser;
use cli::Args;
use error::RunnerError;
use log::{debug, info};
use run::{
    config::RunConfig,
    exec::{self, Interrupt},
    logs::{self, LogFiles, LOG_ROOT},
    qemu,
};

mod cli;
mod error;
mod run;

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let code = match launch(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            if let Some(hint) = err.hint() {
                eprintln!("Error: {hint}");
            }
            err.exit_code()
        }
    };

    process::exit(code);
}

/// Validates the arguments, assembles the QEMU command line and runs it.
fn launch(args: Args) -> Result<i32, RunnerError> {
    let interrupt = Interrupt::install()?;
    let config = RunConfig::try_from(args)?;

    let timestamp = logs::timestamp(Local::now());
    let log_files = LogFiles::prepare(&config, Path::new(LOG_ROOT), &timestamp)?;

    let cmd = qemu::command_line(&config, &log_files);
    if config.verbose {
        println!("{cmd:?}");
    }

    info!("Launching {}", config.qemu());
    let code = exec::execute(&cmd, &interrupt)?;
    debug!("Exit code {code}");

    Ok(code)
}
