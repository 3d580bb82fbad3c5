//! Form Guard - Entry Point
//!
//! Submit-time validation for login and registration forms, driven from
//! a line console on stdin.
//!
//! Usage: `form-guard [CONFIG_FILE]`. Without an argument the optional
//! `form_guard.toml` in the working directory is used.

use log::info;
use std::process::ExitCode;
use tokio::io::{BufReader, stdin, stdout};

use form_guard::GuardConfig;
use form_guard::console::{Session, run_console};
use form_guard::error::FormGuardError;
use form_guard::error::handlers::{error_to_exit_code, handle_error};
use form_guard::utils::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    info!("Launching form guard console...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

async fn run() -> Result<(), FormGuardError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            GuardConfig::load_from(&path)?
        }
        None => GuardConfig::load()?,
    };
    info!(
        "Guarding {} form(s): {:?}",
        config.forms.len(),
        config.forms.iter().map(|f| &f.form_id).collect::<Vec<_>>()
    );

    let mut session = Session::new(&config)?;
    run_console(&mut session, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
