//! Interactive random-user CSV exporter.
//!
//! This binary wires terminal prompts, settings, the HTTP client and the
//! system clock into `random_user_export::export_users`. Request and decoding
//! failures are reported on stdout and end the run normally; settings
//! (including a malformed API host), terminal and filesystem failures produce
//! a failing exit status.

use std::io::{self, Write};
use std::process::ExitCode;

use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use random_user_export::{ExportSettings, PipelineError, Prompter, collect_request, export_users};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    init_tracing();

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            write_error(&format!("failed to create Tokio runtime: {err}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.report_line() {
            Some(line) => {
                write_line(&line);
                ExitCode::SUCCESS
            }
            None => {
                write_error(&err.to_string());
                ExitCode::FAILURE
            }
        },
    }
}

async fn run() -> Result<(), PipelineError> {
    let settings = ExportSettings::load().map_err(|err| PipelineError::Settings {
        message: err.to_string(),
    })?;
    let destination = settings.destination(&DefaultEnv::new())?;
    let client = settings.client()?;
    info!(
        base_url = %client.base_url(),
        path = %destination.path(),
        "export configured"
    );

    let request = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        collect_request(&mut prompter)?
    };

    let mut rng = rand::rng();
    let outcome = export_users(&request, &client, &DefaultClock, &mut rng, &destination).await?;
    write_line(outcome.message());
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn write_line(message: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
}

fn write_error(message: &str) {
    if let Err(err) = writeln!(io::stderr().lock(), "{message}") {
        drop(err);
    }
}
