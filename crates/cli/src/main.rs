//! maintdesk - maintenance dashboard from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run dashboard commands through the shared session-managed client.
//! - Map failures to structured exit codes.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - A forced logout always tells the user how to sign in again.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod interactive;

use std::str::FromStr;
use std::time::Duration;

use args::{Cli, Commands};
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt, is_forced_logout};
use maintdesk_client::{LogFormat, MetricsExporter, TracingConfig};
use maintdesk_config::ConfigLoader;

fn fail(message: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {:#}", message, err);
    std::process::exit(ExitCode::GeneralError.as_i32());
}

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        fail("Failed to load environment", e);
    }

    let cli = Cli::parse();

    let log_format = LogFormat::from_str(&cli.log_format)
        .unwrap_or_else(|e| fail("Invalid --log-format", e));
    let mut tracing_config = TracingConfig::new()
        .with_service_name("maintdesk-cli")
        .with_log_format(log_format);
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = tracing_config
        .init()
        .unwrap_or_else(|e| fail("Failed to initialize tracing", e));

    let _metrics_exporter = cli.metrics_bind.as_deref().map(|bind_addr| {
        MetricsExporter::install(bind_addr)
            .unwrap_or_else(|e| fail("Failed to start metrics exporter", e))
    });

    let mut loader = ConfigLoader::new()
        .from_env()
        .unwrap_or_else(|e| fail("Failed to load configuration from environment", e));

    // Flags win over environment values.
    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(ref path) = cli.session_path {
        loader = loader.with_session_path(path.clone());
    }
    if let Commands::Login {
        email: Some(ref email),
        ..
    } = cli.command
    {
        loader = loader.with_email(email.clone());
    }

    let config = loader
        .build()
        .unwrap_or_else(|e| fail("Failed to build configuration", e));

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if is_forced_logout(&e) {
                eprintln!("Session ended. Run `maintdesk login` to sign in again.");
            }
            e.exit_code()
        }
    };

    tracing_guard.shutdown();
    std::process::exit(exit_code.as_i32());
}
