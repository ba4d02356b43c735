//! Session commands: `login`, `logout` and `whoami`.
//!
//! Responsibilities:
//! - Exchange credentials for a stored session.
//! - Clear the stored session.
//! - Show the stored identity and the sections its role may open.
//!
//! Invariants:
//! - Login runs from the login page, so a rejected login never clears an
//!   existing session.

use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::info;

use maintdesk_config::Config;
use maintdesk_config::constants::LOGIN_PATH;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, SessionView, get_formatter, output_result};
use crate::interactive::{prompt_email, prompt_password};

pub async fn run_login(
    config: Config,
    email: Option<String>,
    password: Option<String>,
    cancel: &CancellationToken,
) -> Result<()> {
    let email = match email.or_else(|| config.login.email.clone()) {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = match password {
        Some(p) => SecretString::new(p.into()),
        None => match config.login.password.clone() {
            Some(p) => p,
            None => prompt_password("Password")?,
        },
    };

    info!(email = %email, "Logging in");

    let client = super::build_client(&config, LOGIN_PATH)?;
    let session = cancel.run(client.login(&email, &password)).await?;

    println!(
        "Logged in as {} ({}).",
        session.name.as_deref().unwrap_or(&email),
        session
            .role
            .as_ref()
            .map(|r| r.as_str())
            .unwrap_or("no role")
    );
    Ok(())
}

pub fn run_logout(config: Config) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    client.logout().context("Failed to clear the stored session")?;
    println!("Logged out.");
    Ok(())
}

pub fn run_whoami(
    config: Config,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    let info = client
        .session_info()
        .context("Failed to read the stored session")?;

    let format = OutputFormat::from_str(output_format)?;
    let output = get_formatter(format).format_session(&SessionView::from(&info))?;
    output_result(&output, format, output_file.as_ref())?;
    Ok(())
}
