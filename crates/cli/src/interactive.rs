//! User prompts for the CLI.
//!
//! Responsibilities:
//! - Confirm destructive operations.
//! - Ask for login credentials that were not supplied by flags or environment.

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::io::Write;

/// Prompt the user for delete confirmation.
///
/// Returns `true` only when the user answers `y` or `Y`.
pub fn confirm_delete(item_name: &str, item_type: &str) -> Result<bool> {
    print!(
        "Are you sure you want to delete {} '{}'? [y/N] ",
        item_type, item_name
    );
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if !input.trim().eq_ignore_ascii_case("y") {
        println!("Delete cancelled.");
        return Ok(false);
    }

    Ok(true)
}

pub fn prompt_email() -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt("Email")
        .interact_text()
        .context("Failed to read email")
}

pub fn prompt_password(prompt: &str) -> Result<SecretString> {
    let input = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(false)
        .interact()
        .context("Failed to read password")?;
    Ok(SecretString::new(input.into()))
}
