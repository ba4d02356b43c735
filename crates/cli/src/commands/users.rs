//! Users command implementation.
//!
//! Responsibilities:
//! - List, create, update and delete user accounts.
//!
//! Invariants:
//! - Only an Admin session may run these commands; the client refuses
//!   before any request is sent.
//! - Passwords are handled via SecretString and prompted for when omitted.

use anyhow::{Context, Result};
use clap::Subcommand;
use secrecy::SecretString;
use tracing::info;

use maintdesk_client::{CreateUserParams, Role, UpdateUserParams};
use maintdesk_config::Config;
use maintdesk_config::constants::DEFAULT_LIST_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result};
use crate::interactive::prompt_password;

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List all users
    List {
        /// Maximum number of users to print
        #[arg(short, long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
        count: usize,
    },
    /// Show one user
    Get { id: String },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Role name (Admin or Technician)
        #[arg(long, default_value = "Technician")]
        role: String,
        /// Initial password (prompts when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Change an existing user
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete a user
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: UsersCommand,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;

    match command {
        UsersCommand::List { count } => {
            info!("Listing users");
            let mut users = cancel.run(client.list_users()).await?;
            users.truncate(count);

            let format = OutputFormat::from_str(output_format)?;
            let output = get_formatter(format).format_users(&users)?;
            output_result(&output, format, output_file.as_ref())
        }
        UsersCommand::Get { id } => {
            let user = cancel
                .run(client.get_user(&id))
                .await
                .with_context(|| format!("Failed to get user {id}"))?;

            let format = OutputFormat::from_str(output_format)?;
            let output = get_formatter(format).format_users(std::slice::from_ref(&user))?;
            output_result(&output, format, output_file.as_ref())
        }
        UsersCommand::Create {
            name,
            email,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => SecretString::new(p.into()),
                None => prompt_password(&format!("Password for '{email}'"))?,
            };
            let params = CreateUserParams {
                name,
                email,
                password,
                role: Role::from_name(&role),
            };
            let user = cancel.run(client.create_user(&params)).await?;
            println!("User '{}' created with id {}.", user.email, user.id);
            Ok(())
        }
        UsersCommand::Update {
            id,
            name,
            email,
            role,
            password,
        } => {
            let params = UpdateUserParams {
                name,
                email,
                password: password.map(|p| SecretString::new(p.into())),
                role: role.as_deref().map(Role::from_name),
            };
            cancel
                .run(client.update_user(&id, &params))
                .await
                .with_context(|| format!("Failed to update user {id}"))?;
            println!("User {id} updated.");
            Ok(())
        }
        UsersCommand::Delete { id, force } => {
            if !force && !crate::interactive::confirm_delete(&id, "user")? {
                return Ok(());
            }
            cancel
                .run(client.delete_user(&id))
                .await
                .with_context(|| format!("Failed to delete user {id}"))?;
            println!("User {id} deleted.");
            Ok(())
        }
    }
}
