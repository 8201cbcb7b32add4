//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::io::{self, Write};
use std::sync::Arc;

use super::handlers::{BrowseCommandHandler, ImportCommandHandler, PlayersCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::external::players::{PlayerApi, PlayerServiceClient};

/// Execute a CLI command with the given settings
///
/// Builds the player service client from `settings` and dispatches to the
/// matching handler. Without a subcommand the browse session starts.
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    let api: Arc<dyn PlayerApi> = Arc::new(PlayerServiceClient::from_config(&settings.api)?);
    tracing::debug!(base_url = %settings.api.base_url, "Player service client ready");

    execute_with_api(cli, settings, api).await
}

/// Dispatch to a handler using an already built client.
pub async fn execute_with_api(
    cli: &Cli,
    settings: Settings,
    api: Arc<dyn PlayerApi>,
) -> AppResult<()> {
    let mut stdout = io::stdout();
    let result = match &cli.command {
        Some(Commands::List(args)) => {
            PlayersCommandHandler::new(api, settings)
                .list(args, &mut stdout)
                .await
        }
        Some(Commands::Get { id, json, units }) => {
            PlayersCommandHandler::new(api, settings)
                .get(*id, *json, *units, &mut stdout)
                .await
        }
        Some(Commands::Create(args)) => {
            PlayersCommandHandler::new(api, settings)
                .create(args, &mut stdout)
                .await
        }
        Some(Commands::Update(args)) => {
            PlayersCommandHandler::new(api, settings)
                .update(args, &mut stdout)
                .await
        }
        Some(Commands::Delete { id, yes }) => {
            let mut stdin = io::BufReader::new(io::stdin());
            PlayersCommandHandler::new(api, settings)
                .delete(*id, *yes, &mut stdin, &mut stdout)
                .await
        }
        Some(Commands::Import { file, check }) => ImportCommandHandler::new(api)?
            .execute(file, *check, &mut stdout)
            .await
            .map(|_| ()),
        Some(Commands::Browse { fresh }) => {
            BrowseCommandHandler::new(api, settings)
                .execute(*fresh)
                .await
        }
        None => BrowseCommandHandler::new(api, settings).execute(false).await,
    };
    stdout.flush().map_err(|e| AppError::io("stdout", e))?;
    result
}

/// Validate command arguments before execution
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    if let Err(msg) = cli.validate() {
        return Err(AppError::Validation {
            field: "cli_arguments".to_string(),
            reason: msg,
        });
    }

    Ok(())
}
