use clap::Parser;

use roster_dash::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = roster_dash::pkg_version(),
        environment = ?cli.env,
        "Starting roster-dash"
    );

    execute_command(&cli, settings).await?;
    Ok(())
}
