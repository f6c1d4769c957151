use anyhow::{Context, Result};
use metadata_console::{
    config::AppConfig, controllers::metadata_list::MetadataListController,
    handlers::terminal::Terminal, routes::commands::dispatch,
    services::metadata_gateway::HttpMetadataGateway,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // --- Logging setup (stderr keeps stdout for the list) ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // --- Parse config + command ---
    let (cfg, command) = AppConfig::from_env_and_args()?;

    tracing::info!("Starting metadata-console with config: {:?}", cfg);

    // --- Initialize gateway + controller ---
    let gateway = HttpMetadataGateway::new(&cfg.base_url, cfg.timeout())
        .context("building HTTP client")?;
    let mut controller = MetadataListController::new(gateway);
    let mut terminal = Terminal::stdin();

    // --- Run command ---
    match dispatch(command, &mut controller, &mut terminal).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!("command failed with exit code {}", err.exit_code);
            eprintln!("{}", err);
            Ok(err.exit_code())
        }
    }
}
