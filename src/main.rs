mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_update};
use dota_teammates::config::Config;
use dota_teammates::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args
        .config_path
        .clone()
        .unwrap_or_else(Config::get_config_path);

    // The log path may live in config; a broken config is reported later, not here
    let config_log_path = Config::load_unvalidated(&config_path)
        .await
        .ok()
        .and_then(|config| config.log_file_path);

    let (log_file_path, _guard) = logging::setup_logging(&args, config_log_path).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return commands::handle_list_config_command(&config_path).await;
    }

    if is_config_update(&args) {
        return commands::handle_config_update_command(&args, &config_path).await;
    }

    commands::handle_run_command(&args, &config_path).await
}
