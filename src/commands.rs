use crate::cli::Args;
use dota_teammates::config::Config;
use dota_teammates::config::user_prompts::prompt_for_stratz_token;
use dota_teammates::error::AppError;
use dota_teammates::report::{render_json, render_summary};
use dota_teammates::teammates::TeammateFinder;
use tracing::{error, info};

/// Handles the --list-config command.
pub async fn handle_list_config_command(config_path: &str) -> Result<(), AppError> {
    Config::display(config_path).await
}

/// Handles configuration update commands (--set-token, --set-account-id,
/// --set-log-file, --clear-log-file).
///
/// Works on an unvalidated config so a token can be set on a fresh install.
pub async fn handle_config_update_command(args: &Args, config_path: &str) -> Result<(), AppError> {
    let mut config = Config::load_unvalidated(config_path).await?;

    if let Some(token) = &args.new_token {
        let token = if token.trim().is_empty() {
            prompt_for_stratz_token().await?
        } else {
            token.trim().to_string()
        };
        if token.is_empty() {
            return Err(AppError::config_error("STRATZ token cannot be empty"));
        }
        config.stratz_token = Some(token);
    }

    if let Some(account_id) = args.new_account_id {
        config.tracked_account_id = account_id;
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save_to_path(config_path).await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Applies the per-run search options on top of the loaded config.
pub fn apply_run_overrides(config: &mut Config, args: &Args) {
    if let Some(account_id) = args.account_id {
        config.tracked_account_id = account_id;
    }
    if let Some(days) = args.days {
        config.window_days = days;
    }
    if let Some(provider) = args.provider {
        config.detail_provider = provider;
    }
}

/// Runs the teammate search and prints the result.
pub async fn handle_run_command(args: &Args, config_path: &str) -> Result<(), AppError> {
    let mut config = Config::load_unvalidated(config_path).await?;
    apply_run_overrides(&mut config, args);
    config.validate()?;

    info!(
        "Searching teammates of {} over {} days",
        config.tracked_account_id, config.window_days
    );
    let finder = TeammateFinder::from_config(config)?;

    let report = match finder.run().await {
        Ok(report) => report,
        Err(e) => {
            if e.is_auth_failure() {
                eprintln!("The detail API rejected the token. Set a new one with --set-token.");
            }
            error!("Teammate search failed: {e}");
            return Err(e);
        }
    };

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_summary(&report, args.limit));
    }

    Ok(())
}
