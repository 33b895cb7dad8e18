use super::{Config, DetailProviderKind};
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API URLs must start with http:// or https://
/// - The STRATZ provider needs a non-empty bearer token
/// - The tracked account id must be positive
/// - The history window must cover at least one day
/// - Slot distance and durations cannot be negative
/// - If log file path is provided, it cannot be empty and its parent must be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_url("history_api_base", &config.history_api_base)?;
    validate_url("detail_api_url", &config.detail_api_url)?;

    if config.detail_provider == DetailProviderKind::Stratz {
        let has_token = config
            .stratz_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_token {
            return Err(AppError::config_error(
                "A STRATZ token is required for the stratz detail provider \
                 (use --set-token or DOTA_TEAMMATES_STRATZ_TOKEN)",
            ));
        }
    }

    if config.tracked_account_id <= 0 {
        return Err(AppError::config_error(format!(
            "Tracked account id must be positive, got {}",
            config.tracked_account_id
        )));
    }

    if config.window_days == 0 {
        return Err(AppError::config_error("window_days must be at least 1"));
    }

    if config.max_slot_distance < 0 {
        return Err(AppError::config_error("max_slot_distance cannot be negative"));
    }

    if config.min_duration_seconds < 0 {
        return Err(AppError::config_error(
            "min_duration_seconds cannot be negative",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

fn validate_url(field: &str, url: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::config_error(format!("{field} cannot be empty")));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "{field} must start with http:// or https://, got '{url}'"
        )));
    }
    Ok(())
}
