use crate::constants;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Which API answers the per-match "who played in which slot" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailProviderKind {
    /// STRATZ GraphQL, bearer token required
    #[default]
    Stratz,
    /// OpenDota `/matches/{id}`, unauthenticated
    OpenDota,
}

impl std::fmt::Display for DetailProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailProviderKind::Stratz => write!(f, "stratz"),
            DetailProviderKind::OpenDota => write!(f, "opendota"),
        }
    }
}

impl std::str::FromStr for DetailProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stratz" => Ok(DetailProviderKind::Stratz),
            "opendota" => Ok(DetailProviderKind::OpenDota),
            other => Err(format!(
                "unknown detail provider '{other}', expected 'stratz' or 'opendota'"
            )),
        }
    }
}

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Account whose last matches are scanned for teammates.
    pub tracked_account_id: i64,
    /// Bearer token for the STRATZ API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stratz_token: Option<String>,
    /// Source of per-match player slots.
    pub detail_provider: DetailProviderKind,
    /// Base URL of the OpenDota API, without trailing slash.
    pub history_api_base: String,
    /// Full URL of the STRATZ GraphQL endpoint.
    pub detail_api_url: String,
    /// How many days of history to scan.
    pub window_days: u32,
    /// Games shorter than this many seconds are skipped.
    pub min_duration_seconds: i64,
    /// Largest player slot difference counted as "same team".
    pub max_slot_distance: i32,
    /// Pause before each detail request, in milliseconds.
    pub request_delay_ms: u64,
    /// HTTP timeout in seconds for API requests.
    pub http_timeout_seconds: u64,
    /// Retries for transient HTTP failures (timeouts, 429, 5xx).
    pub max_retries: u32,
    /// First backoff step in milliseconds; doubles on every retry.
    pub retry_base_delay_ms: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tracked_account_id: constants::DEFAULT_TRACKED_ACCOUNT_ID,
            stratz_token: None,
            detail_provider: DetailProviderKind::default(),
            history_api_base: constants::DEFAULT_HISTORY_API_BASE.to_string(),
            detail_api_url: constants::DEFAULT_DETAIL_API_URL.to_string(),
            window_days: constants::matches::WINDOW_DAYS,
            min_duration_seconds: constants::matches::MIN_DURATION_SECONDS,
            max_slot_distance: constants::matches::MAX_SLOT_DISTANCE,
            request_delay_ms: constants::pacing::REQUEST_DELAY_MS,
            http_timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            max_retries: constants::retry::MAX_ATTEMPTS,
            retry_base_delay_ms: constants::retry::BASE_DELAY_MS,
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads and validates configuration from the default config file location.
    ///
    /// # Environment Variables
    /// - `DOTA_TEAMMATES_STRATZ_TOKEN` - Override the STRATZ bearer token
    /// - `DOTA_TEAMMATES_ACCOUNT_ID` - Override the tracked account id
    /// - `DOTA_TEAMMATES_LOG_FILE` - Override log file path
    /// - `DOTA_TEAMMATES_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Notes
    /// - A missing config file is not an error, defaults are used instead
    /// - Environment variables take precedence over config file values
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_path(&get_config_path()).await
    }

    /// Same as [`Config::load`] but reads the file at `path`.
    pub async fn load_with_path(path: &str) -> Result<Self, AppError> {
        let config = Self::load_unvalidated(path).await?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file at `path` (or defaults when it is missing) and applies
    /// environment overrides without validating the result. Used by the config
    /// editing commands, which must work before a token has been set.
    pub async fn load_unvalidated(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            debug!("No config file at {path}, using defaults");
            Config::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Loads configuration from a file path, without env overrides or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        use constants::env_vars;

        if let Ok(token) = std::env::var(env_vars::STRATZ_TOKEN)
            && !token.trim().is_empty()
        {
            self.stratz_token = Some(token.trim().to_string());
        }

        if let Ok(account_id) = std::env::var(env_vars::ACCOUNT_ID) {
            self.tracked_account_id = account_id.trim().parse::<i64>().map_err(|e| {
                AppError::config_error(format!(
                    "{} must be a numeric account id, got '{account_id}': {e}",
                    env_vars::ACCOUNT_ID
                ))
            })?;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        Ok(())
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays the configuration stored at `path` to stdout. The token is masked.
    pub async fn display(path: &str) -> Result<(), AppError> {
        let log_dir = get_log_dir_path();

        if !Path::new(path).exists() {
            println!("\nNo configuration file found at:");
            println!("{path}");
            println!("(Defaults and environment variables are used)");
        }

        let config = Config::load_unvalidated(path).await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{path}");
        println!("────────────────────────────────────");
        println!("Tracked Account:");
        println!("{}", config.tracked_account_id);
        println!("────────────────────────────────────");
        println!("Detail Provider:");
        println!("{}", config.detail_provider);
        println!("────────────────────────────────────");
        println!("STRATZ Token:");
        println!("{}", mask_token(config.stratz_token.as_deref()));
        println!("────────────────────────────────────");
        println!("History Window:");
        println!(
            "{} days, games of {}s or longer",
            config.window_days, config.min_duration_seconds
        );
        println!("────────────────────────────────────");
        println!("Request Pacing:");
        println!(
            "{} ms between detail requests, {} s timeout, {} retries",
            config.request_delay_ms, config.http_timeout_seconds, config.max_retries
        );
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", constants::LOG_FILE_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and strips trailing
    /// slashes from the API URLs so request paths can be appended verbatim.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let normalized = Config {
            history_api_base: self.history_api_base.trim_end_matches('/').to_string(),
            detail_api_url: self.detail_api_url.trim_end_matches('/').to_string(),
            ..self.clone()
        };
        let content = toml::to_string_pretty(&normalized)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn mask_token(token: Option<&str>) -> String {
    match token {
        None => "(not set)".to_string(),
        Some(t) if t.chars().count() <= 8 => "********".to_string(),
        Some(t) => {
            let tail: String = t
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("********{tail}")
        }
    }
}
