use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use dota_teammates::DetailProviderKind;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when the arguments ask for a config change instead of a search.
pub fn is_config_update(args: &Args) -> bool {
    args.new_token.is_some()
        || args.new_account_id.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Dota 2 Teammate Finder
///
/// Scans the last 30 days of a Dota 2 account's matches and lists the players
/// it shared the most games with, most frequent first.
///
/// Match lists come from OpenDota. Per-match player slots come from STRATZ,
/// which needs an API token (set it once with --set-token).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Account to scan instead of the configured one.
    #[arg(long = "account-id", short = 'a', help_heading = "Search Options")]
    pub account_id: Option<i64>,

    /// Number of days of history to scan.
    #[arg(long = "days", short = 'd', help_heading = "Search Options")]
    pub days: Option<u32>,

    /// Where per-match player slots are fetched from: stratz or opendota.
    #[arg(long = "provider", help_heading = "Search Options")]
    pub provider: Option<DetailProviderKind>,

    /// Show at most this many teammates.
    #[arg(long = "limit", short = 'n', help_heading = "Output Options")]
    pub limit: Option<usize>,

    /// Print the full report as JSON instead of plain lines.
    #[arg(long = "json", help_heading = "Output Options")]
    pub json: bool,

    /// Read and write the config file at this path instead of the default location.
    #[arg(long = "config", value_name = "PATH", help_heading = "Configuration")]
    pub config_path: Option<String>,

    /// Store a STRATZ API token in config. Will prompt for the token if not provided.
    #[arg(
        long = "set-token",
        help_heading = "Configuration",
        value_name = "TOKEN",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_token: Option<String>,

    /// Store the account to scan by default.
    #[arg(long = "set-account-id", help_heading = "Configuration")]
    pub new_account_id: Option<i64>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also print log lines (progress, per-teammate counts) to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
