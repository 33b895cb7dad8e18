//! Application-wide constants and configuration defaults
//!
//! Every value here is a default; the ones that shape a run can be overridden
//! through the config file or environment variables.

/// Account whose match history drives the query when none is configured
pub const DEFAULT_TRACKED_ACCOUNT_ID: i64 = 92832630;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Base URL of the match-history API
pub const DEFAULT_HISTORY_API_BASE: &str = "https://api.opendota.com/api";

/// GraphQL endpoint of the match-detail API
pub const DEFAULT_DETAIL_API_URL: &str = "https://api.stratz.com/graphql";

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "dota_teammates.log";

/// Default filter directive for the tracing subscriber
pub const LOG_FILTER_DIRECTIVE: &str = "dota_teammates=info";

/// Match selection and teammate heuristics
pub mod matches {
    /// Size of the history window, in days
    pub const WINDOW_DAYS: u32 = 30;

    /// Games shorter than this (seconds) are ignored entirely
    pub const MIN_DURATION_SECONDS: i64 = 600;

    /// Largest slot difference still treated as "same team"
    pub const MAX_SLOT_DISTANCE: i32 = 5;
}

/// Request pacing towards the detail API
pub mod pacing {
    /// Fixed pause before every detail request (milliseconds)
    pub const REQUEST_DELAY_MS: u64 = 1000;
}

/// Environment variable names
pub mod env_vars {
    /// Bearer token for the detail API
    pub const STRATZ_TOKEN: &str = "DOTA_TEAMMATES_STRATZ_TOKEN";

    /// Tracked account id override
    pub const ACCOUNT_ID: &str = "DOTA_TEAMMATES_ACCOUNT_ID";

    /// Log file path override
    pub const LOG_FILE: &str = "DOTA_TEAMMATES_LOG_FILE";

    /// HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "DOTA_TEAMMATES_HTTP_TIMEOUT";
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECONDS: u64 = 30;

    /// Jitter applied to backoff delays (+/- fraction of the delay)
    pub const JITTER_FRACTION: f64 = 0.2;
}
