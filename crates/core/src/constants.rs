//! Constants used throughout the HMS core crate.

/// Backend base URL used when `HMS_API_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Request timeout used when `HMS_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Storage key under which the session token is persisted.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Default filename for the persisted session token.
pub const TOKEN_FILE_NAME: &str = ".hms-session.json";

/// Shown in place of an absent address.
pub const ADDRESS_PLACEHOLDER: &str = "-";

/// Dashboard window used when no date range is supplied.
pub const DEFAULT_REPORT_DAYS: u32 = 30;
