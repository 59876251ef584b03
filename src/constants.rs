//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default address of the control-plane service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:35182";

/// Path staged when the console starts
pub const DEFAULT_PATH: &str = "/status";

/// Initial value of every quick-action path field
pub const DEFAULT_FORM_PATH: &str = "C:\\";

/// Initial `max` for the search form
pub const DEFAULT_SEARCH_MAX: &str = "50";

/// Accepted range for the search `max` parameter
pub const SEARCH_MAX_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "ctlprobe.log";

/// Application name
pub const APP_NAME: &str = "ctlprobe";
