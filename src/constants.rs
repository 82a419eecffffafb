//! Application constants and configuration

pub const APP_NAME: &str = "Rabbit Profile";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Secure store keys written by the sign-in flow
pub const STORE_KEY_USER_ID: &str = "id";
pub const STORE_KEY_TOKEN: &str = "token";

/// Environment overrides
pub const ENV_API_URL: &str = "RABBIT_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "RABBIT_REQUEST_TIMEOUT";
pub const ENV_STATIC_PROFILE: &str = "RABBIT_STATIC_PROFILE";

/// Shown in the blocking alert for any fetch failure
pub const FETCH_ERROR_MESSAGE: &str = "Could not load your profile. Please try again later.";
