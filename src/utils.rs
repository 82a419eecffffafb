//! Utility functions

use crate::constants::APP_NAME;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Caption shown under the profile card
pub fn format_updated_at(at: &DateTime<Local>) -> String {
    format!("Updated {}", at.format("%H:%M:%S"))
}

/// Empty strings render as a single space so the row keeps its height
pub fn display_or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        " "
    } else {
        value
    }
}
