//! Project path functions - single source of truth for runtime file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! The concept reference table is compiled in and does not depend on
//! `DATA_DIR`.

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Default flashcard deck location
pub fn flashcards_path() -> String {
    format!("{}/flashcards.json", data_dir())
}

/// Static assets served under /static - not under DATA_DIR
pub const STATIC_DIR: &str = "static";

/// Optional config file, relative to the working directory
pub const CONFIG_FILE: &str = "config.toml";

#[cfg(test)]
mod tests {
    use super::*;

    // OnceLock initializes once, so only the default shape is checked.

    #[test]
    fn test_data_dir_default() {
        assert!(!data_dir().is_empty());
    }

    #[test]
    fn test_flashcards_path_format() {
        assert!(flashcards_path().ends_with("/flashcards.json"));
    }
}
