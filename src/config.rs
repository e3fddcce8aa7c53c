//! Application configuration.
//!
//! Values come from `config.toml` first, then the environment (a `.env` file
//! is loaded if present), then built-in defaults.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

// ==================== Config File ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    deck: Option<DeckConfig>,
    server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
struct DeckConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

fn read_config_file() -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(paths::CONFIG_FILE) else {
        return AppConfig::default();
    };
    parse_config(&contents)
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid {}: {}", paths::CONFIG_FILE, e);
        AppConfig::default()
    })
}

// ==================== Deck Configuration ====================

/// Load flashcard deck path with priority: config.toml > .env > default
pub fn load_flashcards_path() -> PathBuf {
    let _ = dotenvy::dotenv();
    resolve_flashcards_path(&read_config_file(), std::env::var("FLASHCARDS_PATH").ok())
}

fn resolve_flashcards_path(config: &AppConfig, env_path: Option<String>) -> PathBuf {
    // Priority 1: config.toml
    if let Some(path) = config.deck.as_ref().and_then(|d| d.path.clone()) {
        tracing::info!("Using flashcards from config.toml: {}", path);
        return PathBuf::from(path);
    }

    // Priority 2: .env FLASHCARDS_PATH
    if let Some(path) = env_path {
        tracing::info!("Using flashcards from FLASHCARDS_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::flashcards_path());
    tracing::info!("Using default flashcards path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address: config.toml > PORT env > default
pub fn server_bind_addr() -> String {
    let _ = dotenvy::dotenv();
    resolve_bind_addr(&read_config_file(), std::env::var("PORT").ok())
}

fn resolve_bind_addr(config: &AppConfig, env_port: Option<String>) -> String {
    let server = config.server.as_ref();
    let addr = server
        .and_then(|s| s.addr.clone())
        .unwrap_or_else(|| SERVER_ADDR.to_string());
    let port = server
        .and_then(|s| s.port)
        .or_else(|| env_port.and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);
    format!("{}:{}", addr, port)
}

// ==================== Session Configuration ====================

/// Name of the cookie carrying the quiz session ID
pub const SESSION_COOKIE_NAME: &str = "jkd_quiz_session";

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;
