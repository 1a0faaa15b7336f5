use anyhow::{Context, Result};

const DEFAULT_STORAGE_KEY: &str = "resumeData";
const DEFAULT_MAX_IMPORT_BYTES: usize = 256 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a set variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the resume is kept in process memory only.
    pub redis_url: Option<String>,
    pub storage_key: String,
    pub max_import_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redis_url: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: optional_env("REDIS_URL"),
            storage_key: optional_env("STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            max_import_bytes: match optional_env("MAX_IMPORT_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_IMPORT_BYTES must be a byte count")?,
                None => DEFAULT_MAX_IMPORT_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
