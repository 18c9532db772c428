use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_SEMANTIC_THRESHOLD: f32 = 0.4;
const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Newline-delimited skill list replacing the built-in vocabulary.
    pub skills_file: Option<PathBuf>,
    /// Cosine similarity a phrase must strictly exceed to count as a semantic match.
    pub semantic_threshold: f32,
    /// Base URL of an Ollama-compatible embedding server. Unset disables semantic matching.
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let semantic_threshold = parse_env("SEMANTIC_THRESHOLD", DEFAULT_SEMANTIC_THRESHOLD)?;
        if !(-1.0..=1.0).contains(&semantic_threshold) {
            bail!("SEMANTIC_THRESHOLD must be within [-1, 1], got {semantic_threshold}");
        }

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skills_file: optional_env("SKILLS_FILE").map(PathBuf::from),
            semantic_threshold,
            embedding_url: optional_env("EMBEDDING_URL"),
            embedding_model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_timeout_secs: parse_env(
                "EMBEDDING_TIMEOUT_SECS",
                DEFAULT_EMBEDDING_TIMEOUT_SECS,
            )?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Returns the variable's value, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            skills_file: None,
            semantic_threshold: DEFAULT_SEMANTIC_THRESHOLD,
            embedding_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_timeout_secs: DEFAULT_EMBEDDING_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
