use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_DB_PATH: &str = "database/colleges.json";
pub const DEFAULT_TOP_K: usize = 5;

/// Application configuration loaded from environment variables.
/// The Gemini credential is optional: without it the AI operations degrade
/// to empty results instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub db_path: PathBuf,
    pub fetch_top_k: usize,
    pub structured_output: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            db_path: optional_env("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            fetch_top_k: match optional_env("FETCH_TOP_K") {
                Some(v) => v
                    .parse::<usize>()
                    .ok()
                    .filter(|k| *k > 0)
                    .context("FETCH_TOP_K must be a positive integer")?,
                None => DEFAULT_TOP_K,
            },
            structured_output: match optional_env("STRUCTURED_OUTPUT") {
                Some(v) => parse_bool(&v)
                    .with_context(|| format!("STRUCTURED_OUTPUT must be a boolean, got '{v}'"))?,
                None => true,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values the same as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("unrecognised boolean"),
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing at a scratch store, with no credential.
    pub fn for_tests(db_path: PathBuf) -> Self {
        Config {
            gemini_api_key: None,
            db_path,
            fetch_top_k: DEFAULT_TOP_K,
            structured_output: true,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
