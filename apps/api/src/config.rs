use anyhow::{Context, Result};

use crate::screening::attributes::DEFAULT_SKILLS;
use crate::screening::pipeline::DEFAULT_SHORTLIST_SIZE;

const DEFAULT_MAX_UPLOAD_MB: usize = 20;
const BYTES_PER_MB: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparsable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Skills searched for when a request does not name its own.
    pub skills: Vec<String>,
    pub shortlist_size: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skills: std::env::var("SCREENER_SKILLS")
                .ok()
                .map(|raw| parse_skill_list(&raw))
                .filter(|skills| !skills.is_empty())
                .unwrap_or_else(default_skills),
            shortlist_size: std::env::var("SCREENER_SHORTLIST_SIZE")
                .unwrap_or_else(|_| DEFAULT_SHORTLIST_SIZE.to_string())
                .parse::<usize>()
                .context("SCREENER_SHORTLIST_SIZE must be a non-negative integer")?,
            max_upload_bytes: megabytes_to_bytes(
                std::env::var("SCREENER_MAX_UPLOAD_MB")
                    .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
                    .parse::<usize>()
                    .context("SCREENER_MAX_UPLOAD_MB must be a non-negative integer")?,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            skills: default_skills(),
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * BYTES_PER_MB,
        }
    }
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize> {
    megabytes
        .checked_mul(BYTES_PER_MB)
        .with_context(|| format!("SCREENER_MAX_UPLOAD_MB={megabytes} overflows the upload limit"))
}

pub fn default_skills() -> Vec<String> {
    DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Splits a comma-separated skill list, dropping blank entries.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(
            parse_skill_list(" Rust, machine learning ,, sql "),
            vec!["Rust", "machine learning", "sql"]
        );
    }

    #[test]
    fn test_parse_skill_list_blank() {
        assert!(parse_skill_list(" , ,").is_empty());
    }

    #[test]
    fn test_upload_limit_in_bytes() {
        assert_eq!(megabytes_to_bytes(20).unwrap(), 20 * 1024 * 1024);
        assert_eq!(megabytes_to_bytes(0).unwrap(), 0);
    }

    #[test]
    fn test_upload_limit_overflow_is_error() {
        let err = megabytes_to_bytes(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("SCREENER_MAX_UPLOAD_MB"));
    }

    #[test]
    fn test_default_config_uses_built_in_skills() {
        let config = Config::default();
        assert_eq!(config.skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(config.shortlist_size, 2);
    }
}
