//! Configuration module for the blogdraft server.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key gating the /api routes (optional in dev)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// API key for the chat-completions service
    pub openai_api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API, without trailing slash
    pub openai_base_url: String,
    pub openai_model: String,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("BLOGDRAFT_API_PSK").ok();

        let db_path = env::var("BLOGDRAFT_DB_PATH")
            .unwrap_or_else(|_| "./data/blogdraft.sqlite".to_string())
            .into();

        let bind_addr_raw =
            env::var("BLOGDRAFT_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "BLOGDRAFT_BIND_ADDR",
            value: bind_addr_raw.clone(),
        })?;

        let log_level = env::var("BLOGDRAFT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

        let openai_base_url = env::var("BLOGDRAFT_OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let openai_model =
            env::var("BLOGDRAFT_OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());

        let max_tokens: u32 = parse_number("BLOGDRAFT_MAX_TOKENS", 4096)?;
        let timeout_secs: u64 = parse_number("BLOGDRAFT_REQUEST_TIMEOUT_SECS", 120)?;

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            openai_api_key,
            openai_base_url,
            openai_model,
            max_tokens,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Values out of range for `T` are rejected, not truncated.
fn parse_number<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share one test so they do not race on process env.
    #[test]
    fn test_config_from_env() {
        for var in [
            "BLOGDRAFT_API_PSK",
            "BLOGDRAFT_DB_PATH",
            "BLOGDRAFT_BIND_ADDR",
            "BLOGDRAFT_LOG_LEVEL",
            "OPENAI_API_KEY",
            "BLOGDRAFT_OPENAI_BASE_URL",
            "BLOGDRAFT_OPENAI_MODEL",
            "BLOGDRAFT_MAX_TOKENS",
            "BLOGDRAFT_REQUEST_TIMEOUT_SECS",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/blogdraft.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.openai_model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.request_timeout, Duration::from_secs(120));

        env::set_var("BLOGDRAFT_MAX_TOKENS", "lots");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("BLOGDRAFT_MAX_TOKENS"));
        env::set_var("BLOGDRAFT_MAX_TOKENS", "4294967297");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("4294967297"));
        env::remove_var("BLOGDRAFT_MAX_TOKENS");

        env::set_var("BLOGDRAFT_OPENAI_BASE_URL", "http://localhost:9000/v1/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.openai_base_url, "http://localhost:9000/v1");
        env::remove_var("BLOGDRAFT_OPENAI_BASE_URL");
    }
}
