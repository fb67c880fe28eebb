use crate::utils::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_GITHUB_USERS_API: &str = "https://api.github.com/users";

/// Process-wide settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub github_users_api: String,
    pub page_delay: Duration,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_number(&lookup, "PORT", 3000u16)?;
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("DATABASE_URL must be set".to_string()))?;
        let github_users_api =
            lookup("GITHUB_USERS_API").unwrap_or_else(|| DEFAULT_GITHUB_USERS_API.to_string());
        let page_delay = Duration::from_millis(parse_number(&lookup, "GITHUB_PAGE_DELAY_MS", 1000u64)?);
        let request_timeout =
            Duration::from_secs(parse_number(&lookup, "GITHUB_REQUEST_TIMEOUT_SECS", 10u64)?);
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            database_url,
            github_users_api,
            page_delay,
            request_timeout,
            cors_allowed_origins,
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Configuration(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}
