use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ServerConfig, TlsConfig};

/// Read an environment variable, treating empty values as unset.
pub(super) fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                value: raw,
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

pub(super) fn tls_from_parts(
    cert_path: Option<String>,
    key_path: Option<String>,
) -> Result<Option<TlsConfig>, ConfigError> {
    match (cert_path, key_path) {
        (Some(cert), Some(key)) => Ok(Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        })),
        (None, None) => Ok(None),
        _ => Err(ConfigError::Validation(
            "TLS_CERT_PATH and TLS_KEY_PATH must be set together".to_string(),
        )),
    }
}

/// Build a configuration from environment variables over the defaults.
pub(super) fn load_from_env() -> Result<ServerConfig, ConfigError> {
    let defaults = ServerConfig::default();

    Ok(ServerConfig {
        host: env_var("HOST").unwrap_or(defaults.host),
        port: parse_env("PORT", defaults.port)?,
        tls: tls_from_parts(env_var("TLS_CERT_PATH"), env_var("TLS_KEY_PATH"))?,
        credentials_dir: env_var("CREDENTIALS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.credentials_dir),
        google_tts_base_url: env_var("GOOGLE_TTS_BASE_URL")
            .unwrap_or(defaults.google_tts_base_url),
        max_text_length: parse_env("MAX_TEXT_LENGTH", defaults.max_text_length)?,
        rate_limit_requests: parse_env("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
        rate_limit_window_seconds: parse_env(
            "RATE_LIMIT_WINDOW",
            defaults.rate_limit_window_seconds,
        )?,
        cache_ttl_seconds: parse_env("CACHE_TTL", defaults.cache_ttl_seconds)?,
        voice_cache_capacity: parse_env("VOICE_CACHE_CAPACITY", defaults.voice_cache_capacity)?,
        session_idle_timeout_seconds: parse_env(
            "SESSION_IDLE_TIMEOUT",
            defaults.session_idle_timeout_seconds,
        )?,
        session_capacity: parse_env("SESSION_CAPACITY", defaults.session_capacity)?,
        cors_allowed_origins: env_var("CORS_ALLOWED_ORIGINS"),
        rate_limit_requests_per_second: parse_env(
            "IP_RATE_LIMIT_PER_SECOND",
            defaults.rate_limit_requests_per_second,
        )?,
        rate_limit_burst_size: parse_env("IP_RATE_LIMIT_BURST", defaults.rate_limit_burst_size)?,
    })
}
