use super::{ConfigError, ServerConfig};

/// Reject configurations the server cannot run with.
pub(super) fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.credentials_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "CREDENTIALS_DIR must not be empty".to_string(),
        ));
    }

    let positive = [
        ("MAX_TEXT_LENGTH", config.max_text_length as u64),
        ("RATE_LIMIT_REQUESTS", u64::from(config.rate_limit_requests)),
        ("RATE_LIMIT_WINDOW", config.rate_limit_window_seconds),
        ("VOICE_CACHE_CAPACITY", config.voice_cache_capacity),
        ("SESSION_IDLE_TIMEOUT", config.session_idle_timeout_seconds),
        ("SESSION_CAPACITY", config.session_capacity),
        (
            "IP_RATE_LIMIT_PER_SECOND",
            u64::from(config.rate_limit_requests_per_second),
        ),
        ("IP_RATE_LIMIT_BURST", u64::from(config.rate_limit_burst_size)),
    ];
    if let Some((key, _)) = positive.iter().find(|(_, value)| *value == 0) {
        return Err(ConfigError::Validation(format!(
            "{key} must be greater than zero"
        )));
    }

    if !config.google_tts_base_url.starts_with("http://")
        && !config.google_tts_base_url.starts_with("https://")
    {
        return Err(ConfigError::Validation(format!(
            "GOOGLE_TTS_BASE_URL must be an http(s) URL, got {:?}",
            config.google_tts_base_url
        )));
    }

    Ok(())
}
