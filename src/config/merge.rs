use std::path::PathBuf;

use super::env::{load_from_env, tls_from_parts};
use super::yaml::YamlConfig;
use super::{ConfigError, ServerConfig};

/// Environment configuration with YAML values applied on top.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, ConfigError> {
    let mut config = load_from_env()?;
    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(tls) = server.tls {
            config.tls = match tls.enabled {
                Some(false) => None,
                _ => {
                    let current = config.tls.take();
                    let cert = tls.cert_path.or_else(|| {
                        current
                            .as_ref()
                            .map(|t| t.cert_path.to_string_lossy().into_owned())
                    });
                    let key = tls.key_path.or_else(|| {
                        current
                            .as_ref()
                            .map(|t| t.key_path.to_string_lossy().into_owned())
                    });
                    tls_from_parts(cert, key)?
                }
            };
        }
    }

    if let Some(dir) = yaml.storage.and_then(|s| s.credentials_dir) {
        config.credentials_dir = PathBuf::from(dir);
    }

    if let Some(base_url) = yaml.google.and_then(|g| g.base_url) {
        config.google_tts_base_url = base_url;
    }

    if let Some(limits) = yaml.limits {
        if let Some(v) = limits.max_text_length {
            config.max_text_length = v;
        }
        if let Some(v) = limits.rate_limit_requests {
            config.rate_limit_requests = v;
        }
        if let Some(v) = limits.rate_limit_window_seconds {
            config.rate_limit_window_seconds = v;
        }
    }

    if let Some(cache) = yaml.cache {
        if let Some(v) = cache.ttl_seconds {
            config.cache_ttl_seconds = v;
        }
        if let Some(v) = cache.voice_capacity {
            config.voice_cache_capacity = v;
        }
    }

    if let Some(session) = yaml.session {
        if let Some(v) = session.idle_timeout_seconds {
            config.session_idle_timeout_seconds = v;
        }
        if let Some(v) = session.capacity {
            config.session_capacity = v;
        }
    }

    if let Some(security) = yaml.security {
        if security.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = security.cors_allowed_origins;
        }
        if let Some(v) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = v;
        }
        if let Some(v) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = v;
        }
    }

    Ok(config)
}
