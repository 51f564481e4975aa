use super::{types::Config, AuthMethod, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Auth section exists (enforced by serde)
/// - Server port is not 0
/// - trusted_header auth names a header
/// - Session TTL, selected limit and client timeout are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::TrustedHeader
        && config
            .auth
            .header
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .is_empty()
    {
        return Err(ConfigError::ValidationError(
            "auth.header must be set when using trusted_header auth".to_string(),
        ));
    }

    if config.auth.session_ttl_hours == 0 {
        return Err(ConfigError::ValidationError(
            "auth.session_ttl_hours cannot be 0".to_string(),
        ));
    }

    if config.bookmarks.selected_limit == 0 {
        return Err(ConfigError::ValidationError(
            "bookmarks.selected_limit cannot be 0".to_string(),
        ));
    }

    if config.client.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "client.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
