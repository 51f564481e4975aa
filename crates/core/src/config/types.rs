use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub bookmarks: BookmarksConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// Header carrying the caller's email (required for `trusted_header`).
    #[serde(default)]
    pub header: Option<String>,
    /// Lifetime of login sessions in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,
}

fn default_session_ttl_hours() -> u32 {
    24 * 7
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Opaque session tokens issued by `POST /auth/login`.
    Session,
    /// Email supplied by a fronting proxy in a configured header.
    TrustedHeader,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("reelmark.db")
}

/// Video catalog configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON file replacing the embedded catalog. None = use the embedded one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Bookmark endpoint tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookmarksConfig {
    /// Row cap for `GET /bookmarks?type=selected`.
    #[serde(default = "default_selected_limit")]
    pub selected_limit: u32,
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            selected_limit: default_selected_limit(),
        }
    }
}

fn default_selected_limit() -> u32 {
    5
}

/// Settings for the bookmark HTTP client used by the sync controller
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline applied to every outbound request.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api/v1".to_string()
}

fn default_timeout() -> u32 {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub bookmarks: BookmarksConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
    pub session_ttl_hours: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::Session => "session".to_string(),
                    AuthMethod::TrustedHeader => "trusted_header".to_string(),
                },
                session_ttl_hours: config.auth.session_ttl_hours,
            },
            server: config.server.clone(),
            database: config.database.clone(),
            catalog: config.catalog.clone(),
            bookmarks: config.bookmarks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_auth() -> AuthConfig {
        AuthConfig {
            method: AuthMethod::Session,
            header: None,
            session_ttl_hours: 24,
        }
    }

    #[test]
    fn test_deserialize_valid_config_with_session_auth() {
        let toml = r#"
[auth]
method = "session"

[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auth.method, AuthMethod::Session);
        assert_eq!(config.auth.session_ttl_hours, 168);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[auth]
method = "session"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.database.path.to_str().unwrap(), "reelmark.db");
        assert!(config.catalog.path.is_none());
        assert_eq!(config.bookmarks.selected_limit, 5);
        assert_eq!(config.client.timeout_secs, 10);
    }

    #[test]
    fn test_deserialize_trusted_header() {
        let toml = r#"
[auth]
method = "trusted_header"
header = "X-Forwarded-Email"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auth.method, AuthMethod::TrustedHeader);
        assert_eq!(config.auth.header.as_deref(), Some("X-Forwarded-Email"));
    }

    #[test]
    fn test_deserialize_missing_auth_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_unknown_auth_method_fails() {
        let toml = r#"
[auth]
method = "oidc"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config() {
        let config = Config {
            auth: session_auth(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            catalog: CatalogConfig::default(),
            bookmarks: BookmarksConfig { selected_limit: 3 },
            client: ClientConfig::default(),
        };
        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.auth.method, "session");
        assert_eq!(sanitized.auth.session_ttl_hours, 24);
        assert_eq!(sanitized.server.port, 8080);
        assert_eq!(sanitized.bookmarks.selected_limit, 3);
    }
}
