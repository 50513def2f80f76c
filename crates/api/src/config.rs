use std::time::Duration as StdDuration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use chrono::Duration;
use tower_http::cors::CorsLayer;
use todo_core::auth::jwt::JwtConfig;
use todo_core::usecases::user::DEFAULT_SESSION_TTL_HOURS;
use todo_core::usecases::AccountPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// Session token signing configuration.
    pub jwt: JwtConfig,
    /// Lifetime of a login session in hours (default: `24`).
    pub session_ttl_hours: i64,
    /// Lowercase emails before storage and lookup (default: `true`).
    pub case_insensitive_emails: bool,
    /// Mark the session cookie `Secure` (default: `true`).
    pub secure_cookies: bool,
    /// Postgres connection string. Unset means the in-memory backend.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `8080`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `10`                    |
    /// | `JWT_SECRET`              | required                |
    /// | `SESSION_TTL_HOURS`       | `24`                    |
    /// | `CASE_INSENSITIVE_EMAILS` | `true`                  |
    /// | `SECURE_COOKIES`          | `true`                  |
    /// | `DATABASE_URL`            | unset                   |
    ///
    /// Panics on malformed values; startup should fail fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        )
        .unwrap_or_else(|e| panic!("{e}"));

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let session_ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");
        assert!(session_ttl_hours > 0, "SESSION_TTL_HOURS must be positive");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig { secret },
            session_ttl_hours,
            case_insensitive_emails: env_flag("CASE_INSENSITIVE_EMAILS", true),
            secure_cookies: env_flag("SECURE_COOKIES", true),
            database_url,
        }
    }

    /// The account rules handed to the user use cases.
    pub fn account_policy(&self) -> AccountPolicy {
        AccountPolicy {
            normalize_email: self.case_insensitive_emails,
            session_ttl: Duration::hours(self.session_ttl_hours),
        }
    }

    pub fn request_timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.request_timeout_secs)
    }

    /// Cross-origin policy for the browser client. Credentials are allowed so
    /// the session cookie travels with requests.
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.cors_origins.clone())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
            .max_age(StdDuration::from_secs(3600))
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| format!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect()
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw).unwrap_or_else(|| panic!("{name} must be true or false")),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test").unwrap(),
            vec![
                HeaderValue::from_static("http://a.test"),
                HeaderValue::from_static("http://b.test"),
            ]
        );
    }

    #[test]
    fn control_characters_are_not_origins() {
        let err = parse_origins("http://a.test,http://b\n.test").unwrap_err();
        assert!(err.contains("http://b\n.test"));
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
