use vitrine_core::admin::AdminIdentifiers;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Administrator identifiers for the admin gate.
    pub admin: AdminIdentifiers,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_USER_ID`        | unset                      |
    /// | `ADMIN_EMAIL`          | unset                      |
    ///
    /// `ADMIN_USER_ID` and `ADMIN_EMAIL` may each be absent; an absent value
    /// narrows the admin check to the other identifier. With both absent no
    /// identity passes the admin gate.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let admin = admin_identifiers_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            admin,
        }
    }
}

/// Read `ADMIN_USER_ID` / `ADMIN_EMAIL` into [`AdminIdentifiers`].
///
/// # Panics
///
/// Panics if `ADMIN_USER_ID` is set but not a valid id -- a half-configured
/// admin account should fail fast at startup, not silently never match.
fn admin_identifiers_from_env() -> AdminIdentifiers {
    let user_id = std::env::var("ADMIN_USER_ID").ok().map(|v| {
        v.parse()
            .expect("ADMIN_USER_ID must be a valid integer user id")
    });
    let email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
    AdminIdentifiers { user_id, email }
}
