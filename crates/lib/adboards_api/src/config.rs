//! API server configuration.

use std::path::PathBuf;

use adboards_core::auth::jwt::{TokenConfig, resolve_jwt_secret};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Identity-token signing configuration.
    pub token: TokenConfig,
    /// Directory for stored photos.
    pub photo_dir: PathBuf,
    /// Base URL used in password-reset links.
    pub public_base_url: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable          | Default                                  |
    /// |-------------------|------------------------------------------|
    /// | `BIND_ADDR`       | `127.0.0.1:8080`                         |
    /// | `DATABASE_URL`    | `postgres://localhost:5432/adboards`     |
    /// | `JWT_SECRET`      | generated & persisted to file            |
    /// | `JWT_ISSUER`      | `adboards`                               |
    /// | `JWT_AUDIENCE`    | `adboards-clients`                       |
    /// | `PHOTO_DIR`       | `photos`                                 |
    /// | `PUBLIC_BASE_URL` | `http://localhost:8080`                  |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/adboards".into()),
            token: TokenConfig {
                secret: resolve_jwt_secret(),
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "adboards".into()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "adboards-clients".into()),
            },
            photo_dir: std::env::var("PHOTO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("photos")),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
        }
    }
}
