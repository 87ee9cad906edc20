//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// JWT signing secret. Required: token issuance must only be able to
    /// fail here at startup, never per-request.
    pub jwt_secret: String,

    /// Issued-token lifetime in seconds
    pub token_lifetime_secs: i64,

    /// Plaintext shared login password, hashed once at startup
    pub login_password: Option<String>,

    /// Pre-hashed (bcrypt) shared login password; takes precedence over
    /// the plaintext variant
    pub login_password_hash: Option<String>,

    /// Whether adding a book may create its author on the fly
    pub auto_create_authors: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is required")?;

        let login_password = env::var("LOGIN_PASSWORD").ok();
        let login_password_hash = env::var("LOGIN_PASSWORD_HASH").ok();
        if login_password.is_none() && login_password_hash.is_none() {
            anyhow::bail!("LOGIN_PASSWORD or LOGIN_PASSWORD_HASH is required");
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            jwt_secret,

            token_lifetime_secs: env::var("TOKEN_LIFETIME_SECS")
                .unwrap_or_else(|_| (30 * 24 * 60 * 60).to_string())
                .parse()
                .context("Invalid TOKEN_LIFETIME_SECS")?,

            login_password,
            login_password_hash,

            auto_create_authors: env::var("AUTO_CREATE_AUTHORS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        })
    }
}
