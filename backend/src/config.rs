//! Environment-driven configuration.
//!
//! Every knob has a development default so a bare `cargo run` works; the JWT
//! secret is the one value that must be overridden outside of dev.

use anyhow::{bail, Result};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite:taskpoint.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 30;
const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 10;

const DEV_JWT_SECRET: &str = "dev-mode-secret-not-for-production-use-123456";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub static_dir: String,
    /// HMAC secret for bearer tokens, at least 32 bytes
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    /// Expected `aud` claim on federated identity assertions
    pub federated_audience: String,
    /// Verification key for federated identity assertions
    pub federated_secret: String,
    pub push_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment, falling back to dev defaults.
    pub fn from_env() -> Result<Self> {
        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters");
        }

        Ok(Self {
            database_url: env::var("TASKPOINT_DB")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("TASKPOINT_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            static_dir: env::var("TASKPOINT_STATIC_DIR")
                .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
            token_ttl_secs: parse_env_u64("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
            federated_audience: env::var("FEDERATED_AUDIENCE").unwrap_or_default(),
            federated_secret: env::var("FEDERATED_SECRET")
                .unwrap_or_else(|_| jwt_secret.clone()),
            push_timeout_secs: parse_env_u64("PUSH_TIMEOUT_SECS", DEFAULT_PUSH_TIMEOUT_SECS)?,
            jwt_secret,
        })
    }
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(v) => Ok(v),
            Err(_) => bail!("{} must be an integer, got {:?}", name, raw),
        },
        Err(_) => Ok(default),
    }
}
