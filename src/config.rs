use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;
use std::env;

use crate::error::AppError;

lazy_static! {
    // "<n>" or "<n><unit>" with unit one of s, m, h, d
    static ref LIFETIME_REGEX: Regex = Regex::new(r"^(\d+)([smhd]?)$").unwrap();
}

const DEFAULT_ACCESS_LIFETIME: &str = "15m";
const DEFAULT_REFRESH_LIFETIME: &str = "7d";
const DEFAULT_BCRYPT_COST: u32 = 10;

/// Process-wide configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub environment: String,
    pub auth: AuthConfig,
}

/// Token signing and password hashing settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_lifetime: Duration,
    pub refresh_lifetime: Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| config_error("SERVER_PORT must be a number"))?,
            None => 3000,
        };

        let access_secret = required(&lookup, "JWT_SECRET")?;
        let refresh_secret = required(&lookup, "JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(config_error(
                "JWT_SECRET and JWT_REFRESH_SECRET must be different",
            ));
        }

        let access_lifetime = parse_lifetime(
            &lookup("JWT_EXPIRES_IN").unwrap_or_else(|| DEFAULT_ACCESS_LIFETIME.to_string()),
        )
        .ok_or_else(|| config_error("JWT_EXPIRES_IN must look like 900, 15m, 1h or 7d"))?;
        let refresh_lifetime = parse_lifetime(
            &lookup("JWT_REFRESH_EXPIRES_IN")
                .unwrap_or_else(|| DEFAULT_REFRESH_LIFETIME.to_string()),
        )
        .ok_or_else(|| config_error("JWT_REFRESH_EXPIRES_IN must look like 900, 15m, 1h or 7d"))?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(cost) => cost
                .parse::<u32>()
                .ok()
                .filter(|c| (4..=31).contains(c))
                .ok_or_else(|| config_error("BCRYPT_COST must be a number between 4 and 31"))?,
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            environment: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            auth: AuthConfig {
                access_secret,
                refresh_secret,
                access_lifetime,
                refresh_lifetime,
                bcrypt_cost,
            },
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

/// Longest accepted token lifetime: ten years.
const MAX_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Parses a token lifetime such as `900`, `30s`, `15m`, `12h` or `7d`.
/// Zero-length lifetimes and lifetimes above ten years are rejected.
pub fn parse_lifetime(value: &str) -> Option<Duration> {
    let caps = LIFETIME_REGEX.captures(value.trim())?;
    let amount: i64 = caps[1].parse().ok()?;
    if amount == 0 {
        return None;
    }
    let seconds = match &caps[2] {
        "" | "s" => amount,
        "m" => amount.checked_mul(60)?,
        "h" => amount.checked_mul(60 * 60)?,
        "d" => amount.checked_mul(60 * 60 * 24)?,
        _ => return None,
    };
    if seconds > MAX_LIFETIME_SECONDS {
        return None;
    }
    Duration::try_seconds(seconds)
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| config_error(&format!("{} must be set", key)))
}

fn config_error(msg: &str) -> AppError {
    AppError::InternalServerError(format!("Invalid configuration: {}", msg))
}
