//! Runtime configuration read from the environment at startup.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SHORT_LINK_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;
const SESSION_TTL_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Prefix for links returned by `get-link`, without the `/s/<code>` part
    pub short_link_base_url: String,
    pub session_ttl_days: i64,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid default for {0}")]
    BadDefault(&'static str),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let default_bind: SocketAddr = DEFAULT_BIND_ADDR
            .parse()
            .map_err(|_| ConfigError::BadDefault("BIND_ADDR"))?;

        Ok(Self {
            database_url,
            bind_addr: load_or("BIND_ADDR", default_bind),
            short_link_base_url: load_or(
                "SHORT_LINK_BASE_URL",
                DEFAULT_SHORT_LINK_BASE_URL.to_string(),
            ),
            session_ttl_days: within(
                "SESSION_TTL_DAYS",
                load_or("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS),
                SESSION_TTL_DAYS_RANGE,
                DEFAULT_SESSION_TTL_DAYS,
            ),
        })
    }
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

fn within<T>(key: &str, value: T, range: RangeInclusive<T>, default: T) -> T
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        value
    } else {
        warn!(
            "{key} value {value} outside {}..={}, using default: {default}",
            range.start(),
            range.end()
        );
        default
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
                default
            }
        },
        None => {
            debug!("{key} not set, using default: {default}");
            default
        }
    }
}
