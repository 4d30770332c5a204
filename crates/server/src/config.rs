use models::course_query::DEFAULT_MIN_RATERS;
use std::{fmt::Display, net::SocketAddr, str::FromStr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://classrater.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub run_migrations: bool,
    /// Threshold of the `rater_num` course filter
    pub min_raters: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            run_migrations: true,
            min_raters: DEFAULT_MIN_RATERS,
        }
    }
}

/// Parses `raw`, falling back to `default` with a warning when it doesn't parse
fn parse_or<T, E>(key: &str, raw: Option<String>, default: T, parse: impl Fn(&str) -> Result<T, E>) -> T
where
    T: Display,
    E: Display,
{
    match raw {
        None => default,
        Some(raw) => match parse(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring {key}={raw:?} ({e}), using {default}");
                default
            }
        },
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

fn parse_min_raters(raw: &str) -> Result<i32, String> {
    match i32::from_str(raw) {
        Ok(n) if n >= 0 => Ok(n),
        Ok(_) => Err("must not be negative".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.database_url),
            bind_addr: parse_or(
                "BIND_ADDR",
                lookup("BIND_ADDR"),
                defaults.bind_addr,
                SocketAddr::from_str,
            ),
            run_migrations: parse_or(
                "RUN_MIGRATIONS",
                lookup("RUN_MIGRATIONS"),
                defaults.run_migrations,
                parse_flag,
            ),
            min_raters: parse_or(
                "MIN_RATERS",
                lookup("MIN_RATERS"),
                defaults.min_raters,
                parse_min_raters,
            ),
        }
    }
}
