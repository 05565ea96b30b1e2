use crate::heatmap::{clamp_days, DEFAULT_DAYS};
use std::{env, str::FromStr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOGIN_URL: &str = "/login";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub login_url: String,
    pub heatmap_days: i64,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("BACKEND_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let login_url = lookup("LOGIN_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let heatmap_days = clamp_days(parse_or(&lookup, "HEATMAP_DAYS", DEFAULT_DAYS));
        let timeout_secs = parse_or(&lookup, "BACKEND_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS).max(1);

        Self {
            port,
            backend_url,
            login_url,
            heatmap_days,
            backend_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring invalid {key}={raw:?}");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.login_url, "/login");
        assert_eq!(config.heatmap_days, 365);
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PORT", "9001"),
            ("BACKEND_URL", "http://tasks.internal:8000/"),
            ("HEATMAP_DAYS", "90"),
            ("BACKEND_TIMEOUT_SECS", "3"),
            ("LOGIN_URL", "https://sso.example.com/login"),
        ]);
        assert_eq!(config.port, 9001);
        assert_eq!(config.backend_url, "http://tasks.internal:8000");
        assert_eq!(config.login_url, "https://sso.example.com/login");
        assert_eq!(config.heatmap_days, 90);
        assert_eq!(config.backend_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[("PORT", "eighty"), ("HEATMAP_DAYS", "0"), ("BACKEND_TIMEOUT_SECS", "0")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.heatmap_days, 1);
        assert_eq!(config.backend_timeout, Duration::from_secs(1));
    }
}
