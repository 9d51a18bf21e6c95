use std::time::Duration;

/// Default upstream weather-by-city service.
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://goweather.herokuapp.com";
/// Default bound on every upstream call, in seconds.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the upstream weather service.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL; city lookups go to `<base_url>/weather/<city>`.
    pub base_url: String,
    pub timeout: Duration,
}

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub upstream: UpstreamConfig,
    /// City served by `/weather` when no `city` parameter is given.
    pub default_city: String,
    /// Emit JSON log lines instead of human-readable text.
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            upstream: UpstreamConfig {
                base_url: std::env::var("UPSTREAM_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string()),
                timeout: Duration::from_secs(
                    std::env::var("UPSTREAM_TIMEOUT_SECS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
                ),
            },
            default_city: std::env::var("DEFAULT_CITY")
                .ok()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Manila".to_string()),
            log_json: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // set_var/remove_var race with other tests reading the environment;
        // only this test touches these variables.
        unsafe {
            std::env::remove_var("PORT");
            std::env::remove_var("UPSTREAM_BASE_URL");
            std::env::remove_var("UPSTREAM_TIMEOUT_SECS");
            std::env::remove_var("DEFAULT_CITY");
            std::env::remove_var("LOG_FORMAT");
        }

        let config = AppConfig::from_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.base_url, "https://goweather.herokuapp.com");
        assert_eq!(config.upstream.timeout, Duration::from_secs(10));
        assert_eq!(config.default_city, "Manila");
        assert!(!config.log_json);
    }
}
