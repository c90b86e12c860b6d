//! Environment-backed configuration.
//!
//! Every credential is optional. A missing value disables the feature that
//! needs it instead of failing startup.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FALLBACK_CITY: &str = "桃園";
/// Daily at 08:00, evaluated in [`PUSH_UTC_OFFSET_SECS`].
pub const DEFAULT_PUSH_CRON: &str = "0 0 8 * * *";
/// Asia/Taipei. No DST, so a fixed offset is exact.
pub const PUSH_UTC_OFFSET_SECS: i32 = 8 * 3600;

pub const DEFAULT_LINE_API_URL: &str = "https://api.line.me";
pub const DEFAULT_CWA_API_URL: &str = "https://opendata.cwa.gov.tw";
pub const DEFAULT_DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub logs_path: PathBuf,
    pub fallback_city: String,
    pub push_cron: String,
    pub line_channel_access_token: Option<String>,
    pub line_api_url: String,
    pub db_url: Option<String>,
    pub cwa_api_key: Option<String>,
    pub cwa_api_url: String,
    pub deepseek_api_key: Option<String>,
    pub deepseek_api_url: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            logs_path: PathBuf::from(std::env::var("LOGS_PATH").unwrap_or("logs".to_string())),
            fallback_city: std::env::var("FALLBACK_CITY")
                .unwrap_or(DEFAULT_FALLBACK_CITY.to_string()),
            push_cron: std::env::var("PUSH_CRON").unwrap_or(DEFAULT_PUSH_CRON.to_string()),
            line_channel_access_token: Self::optional("LINE_CHANNEL_ACCESS_TOKEN"),
            line_api_url: std::env::var("LINE_API_URL")
                .unwrap_or(DEFAULT_LINE_API_URL.to_string()),
            db_url: Self::optional("DB_URL"),
            cwa_api_key: Self::optional("CWA_API_KEY"),
            cwa_api_url: std::env::var("CWA_API_URL").unwrap_or(DEFAULT_CWA_API_URL.to_string()),
            deepseek_api_key: Self::optional("DEEPSEEK_API_KEY"),
            deepseek_api_url: std::env::var("DEEPSEEK_API_URL")
                .unwrap_or(DEFAULT_DEEPSEEK_API_URL.to_string()),
        }
    }

    /// Reads a variable, treating an empty value the same as an unset one.
    fn optional(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SAFETY: env mutation is confined to `#[serial]` tests.
    fn clear_env() {
        for key in [
            "PORT",
            "LOGS_PATH",
            "FALLBACK_CITY",
            "PUSH_CRON",
            "LINE_CHANNEL_ACCESS_TOKEN",
            "LINE_API_URL",
            "DB_URL",
            "CWA_API_KEY",
            "CWA_API_URL",
            "DEEPSEEK_API_KEY",
            "DEEPSEEK_API_URL",
        ] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = Config::new();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.fallback_city, "桃園");
        assert_eq!(config.push_cron, DEFAULT_PUSH_CRON);
        assert_eq!(config.cwa_api_url, DEFAULT_CWA_API_URL);
        assert!(config.line_channel_access_token.is_none());
        assert!(config.db_url.is_none());
        assert!(config.cwa_api_key.is_none());
        assert!(config.deepseek_api_key.is_none());
    }

    #[test]
    #[serial_test::serial]
    fn test_reads_env_and_ignores_blank_credentials() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "8080");
            std::env::set_var("CWA_API_KEY", "CWA-123");
            std::env::set_var("DEEPSEEK_API_KEY", "   ");
        }
        let config = Config::new();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cwa_api_key.as_deref(), Some("CWA-123"));
        assert!(config.deepseek_api_key.is_none());
        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_invalid_port_falls_back_to_default() {
        clear_env();
        unsafe { std::env::set_var("PORT", "not-a-port") };
        assert_eq!(Config::new().port, DEFAULT_PORT);
        clear_env();
    }
}
