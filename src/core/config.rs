use std::env;

use crate::countdown::{
    CountdownCalculator, DEFAULT_TIMEZONE, default_time_of_day, parse_time_of_day,
    parse_timezone,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub default_timezone: String,
    pub default_wedding_time: String,
    pub countdown_refresh_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("WEDSITE_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = env::var("WEDSITE_DB_PATH")
            .unwrap_or_else(|_| format!("{}/wedding.db", storage_path.trim_end_matches('/')));
        let default_timezone =
            env::var("WEDSITE_DEFAULT_TIMEZONE").unwrap_or_else(|_| "Asia/Tashkent".to_string());
        let default_wedding_time =
            env::var("WEDSITE_DEFAULT_WEDDING_TIME").unwrap_or_else(|_| "4:00 PM".to_string());
        let countdown_refresh_ms = env::var("WEDSITE_COUNTDOWN_REFRESH_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1000);

        Self {
            storage_path,
            db_path,
            default_timezone,
            default_wedding_time,
            countdown_refresh_ms,
        }
    }
}

impl AppConfig {
    /// Build the countdown calculator from the configured fallbacks.
    /// Values that don't parse fall back to 16:00 in Asia/Tashkent.
    pub fn calculator(&self) -> CountdownCalculator {
        let fallback_time = parse_time_of_day(&self.default_wedding_time).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid default wedding time {:?}, using 16:00",
                self.default_wedding_time
            );
            default_time_of_day()
        });
        let fallback_zone = parse_timezone(&self.default_timezone).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid default timezone {:?}, using {}",
                self.default_timezone,
                DEFAULT_TIMEZONE
            );
            DEFAULT_TIMEZONE
        });
        CountdownCalculator::new(fallback_time, fallback_zone)
    }
}
