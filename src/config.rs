use crate::error::StartupError;
use chrono_tz::Tz;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub timezone: Tz,
    pub log_dir: String,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let timezone = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let secure_cookies = env::var("SECURE_COOKIES").unwrap_or_else(|_| "true".to_string());

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://resource_booking.db".to_string()),
            port: port.parse()
                .map_err(|_| StartupError::Config(format!("PORT must be a number, got '{}'", port)))?,
            timezone: timezone.parse()
                .map_err(|_| StartupError::Config(format!("APP_TIMEZONE '{}' is not a known time zone", timezone)))?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
            secure_cookies: secure_cookies.parse()
                .map_err(|_| StartupError::Config(format!("SECURE_COOKIES must be true or false, got '{}'", secure_cookies)))?,
        })
    }
}
