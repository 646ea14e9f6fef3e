use chrono_tz::Tz;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use super::config::ConfigError;

pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub struct MockTimeProvider {
    mock_time: DateTime<Utc>,
}

#[cfg(test)]
impl MockTimeProvider {
    pub fn new(mock_time: DateTime<Utc>) -> Self {
        MockTimeProvider { mock_time }
    }
}

#[cfg(test)]
impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.mock_time
    }
}

pub fn default_timezone_name() -> String {
    dotenv::var("CHRONO_TIMEZONE").unwrap_or("Europe/Helsinki".to_string())
}

pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::Timezone(name.to_string()))
}

/// Row key of the stored pricing, e.g. `2024-June-5`.
pub fn storage_date_label<T: TimeZone>(now: &DateTime<T>) -> String
where
    T::Offset: Display,
{
    now.format("%Y-%B-%-d").to_string()
}
