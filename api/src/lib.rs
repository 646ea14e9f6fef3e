#[macro_use]
extern crate log;

pub mod decode;
pub mod error;
pub mod models;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use http::{header::USER_AGENT, StatusCode};

pub use decode::decode_document;
pub use error::{DecodeError, FetchError};
pub use models::*;

pub const API_URL: &str = r#"https://web-api.tp.entsoe.eu/api"#;
pub const DAY_AHEAD_PRICES_DOCUMENT: &str = "A44";

const WORKER_USER_AGENT: &str = concat!("pricing-worker/", env!("CARGO_PKG_VERSION"));
const QUERY_TIME_FORMAT: &str = "%Y%m%d%H%M";
// The exchange reports a trading day from 22:00 UTC of the previous day.
const DAY_BOUNDARY_HOURS: i64 = 22;

/// `periodStart`/`periodEnd` of a day-ahead query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl FetchWindow {
    /// From the day boundary on the last day of the previous month up to the boundary of `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        let last_of_previous_month = today - Duration::days(i64::from(today.day()));

        Self {
            start: day_boundary(last_of_previous_month),
            end: day_boundary(today),
        }
    }

    pub fn period_start(&self) -> String {
        self.start.format(QUERY_TIME_FORMAT).to_string()
    }

    pub fn period_end(&self) -> String {
        self.end.format(QUERY_TIME_FORMAT).to_string()
    }
}

fn day_boundary(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(DAY_BOUNDARY_HOURS)
}

#[derive(Debug, Clone)]
pub struct EntsoeClient {
    client: reqwest::Client,
    base_url: String,
    security_token: Option<String>,
}

impl EntsoeClient {
    pub fn new(base_url: impl Into<String>, security_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            security_token,
        }
    }

    /// Reads `SECURITY_TOKEN` and the optional `ENTSOE_API_URL` override.
    /// A missing token only fails once a fetch is attempted.
    pub fn from_env() -> Self {
        let base_url = dotenv::var("ENTSOE_API_URL").unwrap_or(API_URL.to_string());
        let security_token = dotenv::var("SECURITY_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        Self::new(base_url, security_token)
    }

    pub async fn get_day_ahead_prices(
        &self,
        area: &str,
        window: &FetchWindow,
    ) -> Result<Vec<u8>, FetchError> {
        let security_token = self
            .security_token
            .as_deref()
            .ok_or(FetchError::MissingToken)?;

        let period_start = window.period_start();
        let period_end = window.period_end();

        info!(
            "Fetching day-ahead prices for {} between {} - {}",
            area, period_start, period_end
        );

        let res = self
            .client
            .get(&self.base_url)
            .header(USER_AGENT, WORKER_USER_AGENT)
            .query(&[
                ("documentType", DAY_AHEAD_PRICES_DOCUMENT),
                ("in_Domain", area),
                ("out_Domain", area),
                ("periodStart", period_start.as_str()),
                ("periodEnd", period_end.as_str()),
                ("securityToken", security_token),
            ])
            .send()
            .await?;

        let status = res.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }

        let body = res.bytes().await?;

        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        debug!("Received {} bytes for {}", body.len(), area);

        Ok(body.to_vec())
    }
}
