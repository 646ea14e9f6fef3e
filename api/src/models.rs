use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `Publication_MarketDocument` as returned for the A44 (day-ahead prices) document type.
/// Only the elements the pricing pipeline reads are mapped.
#[derive(Debug, Deserialize)]
pub struct MarketDocument {
    #[serde(rename = "TimeSeries", default)]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "Period", default)]
    pub period: Vec<MarketPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct MarketPeriod {
    #[serde(rename = "timeInterval")]
    pub time_interval: TimeInterval,
    #[serde(rename = "Point", default)]
    pub point: Vec<MarketPoint>,
}

#[derive(Debug, Deserialize)]
pub struct TimeInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub struct MarketPoint {
    pub position: u32,
    #[serde(rename = "price.amount")]
    pub price: f64,
}

/// Returned by the platform instead of a price document, e.g. when no data matches the query.
#[derive(Debug, Deserialize)]
pub struct AcknowledgementDocument {
    #[serde(rename = "Reason", default)]
    pub reason: Vec<Reason>,
}

#[derive(Debug, Deserialize)]
pub struct Reason {
    pub code: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub position: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub points: Vec<RawPoint>,
}

/// Decoded day-ahead document. Periods of every time series, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub periods: Vec<Period>,
}
