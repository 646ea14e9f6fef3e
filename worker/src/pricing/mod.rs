use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod normalize;

pub use normalize::{normalize, ReferenceMonth};

/// Final price of a single hour, in c/kWh including VAT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPrice {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// One stored row, keyed by (date, country).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub date: String,
    pub country: String,
    #[serde(rename = "pricing")]
    pub hours: Vec<HourlyPrice>,
}
