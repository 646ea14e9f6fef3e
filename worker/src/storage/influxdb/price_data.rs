use chrono::{DateTime, Utc};
use influxdb::InfluxDbWriteable;
use serde::{Deserialize, Serialize};

use crate::pricing::{HourlyPrice, PricingRecord};

#[derive(Debug, InfluxDbWriteable, Serialize, Deserialize)]
pub struct MonthlyPriceData {
    pub time: DateTime<Utc>,
    #[influxdb(tag)]
    pub date_tag: String,
    #[influxdb(tag)]
    pub country_tag: String,
    pub date: String,
    pub country: String,
    pub timestamp: String,
    pub price: f64,
}

impl MonthlyPriceData {
    pub fn new(record: &PricingRecord, hour: &HourlyPrice) -> Self {
        Self {
            time: hour.timestamp,
            date_tag: record.date.clone(),
            country_tag: record.country.clone(),
            date: record.date.clone(),
            country: record.country.clone(),
            timestamp: hour.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            price: hour.price,
        }
    }
}
