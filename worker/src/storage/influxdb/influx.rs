use async_trait::async_trait;
use influxdb::{Client, InfluxDbWriteable, ReadQuery, WriteQuery};

use super::price_data::MonthlyPriceData;
use crate::pricing::PricingRecord;
use crate::storage::{PricingStore, StoreError};

pub fn is_enabled() -> bool {
    dotenv::var("INFLUXDB_ENABLED")
        .map(|var| var.parse::<bool>())
        .unwrap_or(Ok(false))
        .unwrap_or(false)
}

/// One point per hour, tagged with the record's date and country. A rewrite deletes
/// the earlier series of the same key first. Hours sharing a timestamp collapse into
/// the last written point.
pub struct InfluxStore {
    client: Client,
    measurement: String,
}

impl InfluxStore {
    pub fn new(client: Client, measurement: &str) -> Self {
        Self {
            client,
            measurement: measurement.to_string(),
        }
    }

    pub fn from_env(measurement: &str) -> Self {
        Self::new(connect_to_db(), measurement)
    }

    fn delete_query(&self, record: &PricingRecord) -> ReadQuery {
        ReadQuery::new(format!(
            "DELETE FROM \"{}\" WHERE date_tag='{}' AND country_tag='{}'",
            self.measurement.replace('"', "\\\""),
            escape_literal(&record.date),
            escape_literal(&record.country)
        ))
    }

    fn queries(&self, record: &PricingRecord) -> Vec<WriteQuery> {
        record
            .hours
            .iter()
            .map(|hour| MonthlyPriceData::new(record, hour).into_query(self.measurement.as_str()))
            .collect()
    }
}

#[async_trait]
impl PricingStore for InfluxStore {
    fn name(&self) -> &'static str {
        "InfluxDB"
    }

    async fn put_pricing(&self, record: &PricingRecord) -> Result<(), StoreError> {
        self.client.query(self.delete_query(record)).await?;

        let queries = self.queries(record);
        if queries.is_empty() {
            warn!(
                "InfluxDB | Pricing {} - {} has no hours",
                record.date, record.country
            );
            return Ok(());
        }

        self.client.query(queries).await?;

        info!(
            "InfluxDB | Pricing {} - {} with {} hours",
            record.date,
            record.country,
            record.hours.len()
        );

        Ok(())
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn connect_to_db() -> Client {
    let database_url = dotenv::var("DATABASE_URL").unwrap_or("http://localhost:8086".to_string());
    let database_name = dotenv::var("DATABASE_NAME").unwrap_or("entsoe".to_string());

    Client::new(database_url, database_name)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use influxdb::Query;

    use super::*;
    use crate::pricing::HourlyPrice;

    #[test]
    fn test_queries_tag_date_and_country() {
        let store = InfluxStore::new(Client::new("http://localhost:8086", "entsoe"), "monthlyPricing");
        let record = PricingRecord {
            date: "2024-June-5".to_string(),
            country: "finland".to_string(),
            hours: vec![
                HourlyPrice {
                    timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                    price: 1.506,
                },
                HourlyPrice {
                    timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap(),
                    price: 2.0,
                },
            ],
        };

        let queries = store.queries(&record);
        assert_eq!(queries.len(), 2);

        let line = queries[0].build().unwrap().get();
        assert!(line.starts_with("monthlyPricing,"));
        assert!(line.contains("date_tag=2024-June-5"));
        assert!(line.contains("country_tag=finland"));
        assert!(line.contains("price=1.506"));
    }

    #[test]
    fn test_delete_query_targets_record_series() {
        let store = InfluxStore::new(Client::new("http://localhost:8086", "entsoe"), "monthlyPricing");
        let record = PricingRecord {
            date: "2024-June-5".to_string(),
            country: "cote d'ivoire".to_string(),
            hours: Vec::new(),
        };

        let query = store.delete_query(&record).build().unwrap().get();
        assert_eq!(
            query,
            r#"DELETE FROM "monthlyPricing" WHERE date_tag='2024-June-5' AND country_tag='cote d\'ivoire'"#
        );
    }

    #[tokio::test]
    async fn test_put_pricing_without_hours_still_deletes() {
        let store = InfluxStore::new(Client::new("http://127.0.0.1:1", "entsoe"), "monthlyPricing");
        let record = PricingRecord {
            date: "2024-June-5".to_string(),
            country: "finland".to_string(),
            hours: Vec::new(),
        };

        let err = store.put_pricing(&record).await.unwrap_err();
        assert!(matches!(err, StoreError::Influx(_)));
    }
}
