use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{PricingStore, StoreError};
use crate::pricing::PricingRecord;

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(String, String), PricingRecord>>,
}

impl MemoryStore {
    pub fn get(&self, date: &str, country: &str) -> Option<PricingRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(date.to_string(), country.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl PricingStore for MemoryStore {
    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn put_pricing(&self, record: &PricingRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().insert(
            (record.date.clone(), record.country.clone()),
            record.clone(),
        );

        Ok(())
    }
}

#[async_trait]
impl PricingStore for Arc<MemoryStore> {
    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn put_pricing(&self, record: &PricingRecord) -> Result<(), StoreError> {
        (**self).put_pricing(record).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::pricing::HourlyPrice;

    #[tokio::test]
    async fn test_put_pricing_overwrites_same_key() {
        let store = MemoryStore::default();
        let first = PricingRecord {
            date: "2024-June-5".to_string(),
            country: "finland".to_string(),
            hours: vec![HourlyPrice {
                timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                price: 1.0,
            }],
        };
        let second = PricingRecord {
            hours: Vec::new(),
            ..first.clone()
        };

        store.put_pricing(&first).await.unwrap();
        store.put_pricing(&second).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("2024-June-5", "finland"), Some(second));
    }
}
