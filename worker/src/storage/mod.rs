use async_trait::async_trait;
use thiserror::Error;

use crate::pricing::PricingRecord;
use crate::settings::config_model::StorageConfig;

pub mod influxdb;
#[cfg(test)]
pub mod memory;
pub mod timescaledb;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("TimescaleDB error: {0}")]
    Timescale(#[from] tokio_postgres::Error),
    #[error("InfluxDB error: {0}")]
    Influx(#[from] ::influxdb::Error),
    #[error("Failed serializing pricing: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("No storage enabled. Enable at least one with TIMESCALEDB_ENABLED or INFLUXDB_ENABLED")]
    NoneEnabled,
}

/// Writes one pricing row per (date, country), replacing any earlier row with the same key.
#[async_trait]
pub trait PricingStore: Send + Sync {
    fn name(&self) -> &'static str;

    async fn put_pricing(&self, record: &PricingRecord) -> Result<(), StoreError>;
}

/// Writes to every enabled storage in turn and stops at the first failure.
pub struct FanOutStore {
    stores: Vec<Box<dyn PricingStore>>,
}

impl FanOutStore {
    pub fn new(stores: Vec<Box<dyn PricingStore>>) -> Self {
        Self { stores }
    }

    pub fn from_env(config: &StorageConfig) -> Result<Self, StoreError> {
        let mut stores: Vec<Box<dyn PricingStore>> = Vec::new();

        if timescaledb::timescale::is_enabled() {
            stores.push(Box::new(timescaledb::timescale::TimescaleStore::from_env(
                &config.table,
            )));
        }

        if influxdb::influx::is_enabled() {
            stores.push(Box::new(influxdb::influx::InfluxStore::from_env(
                &config.measurement,
            )));
        }

        if stores.is_empty() {
            return Err(StoreError::NoneEnabled);
        }

        info!(
            "Storing pricing into {}",
            stores.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self::new(stores))
    }
}

#[async_trait]
impl PricingStore for FanOutStore {
    fn name(&self) -> &'static str {
        "FanOut"
    }

    async fn put_pricing(&self, record: &PricingRecord) -> Result<(), StoreError> {
        if self.stores.is_empty() {
            return Err(StoreError::NoneEnabled);
        }

        for store in &self.stores {
            store.put_pricing(record).await?;
        }

        Ok(())
    }
}
