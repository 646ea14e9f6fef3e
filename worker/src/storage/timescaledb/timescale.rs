use async_trait::async_trait;
use tokio_postgres::{Error, NoTls};

use crate::pricing::PricingRecord;
use crate::storage::{PricingStore, StoreError};

pub fn is_enabled() -> bool {
    dotenv::var("TIMESCALEDB_ENABLED")
        .map(|var| var.parse::<bool>())
        .unwrap_or(Ok(false))
        .unwrap_or(false)
}

pub struct TimescaleStore {
    connection_string: String,
    table: String,
}

impl TimescaleStore {
    pub fn new(connection_string: &str, table: &str) -> Self {
        Self {
            connection_string: connection_string.to_string(),
            table: table.to_string(),
        }
    }

    pub fn from_env(table: &str) -> Self {
        Self::new(
            &dotenv::var("TIMESCALEDB_CONNECTION_STRING").unwrap_or(
                "host=localhost user=myuser password=mysecretpassword dbname=electricity"
                    .to_string(),
            ),
            table,
        )
    }
}

#[async_trait]
impl PricingStore for TimescaleStore {
    fn name(&self) -> &'static str {
        "TimescaleDB"
    }

    async fn put_pricing(&self, record: &PricingRecord) -> Result<(), StoreError> {
        let pricing = serde_json::to_value(&record.hours)?;

        let client = connect_to_db(&self.connection_string).await?;
        client.batch_execute(&create_table_statement(&self.table)).await?;
        client
            .execute(
                upsert_statement(&self.table).as_str(),
                &[&record.date, &record.country, &pricing],
            )
            .await?;

        info!(
            "TimescaleDB | Pricing {} - {} with {} hours",
            record.date,
            record.country,
            record.hours.len()
        );

        Ok(())
    }
}

fn create_table_statement(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (
            date TEXT NOT NULL,
            country TEXT NOT NULL,
            pricing JSONB NOT NULL,
            PRIMARY KEY (date, country)
        )",
        table
    )
}

fn upsert_statement(table: &str) -> String {
    format!(
        "INSERT INTO {} (date, country, pricing) VALUES ($1, $2, $3)
            ON CONFLICT (date, country) DO UPDATE SET pricing = EXCLUDED.pricing",
        table
    )
}

async fn connect_to_db(connection_string: &str) -> Result<tokio_postgres::Client, Error> {
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

    // The connection object performs the actual communication with the database,
    // so spawn it off to run on its own.
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("connection error: {}", e);
        }
    });

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_statement_overwrites_by_key() {
        let statement = upsert_statement("electricity_monthly_pricing");

        assert!(statement.starts_with("INSERT INTO electricity_monthly_pricing (date, country, pricing)"));
        assert!(statement.contains("ON CONFLICT (date, country) DO UPDATE SET pricing = EXCLUDED.pricing"));
    }

    #[test]
    fn test_create_table_statement_keys() {
        let statement = create_table_statement("electricity_monthly_pricing");

        assert!(statement.contains("CREATE TABLE IF NOT EXISTS electricity_monthly_pricing"));
        assert!(statement.contains("PRIMARY KEY (date, country)"));
    }

    #[tokio::test]
    async fn test_put_pricing_without_database() {
        let store = TimescaleStore::new("host=127.0.0.1 port=1 user=nobody dbname=none connect_timeout=1", "pricing");
        let record = PricingRecord {
            date: "2024-June-5".to_string(),
            country: "finland".to_string(),
            hours: Vec::new(),
        };

        let err = store.put_pricing(&record).await.unwrap_err();
        assert!(matches!(err, StoreError::Timescale(_)));
    }
}
