use api::{DecodeError, FetchError};
use thiserror::Error;

use crate::settings::config::ConfigError;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Failed fetching electricity pricing for {country}: {source}")]
    Fetch { country: String, source: FetchError },
    #[error("Failed decoding electricity pricing for {country}: {source}")]
    Decode { country: String, source: DecodeError },
    #[error("Failed parsing period start for {country}: {source}")]
    TimeParse { country: String, source: DecodeError },
    #[error("Failed storing electricity pricing for {country}: {source}")]
    Store { country: String, source: StoreError },
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

impl PricingError {
    pub fn fetch(country: &str, source: FetchError) -> Self {
        PricingError::Fetch {
            country: country.to_string(),
            source,
        }
    }

    pub fn decode(country: &str, source: DecodeError) -> Self {
        let country = country.to_string();
        match source {
            DecodeError::TimeParse { .. } => PricingError::TimeParse { country, source },
            _ => PricingError::Decode { country, source },
        }
    }

    pub fn store(country: &str, source: StoreError) -> Self {
        PricingError::Store {
            country: country.to_string(),
            source,
        }
    }
}
