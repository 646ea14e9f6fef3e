use api::{decode_document, EntsoeClient, FetchError, FetchWindow};
use async_trait::async_trait;

use crate::{
    error::PricingError,
    pricing::{normalize, PricingRecord, ReferenceMonth},
    settings::{
        config_model::{ErrorPolicy, SettingsConfig},
        time::{storage_date_label, TimeProvider},
    },
    storage::PricingStore,
};

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_day_ahead(&self, area: &str, window: &FetchWindow)
        -> Result<Vec<u8>, FetchError>;
}

#[async_trait]
impl PriceSource for EntsoeClient {
    async fn fetch_day_ahead(
        &self,
        area: &str,
        window: &FetchWindow,
    ) -> Result<Vec<u8>, FetchError> {
        self.get_day_ahead_prices(area, window).await
    }
}

/// Everything the REST trigger needs to run an invocation.
pub struct AppState {
    pub settings: SettingsConfig,
    pub source: Box<dyn PriceSource>,
    pub store: Box<dyn PricingStore>,
    pub clock: Box<dyn TimeProvider>,
}

impl AppState {
    pub async fn run_invocation(&self) -> Result<InvocationReport, PricingError> {
        run_invocation(
            &self.settings,
            self.source.as_ref(),
            self.store.as_ref(),
            self.clock.as_ref(),
        )
        .await
    }
}

#[derive(Debug)]
pub struct InvocationReport {
    pub date: String,
    pub stored: Vec<String>,
    pub failed: Vec<PricingError>,
}

impl InvocationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Values derived once per invocation so every country is stored against the same month.
struct Invocation {
    date: String,
    window: FetchWindow,
    reference_month: ReferenceMonth,
}

pub async fn run_invocation(
    settings: &SettingsConfig,
    source: &dyn PriceSource,
    store: &dyn PricingStore,
    clock: &dyn TimeProvider,
) -> Result<InvocationReport, PricingError> {
    let timezone = settings.timezone()?;
    let local_now = clock.now().with_timezone(&timezone);

    let invocation = Invocation {
        date: storage_date_label(&local_now),
        window: FetchWindow::month_to_date(local_now.date_naive()),
        reference_month: ReferenceMonth::from_datetime(&local_now),
    };

    info!(
        "Updating pricing for {} in {} countries",
        invocation.date,
        settings.countries.len()
    );

    let mut report = InvocationReport {
        date: invocation.date.clone(),
        stored: Vec::new(),
        failed: Vec::new(),
    };

    for (country, area) in &settings.countries {
        match update_country(&invocation, country, area, source, store).await {
            Ok(hours) => {
                info!(
                    "Pricing data for {} inserted to {} with {} hours",
                    country,
                    store.name(),
                    hours
                );
                report.stored.push(country.clone());
            }
            Err(err) => {
                error!("{}", err);

                match settings.error_policy {
                    ErrorPolicy::FailFast => return Err(err),
                    ErrorPolicy::ContinueOnError => report.failed.push(err),
                }
            }
        }
    }

    Ok(report)
}

async fn update_country(
    invocation: &Invocation,
    country: &str,
    area: &str,
    source: &dyn PriceSource,
    store: &dyn PricingStore,
) -> Result<usize, PricingError> {
    let body = source
        .fetch_day_ahead(area, &invocation.window)
        .await
        .map_err(|err| PricingError::fetch(country, err))?;

    let document = decode_document(&body).map_err(|err| PricingError::decode(country, err))?;

    let record = PricingRecord {
        date: invocation.date.clone(),
        country: country.to_string(),
        hours: normalize(&document, invocation.reference_month),
    };

    store
        .put_pricing(&record)
        .await
        .map_err(|err| PricingError::store(country, err))?;

    Ok(record.hours.len())
}
