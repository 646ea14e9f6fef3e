#[macro_use]
extern crate log;

use actix_web::{middleware, web, App, HttpServer};
use api::EntsoeClient;
use dotenv::dotenv;

use crate::app::{run_invocation, AppState};
use crate::endpoints::{health, post};
use crate::settings::time::SystemTimeProvider;
use crate::storage::FanOutStore;

mod app;
mod endpoints;
mod error;
mod logging;
mod pricing;
mod settings;
mod storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    logging::init_logging();

    info!("Pricing worker starting");

    let config = settings::config::load_settings(settings::config::settings_path())?;
    config.validate()?;

    info!("Using time zone: {}", config.timezone()?.name());

    let run_server: bool = dotenv::var("ENABLE_REST_API")
        .unwrap_or_else(|_| String::from("false"))
        .parse()
        .unwrap_or(false);

    let source = EntsoeClient::from_env();
    let store = FanOutStore::from_env(&config.storage)?;

    if run_server {
        let state = web::Data::new(AppState {
            settings: config,
            source: Box::new(source),
            store: Box::new(store),
            clock: Box::new(SystemTimeProvider),
        });

        let server = HttpServer::new(move || {
            App::new()
                .wrap(middleware::Logger::default())
                .app_data(state.clone())
                .service(health::health_check)
                .service(post::invoke)
        })
        .bind("0.0.0.0:9090")?;

        info!("REST API started at 0.0.0.0:9090");
        server.run().await?;

        return Ok(());
    }

    info!("Running a single invocation");
    let report = run_invocation(&config, &source, &store, &SystemTimeProvider).await?;

    if !report.is_success() {
        anyhow::bail!(
            "Pricing for {} failed in {} of {} countries",
            report.date,
            report.failed.len(),
            report.failed.len() + report.stored.len()
        );
    }

    info!(
        "Pricing for {} stored for {} countries",
        report.date,
        report.stored.len()
    );

    Ok(())
}
