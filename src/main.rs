use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::{Context, Result};
use dotenv::dotenv;
use qris_relay::{
    handlers, routes,
    services::upstream::{DynDonationGateway, UpstreamClient},
    settings::Settings,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;

    let client = UpstreamClient::new(&settings.upstream_base_url, &settings.upstream_site_url)
        .context("Failed to create upstream client")?;
    let gateway: DynDonationGateway = Arc::new(client);
    let gateway = web::Data::from(gateway);

    info!(
        "QRIS relay listening on http://{}:{} (upstream {})",
        settings.host, settings.port, settings.upstream_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(routes::api::cors())
            .wrap(Logger::default())
            .app_data(gateway.clone())
            .configure(routes::api::scoped_config)
            .default_service(web::to(handlers::not_found))
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| format!("Failed to bind {}:{}", settings.host, settings.port))?
    .run()
    .await
    .context("Server terminated unexpectedly")?;

    Ok(())
}
