use actix_web::{web, App, HttpServer};
use anyhow::Context;
use shop_ledger::config::{AppConfig, Config};
use shop_ledger::middleware::{json_config, RequestId};
use shop_ledger::modules;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(app: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("shop_ledger={},actix_web=info", app.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if app.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.app);
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting shop ledger preview service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        "Allocation: currency={}, tolerance={}, clamp_to_debt={}, overdue_after_days={}",
        config.allocation.currency,
        config.allocation.tolerance,
        config.allocation.clamp_to_debt,
        config.allocation.overdue_after_days
    );

    let allocation = web::Data::new(config.allocation.clone());
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(allocation.clone())
            .app_data(json_config())
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
