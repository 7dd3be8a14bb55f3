use actix_web::{middleware, web, App, HttpServer};
use signup_gate::config::{LoggingSettings, Settings};
use signup_gate::routes::{self, AppState};
use signup_gate::services::{AuthAdminClient, SharedProvider};
use signup_gate::Gate;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load().and_then(|s| s.check().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting signup gate...");
    info!("Configuration loaded successfully");

    let client = AuthAdminClient::new(
        settings.provider.url.clone(),
        settings.provider.service_role_key.clone(),
        Some(settings.provider.request_timeout()),
    )
    .map_err(|e| {
        error!("Failed to create provider client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Provider client initialized for {}", client.base_url());

    let allowlist = settings.cors.allowlist();
    if allowlist.is_empty() {
        warn!("No allowed origins configured, browsers will be refused");
    } else {
        info!("Allowed origins: {:?}", allowlist.iter().collect::<Vec<_>>());
    }

    let provider: SharedProvider = Arc::new(client);
    let app_state =
        AppState::new(Gate::new(allowlist, provider)).with_body_limit(settings.server.body_limit());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    // Health lives on its own listener so every request on the gated port is gated
    if let Some(health_port) = settings.server.health_port {
        info!("Starting health server on {}:{}", host, health_port);
        let health_server = HttpServer::new(|| App::new().configure(routes::configure_health))
            .workers(1)
            .bind((host.clone(), health_port))?
            .run();
        actix_web::rt::spawn(health_server);
    }

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
