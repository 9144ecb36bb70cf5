use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use kidney_match::config::{LoggingSettings, Settings};
use kidney_match::routes::{self, AppState};
use kidney_match::services::{load_artifacts, InferenceService};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging);

    info!("Starting Kidney Match prediction service...");
    info!("Configuration loaded successfully");

    // Artifacts load off the request path; until then predictions get 503
    let inference = Arc::new(InferenceService::new());
    let loader = inference.clone();
    let artifact_settings = settings.artifacts.clone();
    tokio::task::spawn_blocking(move || {
        let state = loader.load_with(|| load_artifacts(&artifact_settings));
        if state != kidney_match::ServiceState::Ready {
            error!("Serving in {} state until restarted", state.as_str());
        }
    });

    let app_state = AppState { inference };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
