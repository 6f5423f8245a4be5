use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use devmatch::config::{LoggingSettings, Settings, StorageBackend};
use devmatch::core::{MatchEngine, TagOverlapScorer};
use devmatch::models::{ErrorResponse, ScoringWeights};
use devmatch::routes::{self, AppState};
use devmatch::services::{MatchStore, MemoryStore, PostgresStore, RestStore, RestTables, TokenVerifier};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for malformed request payloads
#[derive(Debug)]
pub struct PayloadError(ErrorResponse);

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for PayloadError {}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PayloadError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle path parameter errors (e.g. a non-UUID id)
fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    PayloadError(ErrorResponse {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    })
    .into()
}

/// LOG_LEVEL and LOG_FORMAT override the [logging] section
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn MatchStore>> {
    let store: Arc<dyn MatchStore> = match settings.storage.backend {
        StorageBackend::Postgres => {
            let db = settings.database.as_ref().ok_or_else(|| config_error("missing [database] section"))?;
            let store = PostgresStore::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?;
            info!("PostgreSQL store initialized (max: {} connections)", db.max_connections.unwrap_or(10));
            Arc::new(store)
        }
        StorageBackend::Rest => {
            let rest = settings.rest.as_ref().ok_or_else(|| config_error("missing [rest] section"))?;
            let tables = RestTables {
                profiles: rest.profiles_table.clone(),
                swipes: rest.swipes_table.clone(),
                matches: rest.matches_table.clone(),
            };
            let store = RestStore::new(
                rest.url.clone(),
                rest.api_key.clone(),
                tables,
                Duration::from_secs(rest.timeout_secs.unwrap_or(30)),
            )
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            info!("REST store initialized for {}", rest.url);
            Arc::new(store)
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(store)
}

fn config_error(message: &str) -> std::io::Error {
    error!("Configuration error: {}", message);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging);

    info!("Starting DevMatch service...");
    info!("Configuration loaded (storage backend: {:?})", settings.storage.backend);

    let store = build_store(&settings).await?;

    let weights = ScoringWeights {
        skills: settings.scoring.weights.skills,
        interests: settings.scoring.weights.interests,
        looking_for: settings.scoring.weights.looking_for,
    };
    let scorer = Arc::new(TagOverlapScorer::new(weights));

    info!("Scorer initialized with weights: {:?}", weights);

    let verifier = Arc::new(TokenVerifier::new(
        &settings.auth.jwt_secret,
        settings.auth.audience.as_deref(),
    ));

    let app_state = AppState {
        engine: MatchEngine::new(store, scorer),
        verifier,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
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
