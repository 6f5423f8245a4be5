// Route exports
pub mod discover;
pub mod matches;
pub mod profile;

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use crate::core::{MatchEngine, Session};
use crate::error::MatchError;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::TokenVerifier;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchEngine,
    pub verifier: Arc<TokenVerifier>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(discover::configure)
            .configure(matches::configure)
            .configure(profile::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.engine.store().health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Build the request session from the bearer token.
///
/// A missing or invalid token yields an anonymous session; operations then
/// fail with `Unauthenticated`.
pub(crate) fn session_from(req: &HttpRequest, state: &AppState) -> Session {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.verifier.verify_header(header) {
        Ok(user_id) => Session::authenticated(user_id),
        Err(e) => {
            tracing::debug!("Anonymous request to {}: {}", req.path(), e);
            Session::anonymous()
        }
    }
}

pub(crate) fn status_for(err: &MatchError) -> StatusCode {
    match err {
        MatchError::Unauthenticated => StatusCode::UNAUTHORIZED,
        MatchError::InvalidSwipe(_) | MatchError::InvalidProfile(_) => StatusCode::BAD_REQUEST,
        MatchError::Forbidden(_) => StatusCode::FORBIDDEN,
        MatchError::NotFound(_) => StatusCode::NOT_FOUND,
        MatchError::FeedUnavailable(_) | MatchError::ReconciliationFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        MatchError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error response for a failed operation
pub(crate) fn error_response(err: &MatchError) -> HttpResponse {
    let status = status_for(err);

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::info!("Request rejected: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: err.code().to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
