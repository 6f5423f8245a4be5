use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::parse_direction;
use crate::models::{FeedResponse, SwipeRequest, SwipeResponse};
use crate::routes::{error_response, session_from, validation_response, AppState};

/// Configure discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/discover", web::get().to(get_feed))
        .route("/discover/swipe", web::post().to(swipe));
}

/// Discovery feed endpoint
///
/// GET /api/v1/discover
async fn get_feed(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = session_from(&req, &state);

    match state.engine.feed(&session).await {
        Ok(profiles) => HttpResponse::Ok().json(FeedResponse {
            total_results: profiles.len(),
            profiles,
        }),
        Err(e) => error_response(&e),
    }
}

/// Swipe endpoint
///
/// POST /api/v1/discover/swipe
///
/// Request body:
/// ```json
/// {
///   "targetId": "uuid",
///   "direction": "left|right|superlike"
/// }
/// ```
async fn swipe(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<SwipeRequest>,
) -> impl Responder {
    let session = session_from(&req, &state);
    if let Err(e) = session.require() {
        return error_response(&e);
    }

    if let Err(errors) = body.validate() {
        return validation_response(errors);
    }

    let direction = match parse_direction(&body.direction) {
        Ok(d) => d,
        Err(e) => return error_response(&e),
    };

    match state.engine.swipe(&session, body.target_id, direction).await {
        Ok(result) => {
            let matched = result.outcome.is_new_match();
            let new_match = if matched { result.outcome.matched().cloned() } else { None };

            HttpResponse::Ok().json(SwipeResponse {
                swipe: result.swipe,
                matched,
                new_match,
            })
        }
        Err(e) => error_response(&e),
    }
}
