use actix_web::{web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;
use crate::models::DeleteResponse;
use crate::routes::{error_response, session_from, AppState};

/// Configure match and swipe management routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches", web::get().to(list_matches))
        .route("/matches/{id}", web::delete().to(remove_match))
        .route("/swipes/{id}", web::delete().to(remove_swipe));
}

/// Matches screen: matched profiles plus the caller's accepted and rejected swipes
///
/// GET /api/v1/matches
async fn list_matches(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = session_from(&req, &state);

    match state.engine.matches(&session).await {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => error_response(&e),
    }
}

/// Unmatch: deletes the match and both members' swipes about each other
///
/// DELETE /api/v1/matches/{id}
async fn remove_match(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let session = session_from(&req, &state);

    match state.engine.unmatch(&session, path.into_inner()).await {
        Ok(deleted_swipes) => HttpResponse::Ok().json(DeleteResponse {
            success: true,
            deleted_swipes,
        }),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/v1/swipes/{id}
async fn remove_swipe(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let session = session_from(&req, &state);

    match state.engine.delete_swipe(&session, path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse {
            success: true,
            deleted_swipes: 1,
        }),
        Err(e) => error_response(&e),
    }
}
