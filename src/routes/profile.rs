use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::needs_onboarding;
use crate::models::{OnboardingDraft, ProfileResponse};
use crate::routes::{error_response, session_from, validation_response, AppState};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profile", web::get().to(get_profile))
        .route("/profile/onboarding", web::put().to(save_onboarding));
}

/// GET /api/v1/profile
async fn get_profile(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let session = session_from(&req, &state);

    match state.engine.profile(&session).await {
        Ok((profile, needs_onboarding)) => HttpResponse::Ok().json(ProfileResponse {
            profile,
            needs_onboarding,
        }),
        Err(e) => error_response(&e),
    }
}

/// Final step of the onboarding wizard
///
/// PUT /api/v1/profile/onboarding
async fn save_onboarding(
    state: web::Data<AppState>,
    req: HttpRequest,
    draft: web::Json<OnboardingDraft>,
) -> impl Responder {
    let session = session_from(&req, &state);
    if let Err(e) = session.require() {
        return error_response(&e);
    }

    if let Err(errors) = draft.validate() {
        return validation_response(errors);
    }

    match state.engine.complete_onboarding(&session, &draft).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse {
            needs_onboarding: needs_onboarding(Some(&profile)),
            profile: Some(profile),
        }),
        Err(e) => error_response(&e),
    }
}
