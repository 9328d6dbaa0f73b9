use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    models::{barber_roster, haircut_catalog, CheckInSubmission},
    service::CheckInError,
    state::AppState,
    templates::{render, IndexTemplate},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/check-in").route(web::post().to(check_in)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn index() -> HttpResponse {
    render(IndexTemplate {
        barbers: barber_roster(),
        haircuts: haircut_catalog(),
    })
}

type SubmissionBody = web::Either<web::Json<CheckInSubmission>, web::Form<CheckInSubmission>>;

fn check_in_failed() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({ "error": "Error saving check-in." }))
}

/// Accepts the check-in as JSON or as an urlencoded form.
///
/// Bodies that fail to decode get the same generic failure as any other
/// rejected check-in.
async fn check_in(
    state: web::Data<AppState>,
    payload: Result<SubmissionBody, actix_web::Error>,
) -> HttpResponse {
    let submission = match payload {
        Ok(body) => body.into_inner(),
        Err(err) => {
            log::warn!("Unreadable check-in body: {err}");
            return check_in_failed();
        }
    };

    match state.checkins.create(submission).await {
        Ok(check_in) => {
            log::info!(
                "{} checked in with {} for {}",
                check_in.client_name,
                check_in.barber_name,
                check_in.haircut_type
            );
            HttpResponse::Ok().json(json!({
                "message": "Check-in successful",
                "checkIn": check_in,
            }))
        }
        Err(err) => {
            match &err {
                CheckInError::Validation(_) => log::warn!("Rejected check-in: {err}"),
                CheckInError::Persistence(_) => log::error!("Error saving check-in: {err}"),
            }
            check_in_failed()
        }
    }
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.checkins.health().await {
        Ok(()) => HttpResponse::Ok().body("ok"),
        Err(err) => {
            log::warn!("Health check failed on {} store: {err}", state.checkins.backend_name());
            HttpResponse::ServiceUnavailable().body("unavailable")
        }
    }
}
