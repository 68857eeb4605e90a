use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::Store,
    models::JourneyResponse,
    services::{auth_service::Claims, journey_service},
    utils::AppError,
};

fn respond(result: Result<JourneyResponse, AppError>, user_id: &str) -> HttpResponse {
    match result {
        Ok(journey) => HttpResponse::Ok().json(journey),
        Err(e) => {
            log::warn!("❌ Journey request failed for {}: {}", user_id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/journey",
    tag = "Journey",
    responses(
        (status = 200, description = "Journey checklist with progress", body = JourneyResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_journey(store: web::Data<dyn Store>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("🧭 GET /api/journey - user: {}", claims.user_id);
    respond(
        journey_service::get_journey(store.get_ref(), &claims.user_id).await,
        &claims.user_id,
    )
}

#[utoipa::path(
    post,
    path = "/api/journey/steps/{step_id}/tasks/{task_id}/toggle",
    tag = "Journey",
    params(
        ("step_id" = u32, Path, description = "Step id"),
        ("task_id" = u32, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Updated journey", body = JourneyResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown step or task"),
        (status = 409, description = "Journey kept changing underneath the toggle")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_task(
    store: web::Data<dyn Store>,
    claims: web::ReqData<Claims>,
    path: web::Path<(u32, u32)>,
) -> HttpResponse {
    let (step_id, task_id) = path.into_inner();
    log::info!(
        "☑️  POST /api/journey/steps/{}/tasks/{}/toggle - user: {}",
        step_id,
        task_id,
        claims.user_id
    );
    respond(
        journey_service::toggle_task(store.get_ref(), &claims.user_id, step_id, task_id).await,
        &claims.user_id,
    )
}

#[utoipa::path(
    post,
    path = "/api/journey/reset",
    tag = "Journey",
    responses(
        (status = 200, description = "Journey restored to the default template", body = JourneyResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reset_journey(store: web::Data<dyn Store>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("🔄 POST /api/journey/reset - user: {}", claims.user_id);
    respond(
        journey_service::reset_journey(store.get_ref(), &claims.user_id).await,
        &claims.user_id,
    )
}
