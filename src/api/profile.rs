use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::{
    config::AppConfig,
    database::Store,
    models::{ProfileUpdate, UserProfile},
    services::{
        auth_service::Claims,
        profile_service::{self, ChangePasswordRequest},
    },
};

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Current user's profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(store: web::Data<dyn Store>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("👤 GET /api/profile - user: {}", claims.user_id);

    match profile_service::get_profile(store.get_ref(), &claims.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ProfileResponse { success: true, user }),
        Err(e) => {
            log::warn!("❌ Profile fetch failed: {} - {}", claims.user_id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Profile",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed or email already taken"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    store: web::Data<dyn Store>,
    claims: web::ReqData<Claims>,
    update: web::Json<ProfileUpdate>,
) -> HttpResponse {
    log::info!("✏️  PUT /api/profile - user: {}", claims.user_id);

    match profile_service::update_profile(store.get_ref(), &claims.user_id, &update).await {
        Ok(user) => {
            log::info!("✅ Profile updated: {}", claims.user_id);
            HttpResponse::Ok().json(ProfileResponse { success: true, user })
        }
        Err(e) => {
            log::warn!("❌ Profile update failed: {} - {}", claims.user_id, e);
            e.error_response()
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PasswordChangedResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    put,
    path = "/api/profile/password",
    tag = "Profile",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = PasswordChangedResponse),
        (status = 400, description = "Missing fields, mismatch, too short or wrong current password"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    store: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    claims: web::ReqData<Claims>,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse {
    log::info!("🔑 PUT /api/profile/password - user: {}", claims.user_id);

    match profile_service::change_password(store.get_ref(), &config.auth, &claims.user_id, &request)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(PasswordChangedResponse {
            success: true,
            message: "Password updated successfully".to_string(),
        }),
        Err(e) => {
            log::warn!("❌ Password change failed: {} - {}", claims.user_id, e);
            e.error_response()
        }
    }
}
