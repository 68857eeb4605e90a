use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::{database::Store, models::ContactRequest, services::contact_service};

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn submit(store: web::Data<dyn Store>, request: web::Json<ContactRequest>) -> HttpResponse {
    log::info!("📬 POST /api/contact - subject: {}", request.subject);

    match contact_service::submit(store.get_ref(), &request).await {
        Ok(id) => HttpResponse::Created().json(ContactResponse {
            success: true,
            message: "Message received".to_string(),
            id,
        }),
        Err(e) => {
            log::warn!("❌ Contact submission rejected: {}", e);
            e.error_response()
        }
    }
}
