use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::services::resources_service::{self, LibraryResource};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourcesQuery {
    /// Case-insensitive text matched against title and description
    pub search: Option<String>,
    /// Comma-separated categories; a resource matches if it has any of them
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Resources",
    params(ResourcesQuery),
    responses((status = 200, description = "Matching library entries", body = [LibraryResource]))
)]
pub async fn list_resources(query: web::Query<ResourcesQuery>) -> HttpResponse {
    log::info!(
        "📚 GET /api/resources - search: {:?}, category: {:?}",
        query.search,
        query.category
    );

    let categories: Vec<&str> = query
        .category
        .as_deref()
        .map(|raw| raw.split(',').map(str::trim).filter(|c| !c.is_empty()).collect())
        .unwrap_or_default();

    HttpResponse::Ok().json(resources_service::search(query.search.as_deref(), &categories))
}

#[utoipa::path(
    get,
    path = "/api/resources/featured",
    tag = "Resources",
    responses((status = 200, description = "Featured library entries", body = [LibraryResource]))
)]
pub async fn featured_resources() -> HttpResponse {
    log::info!("⭐ GET /api/resources/featured");
    HttpResponse::Ok().json(resources_service::featured())
}

#[utoipa::path(
    get,
    path = "/api/resources/categories",
    tag = "Resources",
    responses((status = 200, description = "Sorted category names", body = [String]))
)]
pub async fn categories() -> HttpResponse {
    log::info!("🏷️  GET /api/resources/categories");
    HttpResponse::Ok().json(resources_service::categories())
}
