use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::services::comparison_service::{self, Comparison};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompareQuery {
    /// Home system code (`us` or `uk`)
    pub home: String,
    /// Destination system code (`us` or `uk`)
    pub destination: String,
}

#[utoipa::path(
    get,
    path = "/api/compare",
    tag = "Compare",
    params(CompareQuery),
    responses(
        (status = 200, description = "Side-by-side comparison of two education systems", body = Comparison),
        (status = 404, description = "No data for one of the systems")
    )
)]
pub async fn compare(query: web::Query<CompareQuery>) -> HttpResponse {
    log::info!("⚖️  GET /api/compare - {} -> {}", query.home, query.destination);

    match comparison_service::compare(&query.home, &query.destination) {
        Ok(comparison) => HttpResponse::Ok().json(comparison),
        Err(e) => {
            log::warn!("❌ Comparison unavailable: {}", e);
            e.error_response()
        }
    }
}
