use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::services::directory_service::{
    tuition_band, City, Country, DirectoryService, Program, TuitionBand, University, PROGRAMS,
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UniversitiesQuery {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub city: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TuitionQuery {
    /// Country name, e.g. "Germany"
    pub country: String,
}

#[utoipa::path(
    get,
    path = "/api/directory/countries",
    tag = "Directory",
    responses(
        (status = 200, description = "Countries sorted by name", body = [Country]),
        (status = 502, description = "Country directory unavailable")
    )
)]
pub async fn countries(directory: web::Data<DirectoryService>) -> HttpResponse {
    log::info!("🌍 GET /api/directory/countries");

    match directory.countries().await {
        Ok(countries) => HttpResponse::Ok().json(countries),
        Err(e) => {
            log::error!("❌ Error fetching countries: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/directory/countries/{code}/cities",
    tag = "Directory",
    params(("code" = String, Path, description = "Country code")),
    responses(
        (status = 200, description = "Cities sorted by name", body = [City]),
        (status = 404, description = "Unknown country code"),
        (status = 502, description = "City directory unavailable")
    )
)]
pub async fn cities(
    directory: web::Data<DirectoryService>,
    code: web::Path<String>,
) -> HttpResponse {
    log::info!("🏙️  GET /api/directory/countries/{}/cities", code);

    match directory.cities(&code).await {
        Ok(cities) => {
            log::info!("✅ {} cities for {}", cities.len(), code);
            HttpResponse::Ok().json(cities)
        }
        Err(e) => {
            log::warn!("❌ Error fetching cities for {}: {}", code, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/directory/universities",
    tag = "Directory",
    params(UniversitiesQuery),
    responses(
        (status = 200, description = "Universities in or near the city", body = [University]),
        (status = 400, description = "Missing country or city"),
        (status = 404, description = "Unknown country code"),
        (status = 502, description = "University directory unavailable")
    )
)]
pub async fn universities(
    directory: web::Data<DirectoryService>,
    query: web::Query<UniversitiesQuery>,
) -> HttpResponse {
    log::info!(
        "🎓 GET /api/directory/universities - country: {}, city: {}",
        query.country,
        query.city
    );

    match directory.universities(&query.country, &query.city).await {
        Ok(universities) => HttpResponse::Ok().json(universities),
        Err(e) => {
            log::warn!("❌ Error fetching universities: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/directory/programs",
    tag = "Directory",
    responses((status = 200, description = "Common study programs", body = [Program]))
)]
pub async fn programs() -> HttpResponse {
    log::info!("📖 GET /api/directory/programs");
    HttpResponse::Ok().json(PROGRAMS)
}

#[utoipa::path(
    get,
    path = "/api/directory/tuition",
    tag = "Directory",
    params(TuitionQuery),
    responses((status = 200, description = "Typical annual tuition band", body = TuitionBand))
)]
pub async fn tuition(query: web::Query<TuitionQuery>) -> HttpResponse {
    log::info!("💰 GET /api/directory/tuition - country: {}", query.country);
    HttpResponse::Ok().json(tuition_band(&query.country))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app_config, directory_service, memory_store};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from(memory_store()))
                    .app_data(web::Data::new(app_config()))
                    .app_data(directory_service())
                    .configure(crate::api::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_programs_static_list() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/directory/programs").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let programs = body.as_array().unwrap();
        assert_eq!(programs.len(), 12);
        assert_eq!(programs[0]["id"], "computer-science");
    }

    #[actix_web::test]
    async fn test_tuition_band() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/directory/tuition?country=United%20Kingdom")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["min"], 15000);
        assert_eq!(body["max"], 40000);
        assert_eq!(body["currency"], "USD");
    }

    #[actix_web::test]
    async fn test_unreachable_directory_is_bad_gateway() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/directory/countries").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "UPSTREAM_ERROR");
    }

    #[actix_web::test]
    async fn test_universities_requires_city_param() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/directory/universities?country=IL")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
