use actix_web::{http::header, web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::{database::Store, services::fields_service};

fn no_store<T: Serialize>(body: &T) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

#[utoipa::path(
    get,
    path = "/api/fields/fieldOfStudy",
    tag = "Fields",
    responses(
        (status = 200, description = "Fields of study", body = [crate::models::FieldOfStudyItem])
    )
)]
pub async fn fields_of_study(store: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📚 GET /api/fields/fieldOfStudy");

    match fields_service::fields_of_study(store.get_ref()).await {
        Ok(fields) => no_store(&fields),
        Err(e) => {
            log::error!("❌ Error fetching fields of study: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/fields/educationalLevels",
    tag = "Fields",
    responses(
        (status = 200, description = "Educational levels", body = [crate::models::EducationalLevelItem])
    )
)]
pub async fn educational_levels(store: web::Data<dyn Store>) -> HttpResponse {
    log::info!("🎓 GET /api/fields/educationalLevels");

    match fields_service::educational_levels(store.get_ref()).await {
        Ok(levels) => no_store(&levels),
        Err(e) => {
            log::error!("❌ Error fetching educational levels: {}", e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app_config, memory_store};
    use actix_web::{http::header, test, web, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_lookups_are_not_cached() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(memory_store()))
                .app_data(web::Data::new(app_config()))
                .configure(crate::api::configure),
        )
        .await;

        for (uri, key) in [
            ("/api/fields/fieldOfStudy", "name"),
            ("/api/fields/educationalLevels", "level"),
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert!(resp.status().is_success());
            assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");

            let body: Value = test::read_body_json(resp).await;
            let items = body.as_array().unwrap();
            assert_eq!(items.len(), 2);
            assert!(items[0]["_id"].is_string());
            assert!(items[0][key].is_string());
        }
    }
}
