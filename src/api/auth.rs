use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    config::AppConfig,
    database::Store,
    services::auth_service::{self, RegisterRequest, RegisterResponse, SignInRequest, SignInResponse},
};

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Missing fields, validation failure or email already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    store: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /api/register - email: {}", email);

    match auth_service::register(store.get_ref(), &config.auth, &request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {}", email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/signin",
    tag = "Auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Sign in successful", body = SignInResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn sign_in(
    store: web::Data<dyn Store>,
    config: web::Data<AppConfig>,
    request: web::Json<SignInRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /api/signin - email: {}", email);

    match auth_service::sign_in(store.get_ref(), &config.auth, &request).await {
        Ok(response) => {
            log::info!("✅ Sign in successful: {}", email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Sign in failed: {} - {}", email, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::database::Store;
    use crate::test_support::{app_config, memory_store, LookupMissStore};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from(memory_store()))
                    .app_data(web::Data::new(app_config()))
                    .configure(crate::api::configure),
            )
            .await
        };
    }

    fn registration() -> Value {
        json!({
            "firstName": "Maya",
            "lastName": "Cohen",
            "email": "maya@example.com",
            "password": "secret123",
            "country": "Israel",
            "educationalLevel": "Bachelor's"
        })
    }

    #[actix_web::test]
    async fn test_register_twice_is_rejected() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(registration())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["userId"].as_str().is_some());

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(registration())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "USER_EXISTS");
    }

    #[actix_web::test]
    async fn test_register_insert_race_is_400_duplicate_key() {
        let store: Arc<dyn Store> = Arc::new(LookupMissStore::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .app_data(web::Data::new(app_config()))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(registration())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(registration())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "DUPLICATE_KEY");
    }

    #[actix_web::test]
    async fn test_register_missing_password_details() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "email": "x@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Email and password are required.");
        assert_eq!(body["details"], json!({ "email": true, "password": false }));
    }

    #[actix_web::test]
    async fn test_sign_in_wrong_password_is_401() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(registration())
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/signin")
            .set_json(json!({ "email": "maya@example.com", "password": "wrong-one" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        let req = test::TestRequest::post()
            .uri("/api/signin")
            .set_json(json!({ "email": "maya@example.com", "password": "secret123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["token"].as_str().is_some());
        assert!(body["user"].get("password").is_none());
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/signin")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}
