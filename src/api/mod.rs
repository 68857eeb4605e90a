pub mod health;
pub mod auth;
pub mod profile;
pub mod fields;
pub mod directory;
pub mod journey;
pub mod community;
pub mod contact;
pub mod compare;
pub mod resources;
pub mod swagger;

use actix_web::web;

use crate::{middleware::AuthMiddleware, utils::AppError};

/// Registers every route. Expects `web::Data<dyn Store>`, `web::Data<AppConfig>`
/// and (for the directory routes) `web::Data<DirectoryService>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            // Auth
            .route("/register", web::post().to(auth::register))
            .route("/signin", web::post().to(auth::sign_in))
            // Profile - requires JWT
            .service(
                web::resource("/profile/password")
                    .wrap(AuthMiddleware)
                    .route(web::put().to(profile::change_password)),
            )
            .service(
                web::resource("/profile")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(profile::get_profile))
                    .route(web::put().to(profile::update_profile)),
            )
            // Lookup lists
            .service(
                web::scope("/fields")
                    .route("/fieldOfStudy", web::get().to(fields::fields_of_study))
                    .route("/educationalLevels", web::get().to(fields::educational_levels)),
            )
            // Public directories (cached)
            .service(
                web::scope("/directory")
                    .route("/countries", web::get().to(directory::countries))
                    .route("/countries/{code}/cities", web::get().to(directory::cities))
                    .route("/universities", web::get().to(directory::universities))
                    .route("/programs", web::get().to(directory::programs))
                    .route("/tuition", web::get().to(directory::tuition)),
            )
            // Journey checklist - requires JWT
            .service(
                web::scope("/journey")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(journey::get_journey))
                    .route(
                        "/steps/{step_id}/tasks/{task_id}/toggle",
                        web::post().to(journey::toggle_task),
                    )
                    .route("/reset", web::post().to(journey::reset_journey)),
            )
            // Community feed: reading is public, writing requires JWT
            .service(
                web::scope("/community")
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(community::list_posts))
                            .route(web::post().to(community::create_post).wrap(AuthMiddleware)),
                    )
                    .service(
                        web::resource("/posts/{id}/like")
                            .wrap(AuthMiddleware)
                            .route(web::post().to(community::like_post)),
                    ),
            )
            // Static resource library
            .service(
                web::scope("/resources")
                    .route("", web::get().to(resources::list_resources))
                    .route("/featured", web::get().to(resources::featured_resources))
                    .route("/categories", web::get().to(resources::categories)),
            )
            .route("/contact", web::post().to(contact::submit))
            .route("/compare", web::get().to(compare::compare)),
    );
}
