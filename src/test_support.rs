use actix_web::web;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, AuthConfig, DirectoryConfig};
use crate::database::{memory::MemoryStore, Store};
use crate::models::{
    ContactMessage, EducationalLevel, FieldOfStudy, Journey, JourneyStep, Post, ProfileUpdate,
    User,
};
use crate::services::{auth_service, DirectoryService, HttpDirectorySource};
use crate::utils::AppError;

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        jwt_expiry_days: 7,
        // Minimum bcrypt cost keeps the suite fast
        bcrypt_cost: 4,
    }
}

pub fn app_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "mongodb://localhost:27017/edubridge_test".to_string(),
        auth: auth_config(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        directory: DirectoryConfig {
            cache_ttl: Duration::from_secs(60),
            countries_url: "http://127.0.0.1:9/countries".to_string(),
            cities_url: "http://127.0.0.1:9/cities".to_string(),
            universities_url: "http://127.0.0.1:9/universities".to_string(),
        },
    }
}

/// Directory service pointed at a closed local port, so every live lookup fails fast.
pub fn directory_service() -> web::Data<DirectoryService> {
    let config = app_config().directory;
    let source = HttpDirectorySource::new(&config).unwrap();
    web::Data::new(DirectoryService::new(Arc::new(source), config.cache_ttl))
}

pub fn memory_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::with_lookups(
        &["Computer Science", "Medicine"],
        &["High School", "Bachelor's"],
    ))
}

/// Registers a user straight through the service and returns (user id, bearer token).
pub async fn registered_user(store: &dyn Store, email: &str) -> (String, String) {
    let config = auth_config();
    let registered = auth_service::register(
        store,
        &config,
        &auth_service::RegisterRequest {
            first_name: Some("Test".into()),
            last_name: Some("Student".into()),
            email: Some(email.into()),
            password: Some("secret123".into()),
            country: Some("Israel".into()),
            educational_level: None,
        },
    )
    .await
    .unwrap();
    let token = auth_service::generate_jwt(&registered.user_id, email, &config).unwrap();
    (registered.user_id, token)
}

/// Store whose email lookup never sees existing users, the way a lookup
/// loses to a concurrent registration. Inserts still hit the unique email
/// check, so a taken address fails with `AppError::DuplicateKey`.
#[derive(Default)]
pub struct LookupMissStore(pub MemoryStore);

#[async_trait]
impl Store for LookupMissStore {
    async fn ping(&self) -> bool {
        self.0.ping().await
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        Ok(None)
    }

    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        self.0.find_user_by_id(id).await
    }

    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError> {
        self.0.insert_user(user).await
    }

    async fn update_user(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        self.0.update_user(id, update).await
    }

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        self.0.update_password(id, password_hash).await
    }

    async fn fields_of_study(&self) -> Result<Vec<FieldOfStudy>, AppError> {
        self.0.fields_of_study().await
    }

    async fn educational_levels(&self) -> Result<Vec<EducationalLevel>, AppError> {
        self.0.educational_levels().await
    }

    async fn load_journey(&self, user_id: &str) -> Result<Option<Journey>, AppError> {
        self.0.load_journey(user_id).await
    }

    async fn replace_journey(
        &self,
        user_id: &str,
        steps: &[JourneyStep],
        expected_version: Option<i64>,
    ) -> Result<bool, AppError> {
        self.0.replace_journey(user_id, steps, expected_version).await
    }

    async fn save_journey(&self, user_id: &str, steps: &[JourneyStep]) -> Result<(), AppError> {
        self.0.save_journey(user_id, steps).await
    }

    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError> {
        self.0.insert_post(post).await
    }

    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>, AppError> {
        self.0.recent_posts(limit).await
    }

    async fn like_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        self.0.like_post(id).await
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ObjectId, AppError> {
        self.0.insert_contact_message(message).await
    }
}
