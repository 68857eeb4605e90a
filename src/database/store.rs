use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{
    ContactMessage, EducationalLevel, FieldOfStudy, Journey, JourneyStep, Post, ProfileUpdate,
    User,
};
use crate::utils::AppError;

/// Persistence seam used by the services. `MongoDB` is the production
/// implementation; tests run against an in-memory one.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> bool;

    // users
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;
    /// Fails with `AppError::DuplicateKey` if the email is already taken.
    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError>;
    async fn update_user(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError>;
    /// Replaces the stored bcrypt hash. Returns false if the user is gone.
    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError>;

    // lookups
    async fn fields_of_study(&self) -> Result<Vec<FieldOfStudy>, AppError>;
    async fn educational_levels(&self) -> Result<Vec<EducationalLevel>, AppError>;

    // journey
    async fn load_journey(&self, user_id: &str) -> Result<Option<Journey>, AppError>;
    /// Compare-and-swap write: stores `steps` only while the journey is still
    /// at `expected_version` (`None` = not stored yet). Returns false when a
    /// concurrent write got there first.
    async fn replace_journey(
        &self,
        user_id: &str,
        steps: &[JourneyStep],
        expected_version: Option<i64>,
    ) -> Result<bool, AppError>;
    /// Unconditional upsert; still bumps the version.
    async fn save_journey(&self, user_id: &str, steps: &[JourneyStep]) -> Result<(), AppError>;

    // community
    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError>;
    /// Newest first.
    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>, AppError>;
    async fn like_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError>;

    // contact
    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ObjectId, AppError>;
}
