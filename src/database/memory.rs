use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Mutex;

use super::Store;
use crate::models::{
    normalize_email, ContactMessage, EducationalLevel, FieldOfStudy, Journey, JourneyStep, Post,
    ProfileUpdate, User,
};
use crate::utils::AppError;

/// In-memory `Store` for unit tests. Mirrors the unique index on
/// `users.email` and the journey version check so duplicate and
/// concurrent-write handling can be exercised without MongoDB.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    fields: Mutex<Vec<FieldOfStudy>>,
    levels: Mutex<Vec<EducationalLevel>>,
    journeys: Mutex<HashMap<String, Journey>>,
    posts: Mutex<Vec<Post>>,
    pub contact_messages: Mutex<Vec<ContactMessage>>,
    yield_after_journey_load: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookups(fields: &[&str], levels: &[&str]) -> Self {
        let store = Self::default();
        *store.fields.lock().unwrap() = fields
            .iter()
            .map(|name| FieldOfStudy { id: Some(ObjectId::new()), name: name.to_string() })
            .collect();
        *store.levels.lock().unwrap() = levels
            .iter()
            .map(|level| EducationalLevel { id: Some(ObjectId::new()), level: level.to_string() })
            .collect();
        store
    }

    /// Yields to the runtime after every journey read, so concurrent
    /// callers interleave between their read and their write.
    pub fn interleaving_journey_loads(mut self) -> Self {
        self.yield_after_journey_load = true;
        self
    }
}

fn journey(user_id: &str, steps: &[JourneyStep], version: i64) -> Journey {
    Journey {
        id: None,
        user_id: user_id.to_string(),
        steps: steps.to_vec(),
        updated_at: None,
        version,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> bool {
        true
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = normalize_email(email);
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == Some(*id)).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateKey);
        }
        let id = user.id.unwrap_or_else(ObjectId::new);
        let mut stored = user.clone();
        stored.id = Some(id);
        users.push(stored);
        Ok(id)
    }

    async fn update_user(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();

        if let Some(email) = &update.email {
            let email = normalize_email(email);
            if users.iter().any(|u| u.email == email && u.id != Some(*id)) {
                return Err(AppError::DuplicateKey);
            }
        }

        Ok(users.iter_mut().find(|u| u.id == Some(*id)).map(|user| {
            update.apply_to(user);
            user.clone()
        }))
    }

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == Some(*id)) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn fields_of_study(&self) -> Result<Vec<FieldOfStudy>, AppError> {
        Ok(self.fields.lock().unwrap().clone())
    }

    async fn educational_levels(&self) -> Result<Vec<EducationalLevel>, AppError> {
        Ok(self.levels.lock().unwrap().clone())
    }

    async fn load_journey(&self, user_id: &str) -> Result<Option<Journey>, AppError> {
        let journey = self.journeys.lock().unwrap().get(user_id).cloned();
        if self.yield_after_journey_load {
            tokio::task::yield_now().await;
        }
        Ok(journey)
    }

    async fn replace_journey(
        &self,
        user_id: &str,
        steps: &[JourneyStep],
        expected_version: Option<i64>,
    ) -> Result<bool, AppError> {
        let mut journeys = self.journeys.lock().unwrap();
        let current = journeys.get(user_id).map(|j| j.version);
        if current != expected_version {
            return Ok(false);
        }

        let version = expected_version.map_or(1, |v| v + 1);
        journeys.insert(user_id.to_string(), journey(user_id, steps, version));
        Ok(true)
    }

    async fn save_journey(&self, user_id: &str, steps: &[JourneyStep]) -> Result<(), AppError> {
        let mut journeys = self.journeys.lock().unwrap();
        let version = journeys.get(user_id).map_or(1, |j| j.version + 1);
        journeys.insert(user_id.to_string(), journey(user_id, steps, version));
        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError> {
        let id = post.id.unwrap_or_else(ObjectId::new);
        let mut stored = post.clone();
        stored.id = Some(id);
        self.posts.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>, AppError> {
        let mut posts = self.posts.lock().unwrap().clone();
        // Stable sort on a reversed list keeps insertion order as the tiebreak
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit.max(0) as usize);
        Ok(posts)
    }

    async fn like_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        let mut posts = self.posts.lock().unwrap();
        Ok(posts.iter_mut().find(|p| p.id == Some(*id)).map(|post| {
            post.likes += 1;
            post.clone()
        }))
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        let mut stored = message.clone();
        stored.id = Some(id);
        self.contact_messages.lock().unwrap().push(stored);
        Ok(id)
    }
}
