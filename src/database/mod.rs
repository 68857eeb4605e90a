pub mod store;
#[cfg(test)]
pub mod memory;

pub use store::Store;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

use crate::models::{
    email_filter, ContactMessage, EducationalLevel, FieldOfStudy, Journey, JourneyStep, Post,
    ProfileUpdate, User,
};
use crate::utils::AppError;

pub const USERS: &str = "users";
pub const FIELD_OF_STUDY: &str = "fieldOfStudy";
pub const EDUCATIONAL_LEVELS: &str = "educationalLevels";
pub const JOURNEYS: &str = "journeys";
pub const POSTS: &str = "posts";
pub const CONTACT_MESSAGES: &str = "contactMessages";

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some("edubridge".to_string());

        let client = Client::with_options(client_options)?;

        // Database name from the URI path, or the default
        let db_name = database_name_from_uri(uri);
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        // users(email) unique: the only hard invariant of the user record
        let users = self.collection::<Document>(USERS);
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(email_index).await?;
        log::info!("   ✅ Index ready: users(email) unique");

        let journeys = self.collection::<Document>(JOURNEYS);
        let journey_index = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match journeys.create_index(journey_index).await {
            Ok(_) => log::info!("   ✅ Index ready: journeys(userId) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create journeys(userId) index: {}", e),
        }

        let posts = self.collection::<Document>(POSTS);
        let posts_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .build();
        match posts.create_index(posts_index).await {
            Ok(_) => log::info!("   ✅ Index ready: posts(createdAt)"),
            Err(e) => log::warn!("   ⚠️  Could not create posts(createdAt) index: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

fn database_name_from_uri(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or("edubridge")
        .to_string()
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn db_error(err: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&err) {
        AppError::DuplicateKey
    } else {
        AppError::Database(err.to_string())
    }
}

fn encode_steps(steps: &[JourneyStep]) -> Result<Bson, AppError> {
    mongodb::bson::to_bson(steps)
        .map_err(|e| AppError::Internal(format!("Failed to encode journey: {}", e)))
}

fn inserted_object_id(result: mongodb::results::InsertOneResult) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Database("Inserted id is not an ObjectId".to_string()))
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> bool {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .is_ok()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>(USERS)
            .find_one(email_filter(email))
            .await
            .map_err(db_error)
    }

    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        self.collection::<User>(USERS)
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn insert_user(&self, user: &User) -> Result<ObjectId, AppError> {
        let result = self
            .collection::<User>(USERS)
            .insert_one(user)
            .await
            .map_err(db_error)?;
        inserted_object_id(result)
    }

    async fn update_user(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        self.collection::<User>(USERS)
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update.to_set_document() })
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let result = self
            .collection::<User>(USERS)
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "password": password_hash, "updatedAt": BsonDateTime::now() } },
            )
            .await
            .map_err(db_error)?;
        Ok(result.matched_count == 1)
    }

    async fn fields_of_study(&self) -> Result<Vec<FieldOfStudy>, AppError> {
        let cursor = self
            .collection::<FieldOfStudy>(FIELD_OF_STUDY)
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await
            .map_err(db_error)?;
        cursor.try_collect().await.map_err(db_error)
    }

    async fn educational_levels(&self) -> Result<Vec<EducationalLevel>, AppError> {
        let cursor = self
            .collection::<EducationalLevel>(EDUCATIONAL_LEVELS)
            .find(doc! {})
            .await
            .map_err(db_error)?;
        cursor.try_collect().await.map_err(db_error)
    }

    async fn load_journey(&self, user_id: &str) -> Result<Option<Journey>, AppError> {
        self.collection::<Journey>(JOURNEYS)
            .find_one(doc! { "userId": user_id })
            .await
            .map_err(db_error)
    }

    async fn replace_journey(
        &self,
        user_id: &str,
        steps: &[JourneyStep],
        expected_version: Option<i64>,
    ) -> Result<bool, AppError> {
        let collection = self.collection::<Journey>(JOURNEYS);

        let Some(version) = expected_version else {
            let journey = Journey {
                id: None,
                user_id: user_id.to_string(),
                steps: steps.to_vec(),
                updated_at: Some(BsonDateTime::now()),
                version: 1,
            };
            // journeys(userId) is unique, so a racing first write loses here
            return match collection.insert_one(&journey).await.map_err(db_error) {
                Ok(_) => Ok(true),
                Err(AppError::DuplicateKey) => Ok(false),
                Err(e) => Err(e),
            };
        };

        let steps = encode_steps(steps)?;
        // Journeys written before versioning have no `version` field
        let current: Bson = if version == 0 {
            doc! { "$in": [0_i64, Bson::Null] }.into()
        } else {
            Bson::Int64(version)
        };

        let result = collection
            .update_one(
                doc! { "userId": user_id, "version": current },
                doc! {
                    "$set": {
                        "steps": steps,
                        "updatedAt": BsonDateTime::now(),
                        "version": version + 1,
                    }
                },
            )
            .await
            .map_err(db_error)?;

        Ok(result.matched_count == 1)
    }

    async fn save_journey(&self, user_id: &str, steps: &[JourneyStep]) -> Result<(), AppError> {
        let steps = encode_steps(steps)?;

        self.collection::<Journey>(JOURNEYS)
            .update_one(
                doc! { "userId": user_id },
                doc! {
                    "$set": { "steps": steps, "updatedAt": BsonDateTime::now() },
                    "$inc": { "version": 1_i64 },
                },
            )
            .upsert(true)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<ObjectId, AppError> {
        let result = self
            .collection::<Post>(POSTS)
            .insert_one(post)
            .await
            .map_err(db_error)?;
        inserted_object_id(result)
    }

    async fn recent_posts(&self, limit: i64) -> Result<Vec<Post>, AppError> {
        let cursor = self
            .collection::<Post>(POSTS)
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await
            .map_err(db_error)?;
        cursor.try_collect().await.map_err(db_error)
    }

    async fn like_post(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        self.collection::<Post>(POSTS)
            .find_one_and_update(doc! { "_id": *id }, doc! { "$inc": { "likes": 1 } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ObjectId, AppError> {
        let result = self
            .collection::<ContactMessage>(CONTACT_MESSAGES)
            .insert_one(message)
            .await
            .map_err(db_error)?;
        inserted_object_id(result)
    }
}
