use crate::{
    config::AuthConfig,
    database::Store,
    models::{is_valid_email, normalize_email, Preferences, User, UserProfile},
    utils::AppError,
};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
}

// Request/Response structures
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub country: Option<String>,
    pub educational_level: Option<String>,
}

#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
    pub success: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SignInResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
    pub success: bool,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Generate JWT token
pub fn generate_jwt(user_id: &str, email: &str, config: &AuthConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        user_id: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(config.jwt_expiry_days)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Token rejected: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })
}

/// bcrypt is CPU-bound, so it runs off the async workers.
pub(crate) async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// A stored value that is not a bcrypt hash never matches.
pub(crate) async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    let outcome = tokio::task::spawn_blocking(move || verify(password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?;

    match outcome {
        Ok(valid) => Ok(valid),
        Err(e) => {
            log::warn!("⚠️  Unreadable password hash: {}", e);
            Ok(false)
        }
    }
}

// User registration
pub async fn register(
    store: &dyn Store,
    config: &AuthConfig,
    request: &RegisterRequest,
) -> Result<RegisterResponse, AppError> {
    let (email, password) = match (non_blank(&request.email), request.password.as_deref()) {
        (Some(email), Some(password)) if !password.is_empty() => (normalize_email(email), password),
        (email, password) => {
            return Err(AppError::MissingCredentials {
                email: email.is_some(),
                password: password.map_or(false, |p| !p.is_empty()),
            })
        }
    };

    let mut errors = Vec::new();
    if !is_valid_email(&email) {
        errors.push(format!("'{}' is not a valid email address", email));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!("Password must be at least {} characters long", MIN_PASSWORD_LEN));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::UserExists);
    }

    let hashed_password = hash_password(password.to_string(), config.bcrypt_cost).await?;

    let now = BsonDateTime::now();
    let new_user = User {
        id: None,
        first_name: non_blank(&request.first_name).unwrap_or_default().to_string(),
        last_name: non_blank(&request.last_name).unwrap_or_default().to_string(),
        email: email.clone(),
        password: hashed_password,
        country: non_blank(&request.country).map(str::to_string),
        destination: None,
        educational_level: non_blank(&request.educational_level).map(str::to_string),
        field_of_study: None,
        bio: None,
        preferences: Preferences::default(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    // A concurrent registration can still slip past the lookup above; the
    // unique index turns that into AppError::DuplicateKey.
    let user_id = store.insert_user(&new_user).await?;

    log::info!("✅ User registered successfully: {}", email);

    Ok(RegisterResponse {
        message: "User created successfully".to_string(),
        user_id: user_id.to_hex(),
        success: true,
    })
}

// User sign in
pub async fn sign_in(
    store: &dyn Store,
    config: &AuthConfig,
    request: &SignInRequest,
) -> Result<SignInResponse, AppError> {
    let (email, password) = match (non_blank(&request.email), request.password.as_deref()) {
        (Some(email), Some(password)) if !password.is_empty() => (email, password),
        _ => {
            return Err(AppError::InvalidRequest(
                "Email and password are required".to_string(),
            ))
        }
    };

    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password.to_string(), user.password.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let user_id = user
        .id
        .map(|id| id.to_hex())
        .ok_or_else(|| AppError::Internal("Stored user has no id".to_string()))?;
    let token = generate_jwt(&user_id, &user.email, config)?;

    Ok(SignInResponse {
        message: "Sign in successful".to_string(),
        user: UserProfile::from(user),
        token,
        success: true,
    })
}
