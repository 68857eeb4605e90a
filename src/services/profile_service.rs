use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::{
    config::AuthConfig,
    database::Store,
    models::{ProfileUpdate, UserProfile},
    services::auth_service::{hash_password, verify_password, MIN_PASSWORD_LEN},
    utils::AppError,
};

#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ChangePasswordRequest {
    fn validate(&self) -> Result<(&str, &str), Vec<String>> {
        let (Some(current), Some(new), Some(confirm)) = (
            filled(&self.current_password),
            filled(&self.new_password),
            filled(&self.confirm_password),
        ) else {
            return Err(vec!["Please fill all password fields to change password".to_string()]);
        };

        let mut errors = Vec::new();
        if new != confirm {
            errors.push("New passwords do not match".to_string());
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "New password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ));
        }

        if errors.is_empty() {
            Ok((current, new))
        } else {
            Err(errors)
        }
    }
}

fn parse_user_id(user_id: &str) -> Result<ObjectId, AppError> {
    // A well-signed token with a malformed id can only point at a missing user
    ObjectId::parse_str(user_id).map_err(|_| AppError::NotFound("User not found".to_string()))
}

pub async fn get_profile(store: &dyn Store, user_id: &str) -> Result<UserProfile, AppError> {
    let id = parse_user_id(user_id)?;

    store
        .find_user_by_id(&id)
        .await?
        .map(UserProfile::from)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn update_profile(
    store: &dyn Store,
    user_id: &str,
    update: &ProfileUpdate,
) -> Result<UserProfile, AppError> {
    let id = parse_user_id(user_id)?;

    update.validate().map_err(AppError::Validation)?;

    store
        .update_user(&id, update)
        .await?
        .map(UserProfile::from)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Replaces the user's password after checking the current one.
pub async fn change_password(
    store: &dyn Store,
    config: &AuthConfig,
    user_id: &str,
    request: &ChangePasswordRequest,
) -> Result<(), AppError> {
    let id = parse_user_id(user_id)?;
    let (current, new) = request.validate().map_err(AppError::Validation)?;

    let user = store
        .find_user_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(current.to_string(), user.password).await? {
        return Err(AppError::Validation(vec![
            "Current password is incorrect".to_string(),
        ]));
    }

    let hashed = hash_password(new.to_string(), config.bcrypt_cost).await?;
    if !store.update_password(&id, &hashed).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    log::info!("🔑 Password changed for user {}", user_id);
    Ok(())
}
