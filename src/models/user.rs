use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

/// Document in the "users" collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<BsonDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<BsonDateTime>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub email_notifications: bool,
    #[serde(default = "default_true")]
    pub app_notifications: bool,
    #[serde(default = "default_true")]
    pub resource_recommendations: bool,
    #[serde(default = "default_true")]
    pub peer_connections: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            app_notifications: true,
            resource_recommendations: true,
            peer_connections: true,
        }
    }
}

/// User as returned by the API: never carries the password hash.
#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: Option<String>,
    pub destination: Option<String>,
    pub educational_level: Option<String>,
    pub field_of_study: Option<String>,
    pub bio: Option<String>,
    pub preferences: Preferences,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            country: user.country,
            destination: user.destination,
            educational_level: user.educational_level,
            field_of_study: user.field_of_study,
            bio: user.bio,
            preferences: user.preferences,
            created_at: user.created_at.and_then(|d| d.try_to_rfc3339_string().ok()),
            updated_at: user.updated_at.and_then(|d| d.try_to_rfc3339_string().ok()),
        }
    }
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// Body of PUT /api/profile.
///
/// No `password` field: serde drops unknown keys, so the stored hash is
/// unreachable through this route.
#[derive(Debug, Deserialize, Default, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub destination: Option<String>,
    pub educational_level: Option<String>,
    pub field_of_study: Option<String>,
    pub bio: Option<String>,
    pub preferences: Option<PreferencesUpdate>,
}

#[derive(Debug, Deserialize, Default, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub email_notifications: Option<bool>,
    pub app_notifications: Option<bool>,
    pub resource_recommendations: Option<bool>,
    pub peer_connections: Option<bool>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if matches!(&self.first_name, Some(v) if v.trim().is_empty()) {
            errors.push("First name cannot be empty".to_string());
        }
        if matches!(&self.last_name, Some(v) if v.trim().is_empty()) {
            errors.push("Last name cannot be empty".to_string());
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                errors.push(format!("'{}' is not a valid email address", email));
            }
        }
        if matches!(&self.bio, Some(v) if v.chars().count() > 1000) {
            errors.push("Bio cannot exceed 1000 characters".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the `$set` document for MongoDB. Preferences are set per key
    /// so a partial preferences object does not wipe the others.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();

        let strings = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("country", &self.country),
            ("destination", &self.destination),
            ("educationalLevel", &self.educational_level),
            ("fieldOfStudy", &self.field_of_study),
            ("bio", &self.bio),
        ];
        for (key, value) in strings {
            if let Some(v) = value {
                set.insert(key, v.trim());
            }
        }
        if let Some(email) = &self.email {
            set.insert("email", normalize_email(email));
        }

        if let Some(prefs) = &self.preferences {
            let flags = [
                ("preferences.emailNotifications", prefs.email_notifications),
                ("preferences.appNotifications", prefs.app_notifications),
                ("preferences.resourceRecommendations", prefs.resource_recommendations),
                ("preferences.peerConnections", prefs.peer_connections),
            ];
            for (key, value) in flags {
                if let Some(v) = value {
                    set.insert(key, v);
                }
            }
        }

        set.insert("updatedAt", BsonDateTime::now());
        set
    }

    /// Same semantics as `to_set_document`, applied to an in-memory user.
    #[cfg(test)]
    pub fn apply_to(&self, user: &mut User) {
        if let Some(v) = &self.first_name {
            user.first_name = v.trim().to_string();
        }
        if let Some(v) = &self.last_name {
            user.last_name = v.trim().to_string();
        }
        if let Some(v) = &self.email {
            user.email = normalize_email(v);
        }
        let optionals = [
            (&mut user.country, &self.country),
            (&mut user.destination, &self.destination),
            (&mut user.educational_level, &self.educational_level),
            (&mut user.field_of_study, &self.field_of_study),
            (&mut user.bio, &self.bio),
        ];
        for (field, value) in optionals {
            if let Some(v) = value {
                *field = Some(v.trim().to_string());
            }
        }
        if let Some(prefs) = &self.preferences {
            let p = &mut user.preferences;
            p.email_notifications = prefs.email_notifications.unwrap_or(p.email_notifications);
            p.app_notifications = prefs.app_notifications.unwrap_or(p.app_notifications);
            p.resource_recommendations =
                prefs.resource_recommendations.unwrap_or(p.resource_recommendations);
            p.peer_connections = prefs.peer_connections.unwrap_or(p.peer_connections);
        }
        user.updated_at = Some(BsonDateTime::now());
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn email_filter(email: &str) -> Document {
    doc! { "email": normalize_email(email) }
}
