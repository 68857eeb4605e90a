use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document in the "fieldOfStudy" collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FieldOfStudy {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
}

/// Document in the "educationalLevels" collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EducationalLevel {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub level: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FieldOfStudyItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EducationalLevelItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub level: String,
}

impl From<FieldOfStudy> for FieldOfStudyItem {
    fn from(f: FieldOfStudy) -> Self {
        Self {
            id: f.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: f.name,
        }
    }
}

impl From<EducationalLevel> for EducationalLevelItem {
    fn from(l: EducationalLevel) -> Self {
        Self {
            id: l.id.map(|id| id.to_hex()).unwrap_or_default(),
            level: l.level,
        }
    }
}
