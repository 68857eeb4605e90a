use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Document in the "posts" collection (community feed).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author_id: String,
    pub author_name: String,
    pub author_initials: String,
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comments: i64,
    pub created_at: BsonDateTime,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
pub struct PostAuthor {
    pub name: String,
    pub initials: String,
}

#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub author: PostAuthor,
    pub content: String,
    pub likes: i64,
    pub comments: i64,
    pub created_at: String,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            author: PostAuthor {
                name: post.author_name,
                initials: post.author_initials,
            },
            content: post.content,
            likes: post.likes,
            comments: post.comments,
            created_at: post
                .created_at
                .try_to_rfc3339_string()
                .unwrap_or_default(),
        }
    }
}
