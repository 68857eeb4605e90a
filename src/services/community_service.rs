use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

use crate::{
    database::Store,
    models::{Post, PostView},
    utils::AppError,
};

pub const DEFAULT_FEED_LIMIT: i64 = 20;
const MAX_FEED_LIMIT: i64 = 100;
const MAX_POST_LEN: usize = 2000;

pub async fn list_posts(store: &dyn Store, limit: Option<i64>) -> Result<Vec<PostView>, AppError> {
    let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);

    Ok(store
        .recent_posts(limit)
        .await?
        .into_iter()
        .map(PostView::from)
        .collect())
}

pub async fn create_post(
    store: &dyn Store,
    user_id: &str,
    content: &str,
) -> Result<PostView, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation(vec!["content is required".to_string()]));
    }
    if content.chars().count() > MAX_POST_LEN {
        return Err(AppError::Validation(vec![format!(
            "content must be at most {} characters",
            MAX_POST_LEN
        )]));
    }

    let author_id = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::NotFound("User not found".to_string()))?;
    let author = store
        .find_user_by_id(&author_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut post = Post {
        id: None,
        author_id: user_id.to_string(),
        author_name: author.full_name(),
        author_initials: author.initials(),
        content: content.to_string(),
        likes: 0,
        comments: 0,
        created_at: BsonDateTime::now(),
    };
    post.id = Some(store.insert_post(&post).await?);

    log::info!("📝 Post {:?} created by {}", post.id, user_id);
    Ok(PostView::from(post))
}

pub async fn like_post(store: &dyn Store, post_id: &str) -> Result<PostView, AppError> {
    let id = ObjectId::parse_str(post_id)
        .map_err(|_| AppError::InvalidRequest(format!("Invalid post id: {}", post_id)))?;

    store
        .like_post(&id)
        .await?
        .map(PostView::from)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}
