use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::{
    database::Store,
    models::{CreatePostRequest, PostView},
    services::{auth_service::Claims, community_service},
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Number of posts, 1 to 100 (default 20)
    pub limit: Option<i64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PostsResponse {
    pub success: bool,
    pub posts: Vec<PostView>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PostResponse {
    pub success: bool,
    pub post: PostView,
}

#[utoipa::path(
    get,
    path = "/api/community/posts",
    tag = "Community",
    params(FeedQuery),
    responses((status = 200, description = "Newest posts first", body = PostsResponse))
)]
pub async fn list_posts(store: web::Data<dyn Store>, query: web::Query<FeedQuery>) -> HttpResponse {
    log::info!("💬 GET /api/community/posts - limit: {:?}", query.limit);

    match community_service::list_posts(store.get_ref(), query.limit).await {
        Ok(posts) => HttpResponse::Ok().json(PostsResponse { success: true, posts }),
        Err(e) => {
            log::error!("❌ Error fetching posts: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/community/posts",
    tag = "Community",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Empty or oversized content"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    store: web::Data<dyn Store>,
    claims: web::ReqData<Claims>,
    request: web::Json<CreatePostRequest>,
) -> HttpResponse {
    log::info!("📝 POST /api/community/posts - user: {}", claims.user_id);

    match community_service::create_post(store.get_ref(), &claims.user_id, &request.content).await {
        Ok(post) => HttpResponse::Created().json(PostResponse { success: true, post }),
        Err(e) => {
            log::warn!("❌ Post creation failed for {}: {}", claims.user_id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/community/posts/{id}/like",
    tag = "Community",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with incremented likes", body = PostResponse),
        (status = 400, description = "Malformed post id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn like_post(store: web::Data<dyn Store>, id: web::Path<String>) -> HttpResponse {
    log::info!("👍 POST /api/community/posts/{}/like", id);

    match community_service::like_post(store.get_ref(), &id).await {
        Ok(post) => HttpResponse::Ok().json(PostResponse { success: true, post }),
        Err(e) => {
            log::warn!("❌ Like failed for {}: {}", id, e);
            e.error_response()
        }
    }
}
