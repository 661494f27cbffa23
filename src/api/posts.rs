//! Blog post API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiJson, ApiResult};
use crate::models::{BlogPost, Category, CreatePostRequest};
use crate::repository::DEFAULT_RECENT_COUNT;
use crate::AppState;

/// Query parameters for recent posts.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub count: Option<usize>,
}

/// GET /api/categories - List blog categories.
pub async fn list_categories() -> ApiResult<Vec<&'static str>> {
    success(Category::ALL.iter().map(Category::as_str).collect())
}

/// GET /api/posts - List all posts, newest first.
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    success(state.posts.list().await)
}

/// GET /api/posts/recent - Most recently dated posts.
pub async fn recent_posts(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Vec<BlogPost>> {
    let count = query.count.unwrap_or(DEFAULT_RECENT_COUNT);
    success(state.posts.recent(count).await)
}

/// POST /api/posts - Create a new post.
pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> ApiResult<BlogPost> {
    success(state.posts.create(request).await?)
}

/// PUT /api/posts/{id} - Replace a post.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(mut post): ApiJson<BlogPost>,
) -> ApiResult<BlogPost> {
    post.id = id;
    success(state.posts.update(post).await?)
}

/// DELETE /api/posts/{id} - Delete a post.
pub async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.posts.delete(&id).await?;
    success(())
}
