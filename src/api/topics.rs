//! Topic API endpoints, scoped by technology.

use axum::extract::{Path, State};

use super::{success, ApiJson, ApiResult};
use crate::models::{CreateTopicRequest, Topic, UpdateTopicRequest, VoteRequest};
use crate::AppState;

/// GET /api/technologies/{tech_id}/topics - List topics of a technology.
pub async fn list_topics(
    State(state): State<AppState>,
    Path(tech_id): Path<String>,
) -> ApiResult<Vec<Topic>> {
    success(state.topics.list(&tech_id).await)
}

/// POST /api/technologies/{tech_id}/topics - Create a topic.
pub async fn create_topic(
    State(state): State<AppState>,
    Path(tech_id): Path<String>,
    ApiJson(request): ApiJson<CreateTopicRequest>,
) -> ApiResult<Topic> {
    success(state.topics.create(&tech_id, request).await?)
}

/// PUT /api/technologies/{tech_id}/topics/{topic_id} - Update title and/or content.
pub async fn update_topic(
    State(state): State<AppState>,
    Path((tech_id, topic_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<UpdateTopicRequest>,
) -> ApiResult<Topic> {
    success(state.topics.update(&tech_id, &topic_id, request).await?)
}

/// DELETE /api/technologies/{tech_id}/topics/{topic_id} - Delete a topic.
pub async fn delete_topic(
    State(state): State<AppState>,
    Path((tech_id, topic_id)): Path<(String, String)>,
) -> ApiResult<()> {
    state.topics.delete(&tech_id, &topic_id).await?;
    success(())
}

/// POST /api/technologies/{tech_id}/topics/{topic_id}/vote - Like, dislike or clear.
pub async fn vote_topic(
    State(state): State<AppState>,
    Path((tech_id, topic_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> ApiResult<Topic> {
    success(state.topics.vote(&tech_id, &topic_id, request.vote).await?)
}
