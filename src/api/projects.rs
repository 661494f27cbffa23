//! Project API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiJson, ApiResult};
use crate::models::Project;
use crate::AppState;

/// GET /api/projects - List all projects.
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    success(state.projects.list().await)
}

/// POST /api/projects - Save a project; id "new" creates one.
pub async fn save_project(
    State(state): State<AppState>,
    ApiJson(project): ApiJson<Project>,
) -> ApiResult<Project> {
    success(state.projects.save(project).await?)
}

/// PUT /api/projects/{id} - Replace a project.
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(mut project): ApiJson<Project>,
) -> ApiResult<Project> {
    project.id = id;
    success(state.projects.update(project).await?)
}

/// DELETE /api/projects/{id} - Delete a project.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.projects.delete(&id).await?;
    success(())
}
