//! Technology catalog API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiJson, ApiResult};
use crate::models::Technology;
use crate::AppState;

/// GET /api/technologies - List the catalog.
pub async fn list_technologies(State(state): State<AppState>) -> ApiResult<Vec<Technology>> {
    success(state.technologies.list().await)
}

/// PUT /api/technologies/{tech_id} - Replace a technology group.
pub async fn update_technology(
    State(state): State<AppState>,
    Path(tech_id): Path<String>,
    ApiJson(mut technology): ApiJson<Technology>,
) -> ApiResult<Technology> {
    technology.id = tech_id;
    success(state.technologies.update(technology).await?)
}
