//! Question endpoints.

use crate::{
    api::{
        AppState,
        extract::{IdPath, JsonBody},
        response::ApiResponse,
    },
    core::question::{self, NewQuestion},
    entities::question as question_entity,
    errors::{Error, Result},
};
use axum::extract::State;

/// `POST /questions`
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewQuestion>,
) -> Result<ApiResponse<question_entity::Model>> {
    Ok(ApiResponse::data(
        question::create_question(&*state.db, input).await?,
    ))
}

/// `GET /questions/:id`
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<question_entity::Model>> {
    let found = question::get_question(&*state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("Question", id))?;
    Ok(ApiResponse::data(found))
}

/// `DELETE /questions/:id`
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<()>> {
    question::delete_question(&*state.db, id).await?;
    Ok(ApiResponse::message("Question deleted successfully"))
}
