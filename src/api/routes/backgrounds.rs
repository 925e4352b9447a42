//! Background template endpoints.

use crate::{
    api::{
        AppState,
        extract::{IdPath, JsonBody, QueryParams},
        response::ApiResponse,
    },
    core::background::{self, NewTemplate, parse_template_type},
    entities::background_template,
    errors::{Error, Result},
};
use axum::extract::State;
use serde::Deserialize;

/// Query carrying an optional template type.
#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    template_type: Option<String>,
}

/// Body for `PUT /backgrounds/:id/activate`.
#[derive(Debug, Deserialize)]
pub struct ActivateBody {
    #[serde(rename = "type")]
    template_type: Option<String>,
}

/// `GET /backgrounds?type=`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TypeQuery>,
) -> Result<ApiResponse<Vec<background_template::Model>>> {
    let template_type = match query.template_type.as_deref() {
        None | Some("") => None,
        raw => Some(parse_template_type(raw)?),
    };
    Ok(ApiResponse::data(
        background::list_templates(&*state.db, template_type).await?,
    ))
}

/// `GET /backgrounds/active?type=` - the active template of a type.
pub async fn active(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TypeQuery>,
) -> Result<ApiResponse<background_template::Model>> {
    let template_type = parse_template_type(query.template_type.as_deref())?;
    let template = background::get_active(&*state.db, template_type)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Active background template",
            id: template_type.as_str().to_string(),
        })?;
    Ok(ApiResponse::data(template))
}

/// `POST /backgrounds` - create an inactive template.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewTemplate>,
) -> Result<ApiResponse<background_template::Model>> {
    Ok(ApiResponse::data(
        background::create_template(&*state.db, input).await?,
    ))
}

/// `PUT /backgrounds/:id/activate` - make this the only active template of its type.
pub async fn activate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody<ActivateBody>,
) -> Result<ApiResponse<background_template::Model>> {
    let template_type = parse_template_type(body.template_type.as_deref())?;
    Ok(ApiResponse::data(
        background::activate(&*state.db, id, template_type).await?,
    ))
}

/// `DELETE /backgrounds/:id` - refused while the template is active.
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<()>> {
    background::delete_template(&*state.db, id).await?;
    Ok(ApiResponse::message("Background template deleted successfully"))
}
