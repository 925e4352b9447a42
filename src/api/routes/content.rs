//! Content store endpoints.

use crate::{
    api::{
        AppState,
        extract::{JsonBody, QueryParams},
        response::ApiResponse,
    },
    core::content::{self, ContentItem},
    entities::content_entry,
    errors::{Error, Result},
};
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

/// Query for `GET /content`.
#[derive(Debug, Deserialize)]
pub struct SectionQuery {
    section: Option<String>,
}

/// Query for `GET /content/:section/:key`.
#[derive(Debug, Deserialize)]
pub struct DefaultQuery {
    default: Option<String>,
}

/// Body for `POST /content/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    items: Option<Vec<ContentItem>>,
}

/// A single resolved value.
#[derive(Debug, Serialize)]
pub struct ContentValue {
    section: String,
    key: String,
    value: String,
}

/// `GET /content?section=S` - entries of a section sorted by key.
pub async fn list_section(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SectionQuery>,
) -> Result<ApiResponse<Vec<content_entry::Model>>> {
    let section = query
        .section
        .ok_or_else(|| Error::validation("section", "section is required"))?;
    let entries = content::list_section(&*state.db, &section).await?;
    Ok(ApiResponse::data(entries))
}

/// `GET /content/:section/:key?default=D` - one value, or the default if absent.
pub async fn get_value(
    State(state): State<AppState>,
    Path((section, key)): Path<(String, String)>,
    QueryParams(query): QueryParams<DefaultQuery>,
) -> Result<ApiResponse<ContentValue>> {
    let default = query.default.unwrap_or_default();
    let value = content::get_or_default(&*state.db, &section, &key, &default).await?;
    Ok(ApiResponse::data(ContentValue {
        section,
        key,
        value,
    }))
}

/// `POST /content` - upsert one entry.
pub async fn upsert(
    State(state): State<AppState>,
    JsonBody(item): JsonBody<ContentItem>,
) -> Result<ApiResponse<()>> {
    content::upsert(
        &*state.db,
        item.section.as_deref().unwrap_or_default(),
        item.key.as_deref().unwrap_or_default(),
        item.value.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(ApiResponse::message("Content saved successfully"))
}

/// `POST /content/batch` - validate every item, then upsert each.
pub async fn batch_upsert(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BatchBody>,
) -> Result<ApiResponse<Vec<content_entry::Model>>> {
    let items = body.items.unwrap_or_default();
    let entries = content::batch_upsert(&*state.db, &items).await?;
    Ok(ApiResponse::data(entries))
}
