//! Exam paper endpoints, including the status transition.

use crate::{
    api::{
        AppState,
        extract::{IdPath, JsonBody, QueryParams},
        response::ApiResponse,
    },
    core::{
        exam_paper::{self, NewExamPaper, PaperWithSubjects},
        filters::{ExamPaperFilter, Page, PageRequest, QuestionFilter},
        question,
    },
    entities::{PaperStatus, exam_paper as paper_entity, question as question_entity},
    errors::{Error, Result},
};
use axum::extract::State;
use serde::Deserialize;

/// Query for `GET /exam-papers`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    search: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

/// Query for `GET /exam-papers/:id/questions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsQuery {
    subject_id: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
}

/// Body for `PUT /exam-papers/:id/status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    status: Option<String>,
}

/// `GET /exam-papers` - paginated list with optional status and title search.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<ApiResponse<Page<paper_entity::Model>>> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(PaperStatus::parse(raw).ok_or_else(|| {
            Error::validation("status", "status must be 'active' or 'inactive'")
        })?),
    };
    let filter = ExamPaperFilter {
        status,
        search: query.search,
    };
    let page = PageRequest::new(query.page, query.limit)?;
    Ok(ApiResponse::data(
        exam_paper::list_papers(&*state.db, &filter, page).await?,
    ))
}

/// `POST /exam-papers` - create an inactive paper.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewExamPaper>,
) -> Result<ApiResponse<PaperWithSubjects>> {
    Ok(ApiResponse::data(
        exam_paper::create_paper(&*state.db, input).await?,
    ))
}

/// `GET /exam-papers/:id`
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<PaperWithSubjects>> {
    let paper = exam_paper::get_paper(&*state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("Exam paper", id))?;
    Ok(ApiResponse::data(paper))
}

/// `DELETE /exam-papers/:id` - removes the paper with its subjects and questions.
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<()>> {
    exam_paper::delete_paper(&*state.db, id).await?;
    Ok(ApiResponse::message("Exam paper deleted successfully"))
}

/// `PUT /exam-papers/:id/status` - the guarded status transition.
pub async fn set_status(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody<StatusBody>,
) -> Result<ApiResponse<PaperWithSubjects>> {
    let status = body.status.unwrap_or_default();
    Ok(ApiResponse::data(
        exam_paper::set_status(&*state.db, id, &status).await?,
    ))
}

/// `GET /exam-papers/:id/questions` - questions of a paper, optionally one subject.
pub async fn list_questions(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<QuestionsQuery>,
) -> Result<ApiResponse<Page<question_entity::Model>>> {
    exam_paper::get_paper(&*state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("Exam paper", id))?;
    let filter = QuestionFilter {
        paper_id: id,
        subject_id: query.subject_id,
    };
    let page = PageRequest::new(query.page, query.limit)?;
    Ok(ApiResponse::data(
        question::list_questions(&*state.db, &filter, page).await?,
    ))
}
