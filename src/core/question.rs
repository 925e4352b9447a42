//! Question business logic - Multiple-choice questions attached to a paper's subjects.

use crate::{
    core::filters::{Page, PageRequest, QuestionFilter},
    entities::{AnswerOption, ExamPaper, ExamPaperSubject, Question, exam_paper_subject, question},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Input for [`create_question`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    /// Paper the question belongs to
    pub paper_id: i64,
    /// Subject on that paper
    pub subject_id: String,
    /// The question itself
    pub question_text: String,
    /// Option A
    pub option_a: String,
    /// Option B
    pub option_b: String,
    /// Option C
    pub option_c: String,
    /// Option D
    pub option_d: String,
    /// `"A"` to `"D"`
    pub correct_option: String,
}

fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Creates a question after checking the paper exists and lists the subject.
///
/// # Errors
/// - `Error::Validation` for blank text/options, an unknown correct option, or a
///   subject that is not on the paper
/// - `Error::NotFound` if the paper does not exist
#[instrument(skip(db, input), fields(paper_id = input.paper_id, subject_id = %input.subject_id))]
pub async fn create_question(db: &DatabaseConnection, input: NewQuestion) -> Result<question::Model> {
    let subject_id = non_empty("subjectId", &input.subject_id)?;
    let question_text = non_empty("questionText", &input.question_text)?;
    let option_a = non_empty("optionA", &input.option_a)?;
    let option_b = non_empty("optionB", &input.option_b)?;
    let option_c = non_empty("optionC", &input.option_c)?;
    let option_d = non_empty("optionD", &input.option_d)?;
    let correct_option = AnswerOption::parse(&input.correct_option).ok_or_else(|| {
        Error::validation("correctOption", "correctOption must be one of A, B, C, D")
    })?;

    ExamPaper::find_by_id(input.paper_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Exam paper", input.paper_id))?;

    let on_paper = ExamPaperSubject::find()
        .filter(exam_paper_subject::Column::PaperId.eq(input.paper_id))
        .filter(exam_paper_subject::Column::SubjectId.eq(subject_id.as_str()))
        .one(db)
        .await?;
    if on_paper.is_none() {
        return Err(Error::validation(
            "subjectId",
            format!("subject '{subject_id}' is not listed on exam paper {}", input.paper_id),
        ));
    }

    let now = chrono::Utc::now();
    let created = question::ActiveModel {
        paper_id: Set(input.paper_id),
        subject_id: Set(subject_id),
        question_text: Set(question_text),
        option_a: Set(option_a),
        option_b: Set(option_b),
        option_c: Set(option_c),
        option_d: Set(option_d),
        correct_option: Set(correct_option),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(question_id = created.id, "Question created");
    Ok(created)
}

/// Retrieves a question by id.
pub async fn get_question(db: &DatabaseConnection, question_id: i64) -> Result<Option<question::Model>> {
    Question::find_by_id(question_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists questions matching `filter`, in creation order.
pub async fn list_questions(
    db: &DatabaseConnection,
    filter: &QuestionFilter,
    page: PageRequest,
) -> Result<Page<question::Model>> {
    let paginator = Question::find()
        .filter(filter.condition())
        .order_by_asc(question::Column::Id)
        .paginate(db, page.limit);

    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page.index()).await?;

    Ok(Page {
        items,
        total: totals.number_of_items,
        page: page.page,
        limit: page.limit,
        total_pages: totals.number_of_pages,
    })
}

/// Counts the questions of one `(paper, subject)` pair.
pub async fn count_for_subject<C>(db: &C, paper_id: i64, subject_id: &str) -> Result<u64>
where
    C: ConnectionTrait,
{
    Question::find()
        .filter(question::Column::PaperId.eq(paper_id))
        .filter(question::Column::SubjectId.eq(subject_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Deletes a question. The owning paper's status is not re-checked.
///
/// # Errors
/// Returns `Error::NotFound` if the question does not exist, or a database error.
#[instrument(skip(db))]
pub async fn delete_question(db: &DatabaseConnection, question_id: i64) -> Result<()> {
    let result = Question::delete_by_id(question_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Question", question_id));
    }
    info!(question_id, "Question deleted");
    Ok(())
}
