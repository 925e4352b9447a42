//! Exam paper business logic - Paper management and the activation guard.
//!
//! A paper moves `inactive -> active` only when every subject it lists has at
//! least one question. The check runs on every activation attempt, one count
//! query per subject, before the single status write. Later question deletions
//! are not re-checked, so an active paper can end up with an empty subject.

use crate::{
    core::{
        filters::{ExamPaperFilter, Page, PageRequest},
        question,
    },
    entities::{ExamPaper, ExamPaperSubject, PaperStatus, Question, exam_paper, exam_paper_subject},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// A subject reference supplied when creating a paper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    /// Catalog id of the subject
    pub subject_id: String,
    /// Display name of the subject
    pub name: String,
}

/// Input for [`create_paper`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamPaper {
    /// Display title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Time allowed, in minutes
    pub duration_minutes: i32,
    /// Passing score as a percentage
    pub passing_percentage: f64,
    /// Subjects, in display order
    #[serde(default)]
    pub subjects: Vec<NewSubject>,
}

/// An exam paper together with its ordered subject list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperWithSubjects {
    /// The paper itself
    #[serde(flatten)]
    pub paper: exam_paper::Model,
    /// Subjects in `position` order
    pub subjects: Vec<exam_paper_subject::Model>,
}

fn validate_new_paper(input: &NewExamPaper) -> Result<()> {
    if input.title.trim().is_empty() {
        return Err(Error::validation("title", "title is required"));
    }
    if input.duration_minutes <= 0 {
        return Err(Error::validation(
            "durationMinutes",
            "durationMinutes must be greater than 0",
        ));
    }
    if !input.passing_percentage.is_finite() || !(0.0..=100.0).contains(&input.passing_percentage)
    {
        return Err(Error::validation(
            "passingPercentage",
            "passingPercentage must be between 0 and 100",
        ));
    }

    let mut seen = HashSet::new();
    for (index, subject) in input.subjects.iter().enumerate() {
        if subject.subject_id.trim().is_empty() {
            let field = format!("subjects[{index}].subjectId");
            return Err(Error::validation(&field, format!("{field} is required")));
        }
        if subject.name.trim().is_empty() {
            let field = format!("subjects[{index}].name");
            return Err(Error::validation(&field, format!("{field} is required")));
        }
        if !seen.insert(subject.subject_id.trim()) {
            return Err(Error::validation(
                format!("subjects[{index}].subjectId"),
                format!("subject '{}' is listed more than once", subject.subject_id.trim()),
            ));
        }
    }
    Ok(())
}

/// Creates an inactive paper and its subject list in one transaction.
///
/// # Errors
/// Returns `Error::Validation` for a blank title, non-positive duration, passing
/// percentage outside `0..=100`, blank or duplicate subjects; or a database error.
#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_paper(db: &DatabaseConnection, input: NewExamPaper) -> Result<PaperWithSubjects> {
    validate_new_paper(&input)?;

    let now = chrono::Utc::now();
    let txn = db.begin().await?;

    let paper = exam_paper::ActiveModel {
        title: Set(input.title.trim().to_string()),
        description: Set(input.description.filter(|d| !d.trim().is_empty())),
        duration_minutes: Set(input.duration_minutes),
        passing_percentage: Set(input.passing_percentage),
        status: Set(PaperStatus::Inactive),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut subjects = Vec::with_capacity(input.subjects.len());
    for (position, subject) in (0_i32..).zip(input.subjects) {
        let row = exam_paper_subject::ActiveModel {
            paper_id: Set(paper.id),
            subject_id: Set(subject.subject_id.trim().to_string()),
            subject_name: Set(subject.name.trim().to_string()),
            position: Set(position),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        subjects.push(row);
    }

    txn.commit().await?;
    info!(paper_id = paper.id, subjects = subjects.len(), "Exam paper created");
    Ok(PaperWithSubjects { paper, subjects })
}

/// Lists the subjects of a paper in display order.
pub async fn subjects_for_paper<C>(db: &C, paper_id: i64) -> Result<Vec<exam_paper_subject::Model>>
where
    C: ConnectionTrait,
{
    ExamPaperSubject::find()
        .filter(exam_paper_subject::Column::PaperId.eq(paper_id))
        .order_by_asc(exam_paper_subject::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a paper with its subjects, or `None` if it does not exist.
pub async fn get_paper<C>(db: &C, paper_id: i64) -> Result<Option<PaperWithSubjects>>
where
    C: ConnectionTrait,
{
    let Some(paper) = ExamPaper::find_by_id(paper_id).one(db).await? else {
        return Ok(None);
    };
    let subjects = subjects_for_paper(db, paper_id).await?;
    Ok(Some(PaperWithSubjects { paper, subjects }))
}

/// Lists papers matching `filter`, newest first.
#[instrument(skip(db))]
pub async fn list_papers(
    db: &DatabaseConnection,
    filter: &ExamPaperFilter,
    page: PageRequest,
) -> Result<Page<exam_paper::Model>> {
    let paginator = ExamPaper::find()
        .filter(filter.condition())
        .order_by_desc(exam_paper::Column::CreatedAt)
        .order_by_desc(exam_paper::Column::Id)
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

/// Changes a paper's status, enforcing the activation guard.
///
/// `status` must be `"active"` or `"inactive"`. Moving to active requires every
/// subject on the paper to have at least one question; the first subject without
/// any aborts the change and is named in the error. Deactivation always succeeds
/// for an existing paper.
///
/// # Errors
/// - `Error::Validation` if `status` is not recognized
/// - `Error::NotFound` if the paper does not exist
/// - `Error::BusinessRule` if a subject has no questions
#[instrument(skip(db))]
pub async fn set_status(db: &DatabaseConnection, paper_id: i64, status: &str) -> Result<PaperWithSubjects> {
    let Some(target) = PaperStatus::parse(status) else {
        return Err(Error::validation(
            "status",
            format!("status must be 'active' or 'inactive', got '{status}'"),
        ));
    };

    let paper = ExamPaper::find_by_id(paper_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Exam paper", paper_id))?;
    let subjects = subjects_for_paper(db, paper_id).await?;

    if target == PaperStatus::Active {
        for subject in &subjects {
            let count = question::count_for_subject(db, paper_id, &subject.subject_id).await?;
            if count == 0 {
                warn!(
                    paper_id,
                    subject_id = %subject.subject_id,
                    "Activation blocked: subject has no questions"
                );
                return Err(Error::BusinessRule {
                    message: format!(
                        "Cannot activate exam paper: subject '{}' has no questions",
                        subject.subject_name
                    ),
                });
            }
        }
    }

    let previous = paper.status;
    let mut active: exam_paper::ActiveModel = paper.into();
    active.status = Set(target);
    active.updated_at = Set(chrono::Utc::now());
    let paper = active.update(db).await?;

    info!(
        paper_id,
        from = previous.as_str(),
        to = target.as_str(),
        "Exam paper status changed"
    );
    Ok(PaperWithSubjects { paper, subjects })
}

/// Deletes a paper with its subjects and questions in one transaction.
///
/// # Errors
/// Returns `Error::NotFound` if the paper does not exist, or a database error.
#[instrument(skip(db))]
pub async fn delete_paper(db: &DatabaseConnection, paper_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let paper = ExamPaper::find_by_id(paper_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("Exam paper", paper_id))?;

    let questions = Question::delete_many()
        .filter(crate::entities::question::Column::PaperId.eq(paper_id))
        .exec(&txn)
        .await?;
    ExamPaperSubject::delete_many()
        .filter(exam_paper_subject::Column::PaperId.eq(paper_id))
        .exec(&txn)
        .await?;
    paper.delete(&txn).await?;

    txn.commit().await?;
    info!(
        paper_id,
        questions_removed = questions.rows_affected,
        "Exam paper deleted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_paper_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = paper_input("DCA Final", &[("math", "Mathematics")]);
        input.title = "  ".to_string();
        let result = create_paper(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "title"));

        let mut input = paper_input("DCA Final", &[]);
        input.duration_minutes = 0;
        let result = create_paper(&db, input).await;
        assert!(
            matches!(result, Err(Error::Validation { field, .. }) if field == "durationMinutes")
        );

        let mut input = paper_input("DCA Final", &[]);
        input.passing_percentage = 120.0;
        let result = create_paper(&db, input).await;
        assert!(
            matches!(result, Err(Error::Validation { field, .. }) if field == "passingPercentage")
        );

        let input = paper_input("DCA Final", &[("math", "Mathematics"), ("math", "Maths")]);
        let result = create_paper(&db, input).await;
        assert!(
            matches!(result, Err(Error::Validation { field, .. }) if field == "subjects[1].subjectId")
        );

        let input = paper_input("DCA Final", &[("math", " ")]);
        let result = create_paper(&db, input).await;
        assert!(
            matches!(result, Err(Error::Validation { field, .. }) if field == "subjects[0].name")
        );
    }

    #[tokio::test]
    async fn test_create_paper_keeps_subject_order() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_paper(
            &db,
            paper_input(
                "DCA Final",
                &[("ms-office", "MS Office"), ("math", "Mathematics"), ("web", "HTML")],
            ),
        )
        .await?;

        assert_eq!(created.paper.status, PaperStatus::Inactive);
        assert_eq!(created.paper.passing_percentage, 40.0);

        let fetched = get_paper(&db, created.paper.id).await?.unwrap();
        let names: Vec<&str> = fetched
            .subjects
            .iter()
            .map(|s| s.subject_name.as_str())
            .collect();
        assert_eq!(names, vec!["MS Office", "Mathematics", "HTML"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_activation_succeeds_when_every_subject_has_questions() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(&db, &[("math", "Mathematics"), ("cs", "Computers")]).await?;
        create_test_question(&db, paper.paper.id, "math").await?;
        create_test_question(&db, paper.paper.id, "cs").await?;
        create_test_question(&db, paper.paper.id, "cs").await?;

        let updated = set_status(&db, paper.paper.id, "active").await?;

        assert_eq!(updated.paper.status, PaperStatus::Active);
        assert!(updated.paper.updated_at >= paper.paper.updated_at);
        assert_eq!(updated.subjects.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_activation_blocked_by_subject_without_questions() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(&db, &[("cs", "Computers"), ("math", "Mathematics")]).await?;
        create_test_question(&db, paper.paper.id, "cs").await?;

        let result = set_status(&db, paper.paper.id, "active").await;

        match result {
            Err(Error::BusinessRule { message }) => assert!(message.contains("Mathematics")),
            other => panic!("expected business rule error, got {other:?}"),
        }
        let unchanged = get_paper(&db, paper.paper.id).await?.unwrap();
        assert_eq!(unchanged.paper.status, PaperStatus::Inactive);
        Ok(())
    }

    #[tokio::test]
    async fn test_activation_reports_first_incomplete_subject() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(
            &db,
            &[("cs", "Computers"), ("eng", "English"), ("math", "Mathematics")],
        )
        .await?;
        create_test_question(&db, paper.paper.id, "cs").await?;

        let err = set_status(&db, paper.paper.id, "active").await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("English"));
        assert!(!message.contains("Mathematics"));
        Ok(())
    }

    #[tokio::test]
    async fn test_questions_on_other_papers_do_not_count() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_paper(&db, &[("math", "Mathematics")]).await?;
        let second = create_test_paper(&db, &[("math", "Mathematics")]).await?;
        create_test_question(&db, second.paper.id, "math").await?;

        let result = set_status(&db, first.paper.id, "active").await;
        assert!(matches!(result, Err(Error::BusinessRule { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivation_ignores_question_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(&db, &[("math", "Mathematics")]).await?;
        let question = create_test_question(&db, paper.paper.id, "math").await?;
        set_status(&db, paper.paper.id, "active").await?;

        // Removing the only question leaves an active paper with an empty subject
        question::delete_question(&db, question.id).await?;
        let still_active = get_paper(&db, paper.paper.id).await?.unwrap();
        assert_eq!(still_active.paper.status, PaperStatus::Active);

        let updated = set_status(&db, paper.paper.id, "inactive").await?;
        assert_eq!(updated.paper.status, PaperStatus::Inactive);
        Ok(())
    }

    #[tokio::test]
    async fn test_reactivation_is_revalidated() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(&db, &[("math", "Mathematics")]).await?;
        let question = create_test_question(&db, paper.paper.id, "math").await?;
        set_status(&db, paper.paper.id, "active").await?;
        question::delete_question(&db, question.id).await?;

        let result = set_status(&db, paper.paper.id, "active").await;
        assert!(matches!(result, Err(Error::BusinessRule { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_rejects_unknown_status() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(&db, &[]).await?;

        for status in ["draft", "ACTIVE", ""] {
            let result = set_status(&db, paper.paper.id, status).await;
            assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "status"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_missing_paper() -> Result<()> {
        let db = setup_test_db().await?;
        let result = set_status(&db, 999, "inactive").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_papers_filters_and_paginates() -> Result<()> {
        let db = setup_test_db().await?;
        for title in ["DCA Final", "ADCA Final", "Tally Basics"] {
            create_paper(&db, paper_input(title, &[])).await?;
        }
        let tally = create_paper(&db, paper_input("Tally Advanced", &[])).await?;
        set_status(&db, tally.paper.id, "active").await?;

        let all = list_papers(&db, &ExamPaperFilter::default(), PageRequest::default()).await?;
        assert_eq!(all.total, 4);
        assert_eq!(all.items[0].title, "Tally Advanced");

        let search = ExamPaperFilter {
            status: None,
            search: Some("final".to_string()),
        };
        let found = list_papers(&db, &search, PageRequest::default()).await?;
        assert_eq!(found.total, 2);

        let active = ExamPaperFilter {
            status: Some(PaperStatus::Active),
            search: None,
        };
        let found = list_papers(&db, &active, PageRequest::default()).await?;
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].id, tally.paper.id);

        let second_page = list_papers(
            &db,
            &ExamPaperFilter::default(),
            PageRequest::new(Some(2), Some(3))?,
        )
        .await?;
        assert_eq!(second_page.items.len(), 1);
        assert_eq!(second_page.total_pages, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_papers_search_treats_wildcards_literally() -> Result<()> {
        let db = setup_test_db().await?;
        let underscored = create_paper(&db, paper_input("CCC_2024", &[])).await?;
        create_paper(&db, paper_input("DCA Final", &[])).await?;
        create_paper(&db, paper_input("Tally 100% Pass", &[])).await?;

        let search = |term: &str| ExamPaperFilter {
            status: None,
            search: Some(term.to_string()),
        };

        let found = list_papers(&db, &search("_"), PageRequest::default()).await?;
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].id, underscored.paper.id);

        let found = list_papers(&db, &search("%"), PageRequest::default()).await?;
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].title, "Tally 100% Pass");

        let found = list_papers(&db, &search("!"), PageRequest::default()).await?;
        assert_eq!(found.total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_paper_removes_subjects_and_questions() -> Result<()> {
        let db = setup_test_db().await?;
        let paper = create_test_paper(&db, &[("math", "Mathematics")]).await?;
        create_test_question(&db, paper.paper.id, "math").await?;

        delete_paper(&db, paper.paper.id).await?;

        assert!(get_paper(&db, paper.paper.id).await?.is_none());
        assert_eq!(
            question::count_for_subject(&db, paper.paper.id, "math").await?,
            0
        );
        assert!(subjects_for_paper(&db, paper.paper.id).await?.is_empty());

        let result = delete_paper(&db, paper.paper.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }
}
