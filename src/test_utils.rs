//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        background::{self, NewTemplate},
        exam_paper::{self, NewExamPaper, NewSubject, PaperWithSubjects},
        question::{self, NewQuestion},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds paper input with the given `(subject_id, name)` pairs.
///
/// # Defaults
/// * `duration_minutes`: 60
/// * `passing_percentage`: 40.0
pub fn paper_input(title: &str, subjects: &[(&str, &str)]) -> NewExamPaper {
    NewExamPaper {
        title: title.to_string(),
        description: None,
        duration_minutes: 60,
        passing_percentage: 40.0,
        subjects: subjects
            .iter()
            .map(|(subject_id, name)| NewSubject {
                subject_id: (*subject_id).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
    }
}

/// Creates an inactive test paper listing the given `(subject_id, name)` pairs.
pub async fn create_test_paper(
    db: &DatabaseConnection,
    subjects: &[(&str, &str)],
) -> Result<PaperWithSubjects> {
    exam_paper::create_paper(db, paper_input("Test Paper", subjects)).await
}

/// Builds question input for `(paper_id, subject_id)` with option A correct.
pub fn question_input(paper_id: i64, subject_id: &str) -> NewQuestion {
    NewQuestion {
        paper_id,
        subject_id: subject_id.to_string(),
        question_text: "What does CPU stand for?".to_string(),
        option_a: "Central Processing Unit".to_string(),
        option_b: "Computer Personal Unit".to_string(),
        option_c: "Central Print Utility".to_string(),
        option_d: "Control Program Unit".to_string(),
        correct_option: "A".to_string(),
    }
}

/// Creates a test question for `(paper_id, subject_id)`.
pub async fn create_test_question(
    db: &DatabaseConnection,
    paper_id: i64,
    subject_id: &str,
) -> Result<entities::question::Model> {
    question::create_question(db, question_input(paper_id, subject_id)).await
}

/// Creates an inactive test template of `template_type`.
pub async fn create_test_template(
    db: &DatabaseConnection,
    template_type: &str,
    name: &str,
) -> Result<entities::background_template::Model> {
    background::create_template(
        db,
        NewTemplate {
            template_type: Some(template_type.to_string()),
            name: name.to_string(),
            image_url: format!("https://media.example.com/{name}.png"),
        },
    )
    .await
}
