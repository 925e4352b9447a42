//! Database configuration module.
//!
//! This module handles the `SQLite` connection bootstrap and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust structs. The composite unique index on
//! content entries is created here as well, since the upsert relies on it.

use crate::entities::{
    BackgroundTemplate, ContentEntry, ContentEntryColumn, ExamPaper, ExamPaperSubject,
    ExamPaperSubjectColumn, Question, QuestionColumn,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::{info, warn};

/// Default database location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/institute.sqlite?mode=rwc";

/// Connects to the database, retrying forever with a fixed delay until it succeeds.
///
/// This is the only place in the service that retries. Every failed attempt is logged
/// with the driver's error and the attempt number.
pub async fn connect_with_retry(database_url: &str, retry_delay: Duration) -> DatabaseConnection {
    let mut attempt: u64 = 1;
    loop {
        match Database::connect(database_url).await {
            Ok(db) => {
                info!(attempt, "Connected to database");
                return db;
            }
            Err(e) => {
                warn!(
                    attempt,
                    "Database connection failed: {e}. Retrying in {}ms",
                    retry_delay.as_millis()
                );
                attempt += 1;
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}

/// Creates all tables and indexes if they do not exist yet.
///
/// Safe to run on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut tables = [
        schema.create_table_from_entity(ContentEntry),
        schema.create_table_from_entity(ExamPaper),
        schema.create_table_from_entity(ExamPaperSubject),
        schema.create_table_from_entity(Question),
        schema.create_table_from_entity(BackgroundTemplate),
    ];
    for table in &mut tables {
        table.if_not_exists();
        db.execute(builder.build(&*table)).await?;
    }

    let indexes = [
        Index::create()
            .name("idx_content_entries_section_key")
            .table(ContentEntry)
            .col(ContentEntryColumn::Section)
            .col(ContentEntryColumn::Key)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_exam_paper_subjects_paper_subject")
            .table(ExamPaperSubject)
            .col(ExamPaperSubjectColumn::PaperId)
            .col(ExamPaperSubjectColumn::SubjectId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_questions_paper_subject")
            .table(Question)
            .col(QuestionColumn::PaperId)
            .col(QuestionColumn::SubjectId)
            .if_not_exists()
            .to_owned(),
    ];
    for index in &indexes {
        db.execute(builder.build(index)).await?;
    }

    info!("Database tables ensured");
    Ok(())
}
