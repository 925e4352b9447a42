//! Exam paper entity - A paper with a status and an ordered list of subjects.
//!
//! The subject list lives in `exam_paper_subjects`; questions reference the
//! paper through `questions.paper_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an exam paper.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    /// Not available to students; questions may still be edited
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Available to students
    #[sea_orm(string_value = "active")]
    Active,
}

impl PaperStatus {
    /// Parses a status from its wire form. Only `"active"` and `"inactive"` are recognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Wire form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Exam paper database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_papers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the paper
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display title (e.g. "DCA Final Exam")
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Time allowed, in minutes
    pub duration_minutes: i32,
    /// Minimum score, as a percentage, needed to pass
    pub passing_percentage: f64,
    /// Current lifecycle status
    pub status: PaperStatus,
    /// When the paper was created
    pub created_at: DateTimeUtc,
    /// When the paper was last modified (including status changes)
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `ExamPaper` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One paper lists many subjects
    #[sea_orm(has_many = "super::exam_paper_subject::Entity")]
    Subjects,
    /// One paper has many questions
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,
}

impl Related<super::exam_paper_subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
