//! Exam paper subject entity - One subject reference on a paper.
//!
//! `subject_id` is an opaque id owned by the course catalog; `position` keeps
//! the order subjects were listed in when the paper was created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Exam paper subject database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_paper_subjects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Row identifier
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i64,
    /// Paper this subject is listed on
    #[serde(skip)]
    pub paper_id: i64,
    /// Catalog id of the subject
    pub subject_id: String,
    /// Display name of the subject (e.g. "Mathematics")
    pub subject_name: String,
    /// Zero-based order on the paper
    pub position: i32,
}

/// Defines relationships between `ExamPaperSubject` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each subject row belongs to one paper
    #[sea_orm(
        belongs_to = "super::exam_paper::Entity",
        from = "Column::PaperId",
        to = "super::exam_paper::Column::Id"
    )]
    ExamPaper,
}

impl Related<super::exam_paper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamPaper.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
