//! Question entity - A multiple-choice question for one `(paper, subject)` pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The option marked as the correct answer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AnswerOption {
    /// First option
    #[sea_orm(string_value = "A")]
    A,
    /// Second option
    #[sea_orm(string_value = "B")]
    B,
    /// Third option
    #[sea_orm(string_value = "C")]
    C,
    /// Fourth option
    #[sea_orm(string_value = "D")]
    D,
}

impl AnswerOption {
    /// Parses `A`-`D`, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }
}

/// Question database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the question
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Paper the question belongs to
    pub paper_id: i64,
    /// Subject (on that paper) the question belongs to
    pub subject_id: String,
    /// The question itself
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    /// Option A
    pub option_a: String,
    /// Option B
    pub option_b: String,
    /// Option C
    pub option_c: String,
    /// Option D
    pub option_d: String,
    /// Which option is correct
    pub correct_option: AnswerOption,
    /// When the question was created
    pub created_at: DateTimeUtc,
    /// When the question was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Question and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each question belongs to one paper
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
