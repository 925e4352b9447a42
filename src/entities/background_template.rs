//! Background template entity - Artwork used behind printed certificates,
//! marksheets, and subcenter documents.
//!
//! At most one template per [`TemplateType`] is active. The rule is kept by
//! `core::background`, not by a database constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which printed document a template is used for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    /// Course completion certificate
    #[sea_orm(string_value = "certificate")]
    Certificate,
    /// Exam marksheet
    #[sea_orm(string_value = "marksheet")]
    Marksheet,
    /// Subcenter (franchise) authorization document
    #[sea_orm(string_value = "subcenter")]
    Subcenter,
}

impl TemplateType {
    /// Parses a template type from its wire form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "certificate" => Some(Self::Certificate),
            "marksheet" => Some(Self::Marksheet),
            "subcenter" => Some(Self::Subcenter),
            _ => None,
        }
    }

    /// Wire form of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Certificate => "certificate",
            Self::Marksheet => "marksheet",
            Self::Subcenter => "subcenter",
        }
    }
}

/// Background template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "background_templates")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Document type the template applies to
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    /// Display name
    pub name: String,
    /// Location of the image on the media host
    pub image_url: String,
    /// Whether this is the template in use for its type
    pub is_active: bool,
    /// When the template was created
    pub created_at: DateTimeUtc,
    /// When the template was last modified
    pub updated_at: DateTimeUtc,
}

/// `BackgroundTemplate` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
