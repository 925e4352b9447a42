//! Content entry entity - Editable site content addressed by `(section, key)`.
//!
//! A unique index on `(section, key)` (created in `config::database`) guarantees
//! at most one row per pair. Rows are mutated in place by upserts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Content entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Page or area the entry belongs to (e.g. `"global"`, `"home"`)
    pub section: String,
    /// Key within the section (e.g. `"websiteName"`)
    pub key: String,
    /// Free-form value, often HTML
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When the entry was first written
    pub created_at: DateTimeUtc,
    /// When the value was last overwritten
    pub updated_at: DateTimeUtc,
}

/// Content entries have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
