//! Content store business logic - Editable site content keyed by `(section, key)`.
//!
//! Writes go through a single `INSERT .. ON CONFLICT(section, key) DO UPDATE`
//! statement, so concurrent upserts of the same pair can never create a second row.
//! Batch upserts validate every item before the first write, then write each item
//! independently; a storage failure midway leaves the earlier items written.

use crate::{
    config::content::SeedEntry,
    entities::{ContentEntry, content_entry},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// One item of a batch upsert as received from a client. Fields are optional so
/// that missing ones surface as validation errors naming the item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContentItem {
    /// Section of the entry
    pub section: Option<String>,
    /// Key within the section
    pub key: Option<String>,
    /// New value; absent means empty string
    pub value: Option<String>,
}

fn required(field: &str, raw: Option<&str>) -> Result<String> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::validation(field, format!("{field} is required"))),
    }
}

/// Retrieves the stored value for `(section, key)`, or `None` if absent.
#[instrument(skip(db))]
pub async fn get<C>(db: &C, section: &str, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    Ok(find_entry(db, section, key).await?.map(|entry| entry.value))
}

/// Retrieves the stored value for `(section, key)`, or `default` if absent.
pub async fn get_or_default<C>(db: &C, section: &str, key: &str, default: &str) -> Result<String>
where
    C: ConnectionTrait,
{
    let value = get(db, section, key).await?;
    debug!(section, key, found = value.is_some(), "Content lookup");
    Ok(value.unwrap_or_else(|| default.to_string()))
}

/// Retrieves the full entry for `(section, key)`. The address is trimmed as on writes.
pub async fn find_entry<C>(db: &C, section: &str, key: &str) -> Result<Option<content_entry::Model>>
where
    C: ConnectionTrait,
{
    ContentEntry::find()
        .filter(content_entry::Column::Section.eq(section.trim()))
        .filter(content_entry::Column::Key.eq(key.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every entry of a section, sorted by key.
///
/// # Errors
/// Returns `Error::Validation` if `section` is blank, or a database error.
#[instrument(skip(db))]
pub async fn list_section<C>(db: &C, section: &str) -> Result<Vec<content_entry::Model>>
where
    C: ConnectionTrait,
{
    let section = required("section", Some(section))?;
    ContentEntry::find()
        .filter(content_entry::Column::Section.eq(section))
        .order_by_asc(content_entry::Column::Key)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates the entry if absent, otherwise overwrites its value. Last write wins.
///
/// `section` and `key` are trimmed; the value is stored as given.
///
/// # Errors
/// Returns `Error::Validation` if `section` or `key` is blank, or a database error.
#[instrument(skip(db, value))]
pub async fn upsert<C>(db: &C, section: &str, key: &str, value: &str) -> Result<content_entry::Model>
where
    C: ConnectionTrait,
{
    let section = required("section", Some(section))?;
    let key = required("key", Some(key))?;
    write_entry(db, &section, &key, value).await
}

async fn write_entry<C>(db: &C, section: &str, key: &str, value: &str) -> Result<content_entry::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();
    let entry = content_entry::ActiveModel {
        section: Set(section.to_string()),
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    ContentEntry::insert(entry)
        .on_conflict(
            OnConflict::columns([content_entry::Column::Section, content_entry::Column::Key])
                .update_columns([content_entry::Column::Value, content_entry::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let stored = find_entry(db, section, key).await?.ok_or_else(|| {
        Error::Database(DbErr::RecordNotFound(format!(
            "content entry {section}/{key} missing after upsert"
        )))
    })?;
    info!(section, key, id = stored.id, "Content entry upserted");
    Ok(stored)
}

/// Validates every item, then upserts them one by one in order.
///
/// Validation is all-or-nothing: an empty batch, or any item lacking `section` or
/// `key`, fails before anything is written. There is no transaction around the
/// writes themselves.
///
/// # Errors
/// Returns `Error::Validation` naming the first bad item and field, or a database error.
#[instrument(skip(db, items), fields(count = items.len()))]
pub async fn batch_upsert<C>(db: &C, items: &[ContentItem]) -> Result<Vec<content_entry::Model>>
where
    C: ConnectionTrait,
{
    if items.is_empty() {
        return Err(Error::validation("items", "items must be a non-empty array"));
    }

    let validated = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let section = required(&format!("items[{index}].section"), item.section.as_deref())?;
            let key = required(&format!("items[{index}].key"), item.key.as_deref())?;
            Ok((section, key, item.value.clone().unwrap_or_default()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::with_capacity(validated.len());
    for (section, key, value) in &validated {
        results.push(write_entry(db, section, key, value).await?);
    }
    info!("Batch upserted {} content entries", results.len());
    Ok(results)
}

/// Inserts seed entries whose `(section, key)` does not exist yet. Existing values
/// are left untouched. Returns the number of entries inserted.
#[instrument(skip(db, entries), fields(count = entries.len()))]
pub async fn seed_defaults<C>(db: &C, entries: &[SeedEntry]) -> Result<u64>
where
    C: ConnectionTrait,
{
    let mut inserted = 0;
    for seed in entries {
        let section = required("section", Some(seed.section.as_str()))?;
        let key = required("key", Some(seed.key.as_str()))?;
        let now = chrono::Utc::now();
        let entry = content_entry::ActiveModel {
            section: Set(section),
            key: Set(key),
            value: Set(seed.value.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        inserted += ContentEntry::insert(entry)
            .on_conflict(
                OnConflict::columns([content_entry::Column::Section, content_entry::Column::Key])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }
    info!("Seeded {inserted} default content entries");
    Ok(inserted)
}
