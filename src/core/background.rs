//! Background template business logic - At most one active template per type.
//!
//! Activation clears the active flag on every template of the type and then sets
//! it on the target. Both writes run in one transaction, so readers never observe
//! zero or two active templates for a type.

use crate::{
    entities::{BackgroundTemplate, TemplateType, background_template},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Input for [`create_template`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    /// Document type, as sent by the client
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    /// Display name
    pub name: String,
    /// Location of the uploaded image
    pub image_url: String,
}

/// Parses a template type received from a client.
///
/// # Errors
/// Returns `Error::Validation` naming the `type` field if it is missing or unknown.
pub fn parse_template_type(raw: Option<&str>) -> Result<TemplateType> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        Error::validation("type", "type is required")
    })?;
    TemplateType::parse(raw).ok_or_else(|| {
        Error::validation(
            "type",
            format!("type must be one of certificate, marksheet, subcenter, got '{raw}'"),
        )
    })
}

/// Creates an inactive template.
///
/// # Errors
/// Returns `Error::Validation` for a missing type, name, or image URL.
#[instrument(skip(db, input))]
pub async fn create_template(
    db: &DatabaseConnection,
    input: NewTemplate,
) -> Result<background_template::Model> {
    let template_type = parse_template_type(input.template_type.as_deref())?;
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "name is required"));
    }
    let image_url = input.image_url.trim();
    if image_url.is_empty() {
        return Err(Error::validation("imageUrl", "imageUrl is required"));
    }

    let now = chrono::Utc::now();
    let created = background_template::ActiveModel {
        template_type: Set(template_type),
        name: Set(name.to_string()),
        image_url: Set(image_url.to_string()),
        is_active: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        template_id = created.id,
        template_type = template_type.as_str(),
        "Background template created"
    );
    Ok(created)
}

/// Lists templates, optionally only those of one type, ordered by id.
pub async fn list_templates(
    db: &DatabaseConnection,
    template_type: Option<TemplateType>,
) -> Result<Vec<background_template::Model>> {
    let mut query = BackgroundTemplate::find();
    if let Some(template_type) = template_type {
        query = query.filter(background_template::Column::TemplateType.eq(template_type));
    }
    query
        .order_by_asc(background_template::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active template of a type, if any.
pub async fn get_active(
    db: &DatabaseConnection,
    template_type: TemplateType,
) -> Result<Option<background_template::Model>> {
    BackgroundTemplate::find()
        .filter(background_template::Column::TemplateType.eq(template_type))
        .filter(background_template::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Makes `template_id` the only active template of `template_type`.
///
/// # Errors
/// - `Error::NotFound` if the template does not exist
/// - `Error::Validation` if the template is of a different type
#[instrument(skip(db))]
pub async fn activate(
    db: &DatabaseConnection,
    template_id: i64,
    template_type: TemplateType,
) -> Result<background_template::Model> {
    let txn = db.begin().await?;

    let target = BackgroundTemplate::find_by_id(template_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("Background template", template_id))?;
    if target.template_type != template_type {
        return Err(Error::validation(
            "type",
            format!(
                "background template {template_id} is a {} template, not {}",
                target.template_type.as_str(),
                template_type.as_str()
            ),
        ));
    }

    let now = chrono::Utc::now();
    let cleared = BackgroundTemplate::update_many()
        .col_expr(background_template::Column::IsActive, Expr::value(false))
        .col_expr(background_template::Column::UpdatedAt, Expr::value(now))
        .filter(background_template::Column::TemplateType.eq(template_type))
        .filter(background_template::Column::IsActive.eq(true))
        .exec(&txn)
        .await?;

    let mut active: background_template::ActiveModel = target.into();
    active.is_active = Set(true);
    active.updated_at = Set(now);
    let activated = active.update(&txn).await?;

    txn.commit().await?;
    info!(
        template_id,
        template_type = template_type.as_str(),
        deactivated = cleared.rows_affected,
        "Background template activated"
    );
    Ok(activated)
}

/// Deletes an inactive template.
///
/// # Errors
/// - `Error::NotFound` if the template does not exist
/// - `Error::BusinessRule` if the template is currently active
#[instrument(skip(db))]
pub async fn delete_template(db: &DatabaseConnection, template_id: i64) -> Result<()> {
    let template = BackgroundTemplate::find_by_id(template_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Background template", template_id))?;

    if template.is_active {
        warn!(template_id, "Refusing to delete active background template");
        return Err(Error::BusinessRule {
            message: format!(
                "Cannot delete active background template '{}'; activate another template first",
                template.name
            ),
        });
    }

    template.delete(db).await?;
    info!(template_id, "Background template deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_parse_template_type() {
        assert_eq!(
            parse_template_type(Some("certificate")).unwrap(),
            TemplateType::Certificate
        );
        assert_eq!(
            parse_template_type(Some(" marksheet ")).unwrap(),
            TemplateType::Marksheet
        );
        assert!(matches!(
            parse_template_type(None),
            Err(Error::Validation { field, .. }) if field == "type"
        ));
        assert!(matches!(
            parse_template_type(Some("poster")),
            Err(Error::Validation { field, .. }) if field == "type"
        ));
    }

    #[tokio::test]
    async fn test_create_template_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_template(
            &db,
            NewTemplate {
                template_type: Some("certificate".to_string()),
                name: " ".to_string(),
                image_url: "https://media.example.com/a.png".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "name"));

        let result = create_template(
            &db,
            NewTemplate {
                template_type: Some("certificate".to_string()),
                name: "Gold".to_string(),
                image_url: String::new(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "imageUrl"));
    }

    #[tokio::test]
    async fn test_activate_leaves_exactly_one_active_per_type() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_template(&db, "certificate", "A").await?;
        let b = create_test_template(&db, "certificate", "B").await?;
        let c = create_test_template(&db, "certificate", "C").await?;
        let sheet = create_test_template(&db, "marksheet", "Sheet").await?;
        activate(&db, sheet.id, TemplateType::Marksheet).await?;

        activate(&db, a.id, TemplateType::Certificate).await?;
        activate(&db, c.id, TemplateType::Certificate).await?;
        let activated = activate(&db, b.id, TemplateType::Certificate).await?;
        assert!(activated.is_active);

        let active: Vec<i64> = list_templates(&db, Some(TemplateType::Certificate))
            .await?
            .into_iter()
            .filter(|t| t.is_active)
            .map(|t| t.id)
            .collect();
        assert_eq!(active, vec![b.id]);

        // Other types are untouched
        let active_sheet = get_active(&db, TemplateType::Marksheet).await?.unwrap();
        assert_eq!(active_sheet.id, sheet.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_activate_already_active_template() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_template(&db, "subcenter", "A").await?;
        activate(&db, a.id, TemplateType::Subcenter).await?;

        let again = activate(&db, a.id, TemplateType::Subcenter).await?;
        assert!(again.is_active);
        assert_eq!(get_active(&db, TemplateType::Subcenter).await?.unwrap().id, a.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_activate_missing_or_mismatched_template() -> Result<()> {
        let db = setup_test_db().await?;
        let current = create_test_template(&db, "certificate", "Current").await?;
        activate(&db, current.id, TemplateType::Certificate).await?;
        let sheet = create_test_template(&db, "marksheet", "Sheet").await?;

        let result = activate(&db, 999, TemplateType::Certificate).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        let result = activate(&db, sheet.id, TemplateType::Certificate).await;
        assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "type"));

        // Failed activations leave the current template active
        let still = get_active(&db, TemplateType::Certificate).await?.unwrap();
        assert_eq!(still.id, current.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_template_guard() -> Result<()> {
        let db = setup_test_db().await?;
        let active = create_test_template(&db, "certificate", "Active").await?;
        let spare = create_test_template(&db, "certificate", "Spare").await?;
        activate(&db, active.id, TemplateType::Certificate).await?;

        let result = delete_template(&db, active.id).await;
        match result {
            Err(Error::BusinessRule { message }) => assert!(message.contains("Active")),
            other => panic!("expected business rule error, got {other:?}"),
        }

        delete_template(&db, spare.id).await?;
        let remaining: Vec<i64> = list_templates(&db, None)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(remaining, vec![active.id]);

        let result = delete_template(&db, spare.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }
}
