//! Typed list filters and pagination.
//!
//! Each filter struct enumerates the fields a listing can be narrowed by and
//! builds its own `Condition`. Unknown query parameters never reach the
//! database.

use crate::{
    entities::{ExamPaperColumn, PaperStatus, QuestionColumn},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, Condition, sea_query::LikeExpr};
use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Items per page
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validates optional page/limit values, applying defaults for missing ones.
    ///
    /// # Errors
    /// Returns `Error::Validation` if `page` is zero or too large to address a row,
    /// or if `limit` is outside `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Result<Self> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if page == 0 {
            return Err(Error::validation("page", "page must be 1 or greater"));
        }
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(Error::validation(
                "limit",
                format!("limit must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        // The row offset must fit the database's signed 64-bit OFFSET
        let offset_fits = (page - 1)
            .checked_mul(limit)
            .is_some_and(|offset| i64::try_from(offset).is_ok());
        if !offset_fits {
            return Err(Error::validation("page", "page is out of range"));
        }
        Ok(Self { page, limit })
    }

    /// Zero-based page index as used by `Paginator::fetch_page`.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.page - 1
    }
}

/// One page of results plus the totals needed to render pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total items across all pages
    pub total: u64,
    /// 1-based page number
    pub page: u64,
    /// Items per page
    pub limit: u64,
    /// Number of pages
    pub total_pages: u64,
}

/// Filter for exam paper listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamPaperFilter {
    /// Only papers in this status
    pub status: Option<PaperStatus>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl ExamPaperFilter {
    /// Builds the `WHERE` condition for this filter. Blank search strings are ignored.
    #[must_use]
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(status) = self.status {
            condition = condition.add(ExamPaperColumn::Status.eq(status));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(ExamPaperColumn::Title.like(contains_pattern(search)));
        }
        condition
    }
}

/// Escape character used in title search patterns.
const LIKE_ESCAPE: char = '!';

/// `LIKE` pattern matching `needle` anywhere, with `%`, `_` and `!` taken literally.
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

/// Filter for question listings. Questions are always listed per paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Paper whose questions are listed
    pub paper_id: i64,
    /// Only questions for this subject
    pub subject_id: Option<String>,
}

impl QuestionFilter {
    /// Filter matching every question of `paper_id`.
    #[must_use]
    pub const fn for_paper(paper_id: i64) -> Self {
        Self {
            paper_id,
            subject_id: None,
        }
    }

    /// Builds the `WHERE` condition for this filter.
    #[must_use]
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(QuestionColumn::PaperId.eq(self.paper_id));
        if let Some(subject_id) = self.subject_id.as_deref().filter(|s| !s.trim().is_empty()) {
            condition = condition.add(QuestionColumn::SubjectId.eq(subject_id));
        }
        condition
    }
}
