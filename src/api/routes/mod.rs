//! HTTP handlers organized by resource.

/// Background template endpoints
pub mod backgrounds;
/// Content store endpoints
pub mod content;
/// Exam paper endpoints
pub mod exam_papers;
/// Question endpoints
pub mod questions;
