//! Core business logic - framework-agnostic operations over the database.
//!
//! Every function takes a database connection and returns [`crate::errors::Result`].
//! Nothing in here knows about HTTP.

/// Background template exclusive activation
pub mod background;
/// Section/key content store
pub mod content;
/// Exam papers and the activation guard
pub mod exam_paper;
/// Typed list filters and pagination
pub mod filters;
/// Questions attached to `(paper, subject)` pairs
pub mod question;
