/// Default content seed loading from content.toml
pub mod content;

/// Database configuration and connection management
pub mod database;

/// Server settings from environment variables
pub mod server;
