/// Database module for portfolio-term
///
/// Handles the guestbook, blog posts and stored skills using SQLite and sqlx.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
pub use queries::DEFAULT_COMMENT_LIMIT;
