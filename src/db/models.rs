/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Guestbook entry, rendered as a commit in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub username: String,
    pub message: String,
    pub hash: String,
    pub prefix: String,
    pub created_at: String, // ISO 8601 format from SQLite
}

impl Comment {
    /// One-line `git log --oneline` style rendering
    pub fn oneline(&self) -> String {
        format!(
            "{} {}: {} ({})",
            self.hash, self.prefix, self.message, self.username
        )
    }
}

/// Input for adding a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub username: String,
    pub message: String,
    pub hash: String,
    pub prefix: String,
}

/// Full blog post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

/// Blog post listing row (no body)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPostSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub created_at: String,
}

/// A skill with its 0-100 proficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub name: String,
    pub level: u32,
    pub status: String,       // 'Stable', 'Active', 'Experimental'
    pub memory_usage: String, // 'Low', 'Medium', 'High'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_oneline() {
        let comment = Comment {
            id: 1,
            username: "Guest".to_string(),
            message: "love the terminal".to_string(),
            hash: "a1b2c3d".to_string(),
            prefix: "feat".to_string(),
            created_at: "2025-11-25T00:00:00Z".to_string(),
        };

        assert_eq!(comment.oneline(), "a1b2c3d feat: love the terminal (Guest)");
    }

    #[test]
    fn test_skill_serializes_snake_case_fields() {
        let skill = Skill {
            name: "Rust".to_string(),
            level: 90,
            status: "Stable".to_string(),
            memory_usage: "Low".to_string(),
        };

        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["memory_usage"], "Low");
        assert_eq!(json["level"], 90);
    }
}
