/// SQL query functions for database operations
///
/// Comments double as the terminal's commit log, newest first.

use crate::db::models::*;
use crate::db::Database;
use crate::error::{PortfolioError, Result};

/// Default number of comments returned to the log view
pub const DEFAULT_COMMENT_LIMIT: i64 = 50;

impl Database {
    /// Insert a guestbook comment
    ///
    /// # Returns
    /// * `Ok(Comment)` - The stored row, including its id and timestamp
    pub async fn insert_comment(&self, input: CommentInput) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (username, message, hash, prefix)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&input.username)
        .bind(&input.message)
        .bind(&input.hash)
        .bind(&input.prefix)
        .fetch_one(self.pool())
        .await?;

        Ok(comment)
    }

    /// Get the most recent comments
    ///
    /// # Arguments
    /// * `limit` - Maximum number of comments to return
    pub async fn get_comments(&self, limit: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(comments)
    }

    /// Create or replace a blog post
    pub async fn upsert_blog_post(&self, slug: &str, title: &str, content: &str) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO blog_posts (slug, title, content)
            VALUES (?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                title = excluded.title,
                content = excluded.content
            RETURNING id
            "#,
        )
        .bind(slug)
        .bind(title)
        .bind(content)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    /// List blog posts without their bodies, newest first
    pub async fn get_blog_posts(&self) -> Result<Vec<BlogPostSummary>> {
        let posts = sqlx::query_as::<_, BlogPostSummary>(
            "SELECT id, slug, title, created_at FROM blog_posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(posts)
    }

    /// Get a single blog post by slug
    pub async fn get_blog_post(&self, slug: &str) -> Result<BlogPost> {
        sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| PortfolioError::NotFound(slug.to_string()))
    }

    /// Create or replace a skill
    pub async fn upsert_skill(&self, skill: &Skill) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO skills (name, level, status, memory_usage)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                level = excluded.level,
                status = excluded.status,
                memory_usage = excluded.memory_usage
            "#,
        )
        .bind(&skill.name)
        .bind(skill.level)
        .bind(&skill.status)
        .bind(&skill.memory_usage)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get stored skills, strongest first
    pub async fn get_skills(&self) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT name, level, status, memory_usage FROM skills ORDER BY level DESC, name ASC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(skills)
    }
}
