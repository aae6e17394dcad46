/// `git commit` inside the fake terminal
///
/// A commit is really a guestbook comment. The message and optional author
/// are pulled out with a pair of regexes, then handed to a comment store.

use crate::db::{Comment, CommentInput, Database};
use crate::error::{PortfolioError, Result};
use async_trait::async_trait;
use regex::Regex;
use uuid::Uuid;

pub const DEFAULT_AUTHOR: &str = "Guest";
pub const DEFAULT_PREFIX: &str = "feat";

const MESSAGE_PATTERN: &str = r#"-m\s+"([^"]+)""#;
const AUTHOR_PATTERN: &str = r#"--author\s+"([^"]+)""#;

pub const USAGE_ERROR: &str =
    "error: switch `m' requires a value\nusage: git commit -m <msg> [--author <name>]";

/// Where commits end up
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Store a comment. `author` defaults to `Guest`.
    async fn add_comment(&self, message: &str, author: Option<&str>) -> Result<Comment>;

    /// Most recent comments first
    async fn list_comments(&self, limit: i64) -> Result<Vec<Comment>>;
}

#[async_trait]
impl CommentStore for Database {
    async fn add_comment(&self, message: &str, author: Option<&str>) -> Result<Comment> {
        if message.trim().is_empty() {
            return Err(PortfolioError::InvalidInput("empty message".to_string()));
        }

        let input = CommentInput {
            username: author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or(DEFAULT_AUTHOR)
                .to_string(),
            message: message.to_string(),
            hash: short_hash(),
            prefix: DEFAULT_PREFIX.to_string(),
        };

        self.insert_comment(input).await
    }

    async fn list_comments(&self, limit: i64) -> Result<Vec<Comment>> {
        self.get_comments(limit).await
    }
}

/// One-line log of the latest comments
///
/// A store failure is logged and reported in the text, never returned.
pub async fn recent_log(store: &dyn CommentStore, limit: i64) -> String {
    match store.list_comments(limit).await {
        Ok(recent) => {
            let log: Vec<String> = recent.iter().map(|c| c.oneline()).collect();
            format!("Recent commits:\n{}", log.join("\n"))
        }
        Err(e) => {
            tracing::warn!("Failed to refresh commit log: {}", e);
            format!("Could not refresh commit log: {}", e.user_message())
        }
    }
}

/// Seven hex digits, like an abbreviated commit hash
pub fn short_hash() -> String {
    Uuid::new_v4().simple().to_string()[..7].to_string()
}

/// Parsed `git commit` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub message: String,
    pub author: Option<String>,
}

impl CommitRequest {
    /// Output line for a stored commit
    pub fn success_banner(&self, hash: &str) -> String {
        format!(
            "[main {}] {}\n 1 file changed, 1 insertion(+)",
            hash, self.message
        )
    }
}

/// Compiled argument patterns
#[derive(Debug, Clone)]
pub struct CommitParser {
    message: Regex,
    author: Regex,
}

impl CommitParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            message: Regex::new(MESSAGE_PATTERN)?,
            author: Regex::new(AUTHOR_PATTERN)?,
        })
    }

    /// Extract message and author from the raw command line
    ///
    /// # Returns
    /// * `None` - No `-m "<msg>"` was given
    pub fn parse(&self, raw: &str) -> Option<CommitRequest> {
        let message = self.message.captures(raw)?.get(1)?.as_str().to_string();
        let author = self
            .author
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        Some(CommitRequest { message, author })
    }
}
