/// Repository listing from the GitHub API
///
/// Failures never reach the caller. They get logged and the listing comes back empty.

use crate::error::{PortfolioError, Result};
use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("portfolio-term/", env!("CARGO_PKG_VERSION"));

/// Upper bound for one listing request, connect included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Org profile repos like `.github` aren't projects
const EXCLUDED_NAME: &str = ".github";

/// Something that can list a user's repositories
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Repositories for `username`, most starred first. Empty on any failure.
    async fn fetch_repos(&self, username: &str) -> Vec<Repository>;
}

/// Repository as the GitHub API returns it
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub private: bool,
}

/// Repository as the portfolio shows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub url: String,
    pub homepage: Option<String>,
    pub topics: Vec<String>,
    pub last_updated: Option<String>,
    pub is_private: bool,
}

impl From<GitHubRepo> for Repository {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            name: repo.name,
            description: repo
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            language: repo.language.unwrap_or_else(|| "Unknown".to_string()),
            stars: repo.stargazers_count,
            url: repo.html_url,
            homepage: repo.homepage.filter(|h| !h.is_empty()),
            topics: repo.topics,
            last_updated: repo.pushed_at,
            is_private: repo.private,
        }
    }
}

/// Drop excluded repos and sort by stars, descending
pub fn rank_repos(repos: Vec<GitHubRepo>) -> Vec<Repository> {
    let mut ranked: Vec<Repository> = repos
        .into_iter()
        .filter(|r| !r.name.contains(EXCLUDED_NAME))
        .map(Repository::from)
        .collect();

    // Stable sort keeps the API's "recently updated" order among equal stars
    ranked.sort_by(|a, b| b.stars.cmp(&a.stars));
    ranked
}

pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_timeout(token, REQUEST_TIMEOUT)
    }

    /// Client whose requests give up after `timeout`
    pub fn with_timeout(token: Option<String>, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: API_BASE.to_string(),
        })
    }

    /// Point the client at another API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request_repos(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        tracing::debug!(
            "Fetching repos for {}. Token present: {}",
            username,
            self.token.is_some()
        );

        // With a token we can see private repos too
        let request = match &self.token {
            Some(token) => self
                .client
                .get(format!("{}/user/repos", self.base_url))
                .query(&[("sort", "updated"), ("per_page", "100"), ("type", "all")])
                .bearer_auth(token),
            None => self
                .client
                .get(format!("{}/users/{}/repos", self.base_url, username))
                .query(&[("sort", "updated"), ("per_page", "20")]),
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(PortfolioError::Generic(format!(
                "GitHub API error: {} {}",
                status, details
            )));
        }

        let repos: Vec<GitHubRepo> = response.json().await?;
        tracing::debug!("Fetched {} repos", repos.len());

        Ok(repos)
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn fetch_repos(&self, username: &str) -> Vec<Repository> {
        if username.is_empty() {
            return Vec::new();
        }

        match self.request_repos(username).await {
            Ok(repos) => rank_repos(repos),
            Err(e) => {
                tracing::error!("Failed to fetch GitHub repos: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u64) -> GitHubRepo {
        GitHubRepo {
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/ada/{}", name),
            homepage: Some(String::new()),
            language: None,
            stargazers_count: stars,
            topics: vec![],
            pushed_at: None,
            private: false,
        }
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let ranked = rank_repos(vec![
            repo("small", 1),
            repo(".github", 100),
            repo("big", 50),
            repo("mid", 10),
        ]);

        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["big", "mid", "small"]);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let ranked = rank_repos(vec![repo("x", 0)]);
        assert_eq!(ranked[0].description, "No description");
        assert_eq!(ranked[0].language, "Unknown");
        assert_eq!(ranked[0].homepage, None);
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"[{
            "id": 1,
            "name": "portfolio",
            "full_name": "ada/portfolio",
            "description": "My site",
            "html_url": "https://github.com/ada/portfolio",
            "homepage": null,
            "language": "Rust",
            "stargazers_count": 7,
            "forks_count": 0,
            "topics": ["cli"],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "pushed_at": "2024-02-01T00:00:00Z",
            "private": false
        }]"#;

        let repos: Vec<GitHubRepo> = serde_json::from_str(json).unwrap();
        let ranked = rank_repos(repos);
        assert_eq!(ranked[0].language, "Rust");
        assert_eq!(ranked[0].topics, vec!["cli"]);
        assert_eq!(ranked[0].last_updated.as_deref(), Some("2024-02-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_empty_username_skips_request() {
        let client = GitHubClient::new(None).unwrap();
        assert!(client.fetch_repos("").await.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_yields_empty() {
        let client = GitHubClient::new(None)
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        assert!(client.fetch_repos("ada").await.is_empty());
    }

    #[tokio::test]
    async fn test_stalled_server_times_out_to_empty() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept connections and never answer
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = GitHubClient::with_timeout(None, Duration::from_millis(200))
            .unwrap()
            .with_base_url(format!("http://{}", addr));

        let repos = tokio::time::timeout(Duration::from_secs(5), client.fetch_repos("ada"))
            .await
            .unwrap();
        assert!(repos.is_empty());

        server.abort();
    }
}
