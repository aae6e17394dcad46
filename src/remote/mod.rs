/// Remote collaborators
///
/// Third-party APIs the portfolio reads from.

pub mod github;

pub use github::{GitHubClient, RepoSource, Repository};
