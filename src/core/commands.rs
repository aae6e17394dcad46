/// Command table for the terminal
///
/// Maps a lowercase command name to what it prints. A handler is either
/// fixed text, a synchronous generator, or a deferred task whose output
/// arrives later.

use crate::config::Profile;
use crate::remote::{RepoSource, Repository};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::Arc;

/// Future produced by a deferred handler
pub type DeferredTask = BoxFuture<'static, anyhow::Result<String>>;

pub const HELP_TEXT: &str = "Available commands:
  cd <path>   - Change directory (e.g., cd frontend)
  ls          - List current directory
  pwd         - Print working directory
  git commit  - Commit changes (git commit -m \"msg\" [--author \"Name\"])
  npm run dev - Run frontend app (when in frontend folder)
  whoami      - About me
  date        - Current date/time
  projects    - My GitHub projects
  clear       - Clear terminal
  skills      - Show my skills
  contact     - Contact information";

pub enum CommandHandler {
    Text(String),
    Generate(Box<dyn Fn() -> String + Send + Sync>),
    Deferred(Box<dyn Fn() -> DeferredTask + Send + Sync>),
}

/// Result of invoking a handler
pub enum Invocation {
    Ready(String),
    Deferred(DeferredTask),
}

impl CommandHandler {
    pub fn invoke(&self) -> Invocation {
        match self {
            CommandHandler::Text(text) => Invocation::Ready(text.clone()),
            CommandHandler::Generate(generate) => Invocation::Ready(generate()),
            CommandHandler::Deferred(start) => Invocation::Deferred(start()),
        }
    }
}

impl std::fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandHandler::Text(text) => f.debug_tuple("Text").field(text).finish(),
            CommandHandler::Generate(_) => f.write_str("Generate(..)"),
            CommandHandler::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[derive(Debug, Default)]
pub struct CommandTable {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The portfolio's built-in commands
    pub fn portfolio(profile: Arc<Profile>, repos: Arc<dyn RepoSource>) -> Self {
        let mut table = Self::new();

        table.text("help", HELP_TEXT);

        let p = Arc::clone(&profile);
        table.generate("whoami", move || whoami(&p));

        table.generate("date", || {
            chrono::Local::now()
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        });

        let p = Arc::clone(&profile);
        table.generate("skills", move || {
            format!(
                "Languages: {}\nCurrent Focus: {}",
                p.languages.join(", "),
                p.current_focus
            )
        });

        let p = Arc::clone(&profile);
        table.generate("contact", move || {
            format!(
                "Email: {}\nGitHub: {}\nLinkedIn: {}\nInstagram: {}",
                p.email, p.github, p.linkedin, p.instagram_handle
            )
        });

        table.deferred("projects", move || {
            let repos = Arc::clone(&repos);
            let username = profile.github_username.clone();
            async move {
                let listing = repos.fetch_repos(&username).await;
                Ok::<_, anyhow::Error>(render_projects(&listing))
            }
            .boxed()
        });

        table
    }

    /// Register a handler; the name is stored lowercase
    pub fn register(&mut self, name: &str, handler: CommandHandler) {
        self.handlers.insert(name.to_lowercase(), handler);
    }

    pub fn text(&mut self, name: &str, text: impl Into<String>) {
        self.register(name, CommandHandler::Text(text.into()));
    }

    pub fn generate<F>(&mut self, name: &str, generate: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.register(name, CommandHandler::Generate(Box::new(generate)));
    }

    pub fn deferred<F>(&mut self, name: &str, start: F)
    where
        F: Fn() -> DeferredTask + Send + Sync + 'static,
    {
        self.register(name, CommandHandler::Deferred(Box::new(start)));
    }

    pub fn get(&self, name: &str) -> Option<&CommandHandler> {
        self.handlers.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn whoami(profile: &Profile) -> String {
    let interests = serde_json::to_string(&profile.hobbies).unwrap_or_default();
    format!(
        "Developer {{\n  name: \"{}\",\n  role: \"{}\",\n  location: \"{}\",\n  interests: {}\n}}",
        profile.name, profile.title, profile.location, interests
    )
}

fn render_projects(repos: &[Repository]) -> String {
    if repos.is_empty() {
        return "No projects found.".to_string();
    }

    repos
        .iter()
        .map(|r| {
            format!(
                "★ {:<4} {} ({}) - {}",
                r.stars, r.name, r.language, r.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
