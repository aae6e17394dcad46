/// Portfolio configuration
///
/// Personal details come from an optional TOML profile file, overridden by
/// `PORTFOLIO_*` environment variables.

use crate::db::Skill;
use crate::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory under $HOME holding the profile file and database
const APP_DIR: &str = ".portfolio-term";

const PROFILE_FILE: &str = "profile.toml";
const DATABASE_FILE: &str = "portfolio.db";

/// Skill entry as written in config (level is 0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    pub name: String,
    pub level: u32,
    pub status: Option<String>,
    pub memory_usage: Option<String>,
}

/// Everything the portfolio says about its owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub bio: String,
    pub github: String,
    pub github_username: String,
    pub linkedin: String,
    pub instagram: String,
    pub instagram_handle: String,
    pub languages: Vec<String>,
    pub current_focus: String,
    pub hobbies: Vec<String>,
    pub skills_data: Vec<SkillData>,
}

impl Profile {
    /// Skills to display.
    ///
    /// Explicit skills data wins. Otherwise every language becomes a skill
    /// whose level drops by 5 per position, floored at 50.
    pub fn skills(&self) -> Vec<Skill> {
        if !self.skills_data.is_empty() {
            return self
                .skills_data
                .iter()
                .map(|s| Skill {
                    name: s.name.clone(),
                    level: s.level,
                    status: s.status.clone().unwrap_or_else(|| "Active".to_string()),
                    memory_usage: s
                        .memory_usage
                        .clone()
                        .unwrap_or_else(|| "Medium".to_string()),
                })
                .collect();
        }

        self.languages
            .iter()
            .enumerate()
            .map(|(i, lang)| Skill {
                name: lang.clone(),
                level: 95u32.saturating_sub(i as u32 * 5).max(50),
                status: if i < 3 { "Stable" } else { "Active" }.to_string(),
                memory_usage: "Low".to_string(),
            })
            .collect()
    }

    /// Apply environment overrides on top of whatever was loaded so far
    fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, field: &mut String| {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *field = value;
            }
        };

        text("PORTFOLIO_NAME", &mut self.name);
        text("PORTFOLIO_TITLE", &mut self.title);
        text("PORTFOLIO_LOCATION", &mut self.location);
        text("PORTFOLIO_EMAIL", &mut self.email);
        text("PORTFOLIO_BIO", &mut self.bio);
        text("PORTFOLIO_GITHUB", &mut self.github);
        text("PORTFOLIO_GITHUB_USERNAME", &mut self.github_username);
        text("PORTFOLIO_LINKEDIN", &mut self.linkedin);
        text("PORTFOLIO_INSTAGRAM", &mut self.instagram);
        text("PORTFOLIO_INSTAGRAM_HANDLE", &mut self.instagram_handle);
        text("PORTFOLIO_CURRENT_FOCUS", &mut self.current_focus);

        if let Some(list) = lookup("PORTFOLIO_LANGUAGES") {
            self.languages = split_list(&list);
        }
        if let Some(list) = lookup("PORTFOLIO_HOBBIES") {
            self.hobbies = split_list(&list);
        }

        if let Some(json) = lookup("PORTFOLIO_SKILLS_DATA").filter(|v| !v.is_empty()) {
            match serde_json::from_str::<Vec<SkillData>>(&json) {
                Ok(skills) => self.skills_data = skills,
                Err(e) => {
                    // Bad skills data shouldn't take the whole portfolio down
                    tracing::warn!("Failed to parse PORTFOLIO_SKILLS_DATA: {}", e);
                }
            }
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// On-disk profile file layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileFile {
    profile: Profile,
    database_path: Option<PathBuf>,
}

/// Runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub profile: Profile,
    pub database_path: PathBuf,
    pub github_token: Option<String>,
}

impl Settings {
    /// Load settings from the profile file and process environment
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir();
        let lookup = |key: &str| std::env::var(key).ok();

        let file_path = lookup("PORTFOLIO_CONFIG")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|h| h.join(APP_DIR).join(PROFILE_FILE)));

        let file_contents = match file_path {
            Some(path) if path.exists() => {
                tracing::debug!("Loading profile from {}", path.display());
                Some(std::fs::read_to_string(&path)?)
            }
            _ => None,
        };

        Self::from_sources(file_contents.as_deref(), lookup, home.as_deref())
    }

    /// Build settings from explicit sources
    ///
    /// # Arguments
    /// * `file` - Contents of a TOML profile file, if any
    /// * `lookup` - Environment lookup
    /// * `home` - Home directory used for the default database location
    pub fn from_sources<F>(file: Option<&str>, lookup: F, home: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed: ProfileFile = match file {
            Some(contents) => toml::from_str(contents)?,
            None => ProfileFile::default(),
        };

        let mut profile = parsed.profile;
        profile.apply_env(&lookup);

        let database_path = match lookup("PORTFOLIO_DB").or_else(|| {
            parsed
                .database_path
                .map(|p| p.to_string_lossy().into_owned())
        }) {
            Some(path) => PathBuf::from(path),
            None => home
                .map(|h| h.join(APP_DIR).join(DATABASE_FILE))
                .ok_or_else(|| {
                    PortfolioError::Config("Could not determine home directory".to_string())
                })?,
        };

        let github_token = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty());

        Ok(Self {
            profile,
            database_path,
            github_token,
        })
    }
}
