/// JSON documents for the portfolio's data feeds
///
/// Same shapes the frontend preview consumes: intro, skills, projects
/// and the guestbook.

use crate::config::Profile;
use crate::db::{Comment, Skill};
use crate::error::Result;
use crate::remote::Repository;
use chrono::Utc;
use serde_json::{json, Value};

pub fn intro(profile: &Profile) -> Value {
    json!({
        "name": profile.name,
        "title": profile.title,
        "bio": profile.bio,
        "location": profile.location,
        "languages": profile.languages,
        "hobbies": profile.hobbies,
        "currentFocus": profile.current_focus,
        "social": {
            "github": profile.github,
            "linkedin": profile.linkedin,
            "instagram": profile.instagram,
            "email": profile.email,
        },
    })
}

/// Skills with levels normalised to 0-1
///
/// Stored skills win when there are any; otherwise they come from the profile.
pub fn skills(stored: Vec<Skill>, profile: &Profile) -> Value {
    let (skills, source) = if stored.is_empty() {
        (profile_skills(profile), "config")
    } else {
        let rows = stored
            .iter()
            .map(|s| skill_json(&s.name, f64::from(s.level) / 100.0, &s.status, &s.memory_usage))
            .collect();
        (rows, "database")
    };

    json!({
        "meta": {
            "total": skills.len(),
            "last_updated": Utc::now().to_rfc3339(),
            "source": source,
        },
        "skills": skills,
    })
}

// Unlike the skills.ts file, the feed has no level floor and defaults
// missing memory usage to Low.
fn profile_skills(profile: &Profile) -> Vec<Value> {
    if !profile.skills_data.is_empty() {
        return profile
            .skills_data
            .iter()
            .map(|s| {
                skill_json(
                    &s.name,
                    f64::from(s.level) / 100.0,
                    s.status.as_deref().unwrap_or("Active"),
                    s.memory_usage.as_deref().unwrap_or("Low"),
                )
            })
            .collect();
    }

    profile
        .languages
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            let level = (95.0 - 5.0 * i as f64) / 100.0;
            let status = if i < 3 { "Stable" } else { "Active" };
            skill_json(lang, level, status, "Low")
        })
        .collect()
}

fn skill_json(name: &str, level: f64, status: &str, memory_usage: &str) -> Value {
    json!({
        "name": name,
        "level": level,
        "status": status,
        "memory_usage": memory_usage,
    })
}

pub fn projects(repos: &[Repository]) -> Value {
    json!({
        "projects": repos,
        "meta": {
            "total": repos.len(),
            "source": "github",
        },
    })
}

/// Guestbook listing; a failed read becomes an empty list plus the error
pub fn comments(result: Result<Vec<Comment>>) -> Value {
    match result {
        Ok(comments) => json!({ "comments": comments, "source": "database" }),
        Err(e) => {
            tracing::error!("Failed to fetch comments: {}", e);
            json!({
                "comments": [],
                "error": e.to_string(),
                "source": "database_error",
            })
        }
    }
}
