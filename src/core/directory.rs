/// Virtual directory tree
///
/// A fixed map of virtual paths to pre-rendered `ls` listings. Nothing here
/// touches the real filesystem.

use std::collections::HashMap;

/// The root alias every path starts from
pub const ROOT: &str = "~";

/// Listing shown for a directory with nothing registered
pub const EMPTY_LISTING: &str = "Empty directory";

const PORTFOLIO_TREE: &[(&str, &str)] = &[
    (
        "~",
        "src/\n├── portfolio/\n├── blog/\n└── frontend/",
    ),
    ("~/src", "portfolio/\nblog/\nfrontend/"),
    (
        "~/src/portfolio",
        "intro.py\nprojects.json\nskills.ts\ncontact.md",
    ),
    ("~/src/blog", "hello-world.md"),
    (
        "~/src/frontend",
        "package.json\nindex.html\nmain.tsx\nApp.tsx\nHome.tsx\nProjects.tsx\nSkills.tsx\nContact.tsx",
    ),
];

/// Static virtual path -> listing map
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    listings: HashMap<String, String>,
}

impl DirectoryTree {
    /// The portfolio's own layout
    pub fn portfolio() -> Self {
        Self::from_entries(PORTFOLIO_TREE.iter().copied())
    }

    /// Build a tree from `(path, listing)` pairs
    ///
    /// A root entry is always present, so the root is a valid starting directory.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut listings: HashMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        listings.entry(ROOT.to_string()).or_default();

        Self { listings }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.listings.contains_key(path)
    }

    /// Listing for `path`, or the empty-directory notice
    pub fn listing(&self, path: &str) -> &str {
        match self.listings.get(path) {
            Some(listing) if !listing.is_empty() => listing,
            _ => EMPTY_LISTING,
        }
    }

    /// Resolve a `cd` target relative to `current`
    ///
    /// Returns the candidate path without checking that it exists.
    pub fn resolve(&self, current: &str, target: &str) -> String {
        match target {
            ".." | "../" => parent_of(current),
            "~" | "/" => ROOT.to_string(),
            "frontend" => {
                if current == ROOT {
                    "~/src/frontend".to_string()
                } else {
                    format!("{}/frontend", current)
                }
            }
            "src" => "~/src".to_string(),
            "portfolio" => "~/src/portfolio".to_string(),
            "blog" => "~/src/blog".to_string(),
            t if t.starts_with("~/") => t.to_string(),
            t if t.starts_with("src/") => format!("~/{}", t),
            t => format!("{}{}", current, t),
        }
    }

    /// Resolve and validate a `cd` target
    ///
    /// # Returns
    /// * `Some(path)` - The new directory
    /// * `None` - The resolved path is not in the tree
    pub fn change_dir(&self, current: &str, target: &str) -> Option<String> {
        let resolved = self.resolve(current, target);
        self.contains(&resolved).then_some(resolved)
    }
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// Drop the last `/` segment, collapsing to the root
fn parent_of(current: &str) -> String {
    if current == ROOT {
        return ROOT.to_string();
    }

    match current.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() && parent.contains('/') => parent.to_string(),
        _ => ROOT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("~"), "~");
        assert_eq!(parent_of("~/src"), "~");
        assert_eq!(parent_of("~/src/frontend"), "~/src");
        assert_eq!(parent_of("~/a/b/c"), "~/a/b");
    }

    #[test]
    fn test_aliases() {
        let tree = DirectoryTree::portfolio();

        assert_eq!(tree.resolve("~", "frontend"), "~/src/frontend");
        assert_eq!(tree.resolve("~/src", "frontend"), "~/src/frontend");
        assert_eq!(tree.resolve("~/src/blog", "portfolio"), "~/src/portfolio");
        assert_eq!(tree.resolve("~/src/blog", "/"), "~");
        assert_eq!(tree.resolve("~", "src/blog"), "~/src/blog");
        assert_eq!(tree.resolve("~", "~/src/blog"), "~/src/blog");
    }

    #[test]
    fn test_fallback_is_literal_concatenation() {
        let tree = DirectoryTree::portfolio();
        assert_eq!(tree.resolve("~", "a"), "~a");
        assert_eq!(tree.resolve("~", "/src"), "~/src");
    }

    #[test]
    fn test_change_dir_validates() {
        let tree = DirectoryTree::portfolio();
        assert_eq!(tree.change_dir("~", "src"), Some("~/src".to_string()));
        assert_eq!(tree.change_dir("~/src/portfolio", "frontend"), None);
    }

    #[test]
    fn test_listing_falls_back() {
        let tree = DirectoryTree::from_entries([("~/empty", "")]);
        assert_eq!(tree.listing("~/empty"), EMPTY_LISTING);
        assert_eq!(tree.listing("~/missing"), EMPTY_LISTING);
        assert!(tree.contains(ROOT));
    }
}
