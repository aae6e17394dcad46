/// Full-text search over generated documents
///
/// Plain case-insensitive substring matching, line by line. Documents are
/// regenerated on every search, so results always reflect the current profile.

use crate::core::content::DocumentSource;
use serde::Serialize;

/// Queries shorter than this match nothing
pub const MIN_QUERY_LEN: usize = 2;

/// A matching line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineMatch {
    pub file: String,
    /// 1-based line number
    pub line: usize,
    /// The line, trimmed for display
    pub content: String,
    /// Character offset of the first match in the untrimmed line
    pub match_index: usize,
}

/// All matching lines of one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    pub file: String,
    pub matches: Vec<LineMatch>,
}

impl FileResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Handles document searching
pub struct Searcher<S> {
    source: S,
}

impl<S: DocumentSource> Searcher<S> {
    /// Create a new searcher instance
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Search every document for `query`
    ///
    /// # Returns
    /// * Documents with at least one matching line, in source order
    pub fn search(&self, query: &str) -> Vec<FileResult> {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let needle = query.to_lowercase();

        self.source
            .documents()
            .into_iter()
            .filter_map(|doc| {
                let matches: Vec<LineMatch> = doc
                    .content
                    .split('\n')
                    .enumerate()
                    .filter_map(|(i, line)| {
                        let lowered = line.to_lowercase();
                        lowered.find(&needle).map(|byte_idx| LineMatch {
                            file: doc.path.clone(),
                            line: i + 1,
                            content: line.trim().to_string(),
                            match_index: lowered[..byte_idx].chars().count(),
                        })
                    })
                    .collect();

                (!matches.is_empty()).then(|| FileResult {
                    file: doc.path,
                    matches,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use crate::core::content::SearchableDocument;

    fn corpus() -> Searcher<Vec<SearchableDocument>> {
        Searcher::new(vec![
            SearchableDocument::new("/a.py", "import os\n  print('Python rocks')\npython = 3"),
            SearchableDocument::new("/b.md", "# Notes\nnothing here"),
            SearchableDocument::new("/c.ts", "const lang = 'python';"),
        ])
    }

    #[test]
    fn test_short_queries_match_nothing() {
        let searcher = corpus();
        assert!(searcher.search("").is_empty());
        assert!(searcher.search("p").is_empty());
        assert!(searcher.search(" p ").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(corpus().search("haskell").is_empty());
    }

    #[test]
    fn test_grouping_and_counts() {
        let results = corpus().search("python");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].file, "/a.py");
        assert_eq!(results[0].match_count(), 2);
        assert_eq!(results[1].file, "/c.ts");
        assert_eq!(results[1].match_count(), 1);

        let total: usize = results.iter().map(FileResult::match_count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_line_details() {
        let results = corpus().search("python");
        let first = &results[0].matches[0];

        assert_eq!(first.line, 2);
        assert_eq!(first.content, "print('Python rocks')");
        assert_eq!(first.match_index, 9);
    }

    #[test]
    fn test_case_insensitive() {
        let searcher = corpus();
        assert_eq!(searcher.search("PYTHON"), searcher.search("python"));
    }

    #[test]
    fn test_profile_documents_are_fresh() {
        let profile = Profile {
            name: "Grace".to_string(),
            ..Default::default()
        };
        let results = Searcher::new(profile).search("grace");

        assert!(results.iter().any(|r| r.file == "/intro.py"));
        assert!(results.iter().any(|r| r.file == "/skills.ts"));
    }

    #[test]
    fn test_static_documents_are_searchable() {
        let searcher = Searcher::new(Profile::default());

        let quote = searcher.search("drucker");
        assert_eq!(quote.len(), 1);
        assert_eq!(quote[0].file, "/contact.md");

        let tailwind = searcher.search("tailwindcss");
        assert_eq!(tailwind.len(), 1);
        assert_eq!(tailwind[0].file, "/frontend/project.json");
        assert_eq!(tailwind[0].matches[0].content, r#""tailwindcss": "3.3.5","#);

        let lucide = searcher.search("lucide-react");
        let files: Vec<&str> = lucide.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(
            files,
            vec![
                "/frontend/Projects.tsx",
                "/frontend/Contact.tsx",
                "/frontend/project.json"
            ]
        );
    }
}
