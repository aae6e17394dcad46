/// Terminal history log
///
/// Entries are addressed by a generated id so a deferred command can
/// update its own placeholder no matter what was appended after it.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str =
    "Welcome to Portfolio Terminal. Type 'help' for available commands.";

/// Correlation id for a history entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One command and what it printed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub command: String,
    pub output: String,
}

/// Append-only list of entries
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History opened with the welcome banner
    pub fn with_welcome() -> Self {
        Self {
            entries: vec![HistoryEntry {
                id: EntryId::from("init"),
                command: String::new(),
                output: WELCOME_MESSAGE.to_string(),
            }],
        }
    }

    /// Append an entry under a fresh id
    pub fn push(&mut self, command: impl Into<String>, output: impl Into<String>) -> EntryId {
        let id = EntryId::generate();
        self.push_with_id(id.clone(), command, output);
        id
    }

    pub fn push_with_id(
        &mut self,
        id: EntryId,
        command: impl Into<String>,
        output: impl Into<String>,
    ) {
        self.entries.push(HistoryEntry {
            id,
            command: command.into(),
            output: output.into(),
        });
    }

    /// Replace the output of the entry with `id`
    ///
    /// # Returns
    /// * `true` - The entry was found and updated
    /// * `false` - No such entry (e.g. history was cleared meanwhile)
    pub fn resolve(&mut self, id: &EntryId, output: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| &e.id == id) {
            Some(entry) => {
                entry.output = output.into();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: &EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Submitted commands only, oldest first
    pub fn commands(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.command.is_empty())
            .map(|e| e.command.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut history = History::new();
        let a = history.push("ls", "x");
        let b = history.push("ls", "x");
        assert_ne!(a, b);
    }

    #[test]
    fn test_resolve_targets_by_id() {
        let mut history = History::new();
        let pending = history.push("whoami", "Executing...");
        history.push("pwd", "~");

        assert!(history.resolve(&pending, "done"));
        assert_eq!(history.get(&pending).unwrap().output, "done");
        assert_eq!(history.last().unwrap().output, "~");
    }

    #[test]
    fn test_resolve_after_clear_is_noop() {
        let mut history = History::new();
        let pending = history.push("whoami", "Executing...");
        history.clear();

        assert!(!history.resolve(&pending, "done"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_commands_skip_banner() {
        let mut history = History::with_welcome();
        history.push("ls", "x");
        history.push("pwd", "~");

        assert_eq!(history.commands(), vec!["ls", "pwd"]);
        assert_eq!(history.len(), 3);
    }
}
