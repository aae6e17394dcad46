/// Core functionality modules
///
/// The simulated terminal (directory tree, history, command table,
/// interpreter, prompt) and the search over generated documents.

pub mod commands;
pub mod commit;
pub mod content;
pub mod directory;
pub mod events;
pub mod history;
pub mod interpreter;
pub mod prompt;
pub mod searcher;

pub use commands::{CommandHandler, CommandTable};
pub use commit::{recent_log, CommentStore};
pub use content::{DocumentSource, SearchableDocument};
pub use directory::DirectoryTree;
pub use events::{EventBus, ShellEvent};
pub use history::{EntryId, History, HistoryEntry};
pub use interpreter::{Completion, Dispatch, Interpreter, PendingCommand};
pub use prompt::Prompt;
pub use searcher::{FileResult, LineMatch, Searcher};
