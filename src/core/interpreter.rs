/// Terminal command interpreter
///
/// Turns one line of input into a history entry. Everything except the
/// command table's deferred handlers and `git commit` finishes inside
/// `submit`. Those two append a placeholder and hand back a
/// `PendingCommand`; once it has run, `complete` fills in the placeholder
/// with the same id it was created under.

use crate::config::Profile;
use crate::core::commands::{CommandTable, DeferredTask, Invocation};
use crate::core::commit::{CommentStore, CommitParser, CommitRequest, USAGE_ERROR};
use crate::core::directory::{DirectoryTree, ROOT};
use crate::core::events::{EventBus, ShellEvent, NAVIGATION_DELAY, PREVIEW_PATH};
use crate::core::history::{EntryId, History, HistoryEntry};
use crate::error::Result;
use crate::remote::RepoSource;
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const EXECUTING: &str = "Executing...";
pub const COMMITTING: &str = "Committing changes...";

const DEV_SERVER_BANNER: &str = "
> portfolio-frontend@1.0.0 dev
> vite

  VITE v5.0.0  ready in 234 ms

  ➜  Local:   http://localhost:5173/
  ➜  Network: use --host to expose
  ➜  press h to show help

Opening preview...";

const NOT_IN_FRONTEND: &str =
    "npm ERR! This command must be run in the frontend directory.\nTry: cd frontend && npm run dev";

const INSTALL_OUTPUT: &str =
    "added 234 packages in 3.2s\n\n78 packages are looking for funding\n  run `npm fund` for details";

const NO_PACKAGE_JSON: &str = "npm WARN: No package.json found in this directory";

/// What `submit` did with the input
pub enum Dispatch {
    /// Finished; history already reflects the result
    Done,
    /// A placeholder was appended and its output is still coming
    Pending(PendingCommand),
}

impl Dispatch {
    pub fn is_pending(&self) -> bool {
        matches!(self, Dispatch::Pending(_))
    }
}

#[derive(Debug, Clone)]
enum PendingKind {
    Command,
    Commit(CommitRequest),
}

/// Work still outstanding for a placeholder entry
pub struct PendingCommand {
    id: EntryId,
    kind: PendingKind,
    task: DeferredTask,
}

impl PendingCommand {
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Drive the task to completion
    pub async fn run(self) -> Completion {
        let result = self.task.await;
        Completion {
            id: self.id,
            kind: self.kind,
            result,
        }
    }

    /// Run on the current runtime and deliver the result to `done`
    ///
    /// The caller keeps reading input meanwhile and applies whatever comes
    /// out of the channel with `Interpreter::complete`.
    pub fn spawn(self, done: mpsc::UnboundedSender<Completion>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let completion = self.run().await;
            if done.send(completion).is_err() {
                tracing::debug!("Completion receiver gone, dropping result");
            }
        })
    }
}

/// Finished deferred work, ready to apply to the history
pub struct Completion {
    id: EntryId,
    kind: PendingKind,
    result: anyhow::Result<String>,
}

impl Completion {
    pub fn id(&self) -> &EntryId {
        &self.id
    }
}

pub struct Interpreter {
    tree: DirectoryTree,
    commands: CommandTable,
    store: Arc<dyn CommentStore>,
    events: EventBus,
    parser: CommitParser,
    history: History,
    cwd: String,
}

impl Interpreter {
    pub fn new(
        tree: DirectoryTree,
        commands: CommandTable,
        store: Arc<dyn CommentStore>,
        events: EventBus,
    ) -> Result<Self> {
        Ok(Self {
            tree,
            commands,
            store,
            events,
            parser: CommitParser::new()?,
            history: History::with_welcome(),
            cwd: ROOT.to_string(),
        })
    }

    /// Interpreter wired up with the portfolio's tree and commands
    pub fn portfolio(
        profile: Arc<Profile>,
        store: Arc<dyn CommentStore>,
        repos: Arc<dyn RepoSource>,
        events: EventBus,
    ) -> Result<Self> {
        Self::new(
            DirectoryTree::portfolio(),
            CommandTable::portfolio(profile, repos),
            store,
            events,
        )
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn prompt(&self) -> String {
        format!("{} $", self.cwd)
    }

    /// Interpret one line of input
    pub fn submit(&mut self, raw: &str) -> Dispatch {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "" => return Dispatch::Done,
            "clear" => {
                self.history.clear();
                return Dispatch::Done;
            }
            "pwd" => {
                self.history.push(trimmed, self.cwd.clone());
                return Dispatch::Done;
            }
            "ls" => {
                let listing = self.tree.listing(&self.cwd).to_string();
                self.history.push(trimmed, listing);
                return Dispatch::Done;
            }
            "npm run dev" | "npm start" => {
                self.run_dev_server(trimmed);
                return Dispatch::Done;
            }
            "npm install" | "npm i" => {
                let output = if self.in_frontend() {
                    INSTALL_OUTPUT
                } else {
                    NO_PACKAGE_JSON
                };
                self.history.push(trimmed, output);
                return Dispatch::Done;
            }
            _ => {}
        }

        if lower.starts_with("cd ") {
            let target = trimmed.get(3..).unwrap_or("").trim();
            self.change_dir(trimmed, target);
            return Dispatch::Done;
        }

        if let Some(handler) = self.commands.get(&lower) {
            return match handler.invoke() {
                Invocation::Ready(output) => {
                    self.history.push(trimmed, output);
                    Dispatch::Done
                }
                Invocation::Deferred(task) => {
                    let id = self.history.push(trimmed, EXECUTING);
                    Dispatch::Pending(PendingCommand {
                        id,
                        kind: PendingKind::Command,
                        task,
                    })
                }
            };
        }

        if lower.starts_with("git commit") || lower.starts_with("git  commit") {
            return self.commit(trimmed);
        }

        self.history.push(
            trimmed,
            format!(
                "Command not found: {}. Type 'help' for available commands.",
                trimmed
            ),
        );
        Dispatch::Done
    }

    /// Apply a finished deferred command to its placeholder
    ///
    /// # Returns
    /// * The updated entry, or `None` if the placeholder is gone
    pub fn complete(&mut self, completion: Completion) -> Option<&HistoryEntry> {
        let Completion { id, kind, result } = completion;

        let output = match (kind, result) {
            (PendingKind::Command, Ok(output)) => output,
            (PendingKind::Command, Err(e)) => format!("Error: {}", e),
            (PendingKind::Commit(request), Ok(hash)) => {
                self.events.emit(ShellEvent::CommitRecorded);
                request.success_banner(&hash)
            }
            (PendingKind::Commit(_), Err(e)) => {
                tracing::error!("Git commit error: {}", e);
                format!("fatal: could not commit: {}", e)
            }
        };

        if self.history.resolve(&id, output) {
            self.history.get(&id)
        } else {
            tracing::debug!("Entry {} no longer in history, dropping result", id);
            None
        }
    }

    /// Submit and, if needed, wait for the result
    pub async fn execute(&mut self, raw: &str) {
        if let Dispatch::Pending(pending) = self.submit(raw) {
            let completion = pending.run().await;
            self.complete(completion);
        }
    }

    fn in_frontend(&self) -> bool {
        self.cwd.contains("frontend")
    }

    fn change_dir(&mut self, command: &str, target: &str) {
        match self.tree.change_dir(&self.cwd, target) {
            Some(dir) => {
                tracing::debug!("cd {} -> {}", self.cwd, dir);
                self.cwd = dir;
                self.history.push(command, "");
            }
            None => {
                self.history
                    .push(command, format!("cd: no such directory: {}", target));
            }
        }
    }

    fn run_dev_server(&mut self, command: &str) {
        if self.in_frontend() {
            self.history.push(command, DEV_SERVER_BANNER);
            self.events.navigate_after(PREVIEW_PATH, NAVIGATION_DELAY);
        } else {
            self.history.push(command, NOT_IN_FRONTEND);
        }
    }

    fn commit(&mut self, command: &str) -> Dispatch {
        let Some(request) = self.parser.parse(command) else {
            let output = if command.contains("git commit") {
                USAGE_ERROR.to_string()
            } else {
                format!(
                    "git: '{}' is not a git command. See 'git --help'.",
                    command.split(' ').nth(1).unwrap_or("")
                )
            };
            self.history.push(command, output);
            return Dispatch::Done;
        };

        let id = self.history.push(command, COMMITTING);
        let store = Arc::clone(&self.store);
        let message = request.message.clone();
        let author = request.author.clone();

        let task = async move {
            let comment = store.add_comment(&message, author.as_deref()).await?;
            Ok::<_, anyhow::Error>(comment.hash)
        }
        .boxed();

        Dispatch::Pending(PendingCommand {
            id,
            kind: PendingKind::Commit(request),
            task,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Comment, Database};
    use crate::error::PortfolioError;
    use crate::remote::Repository;
    use async_trait::async_trait;
    use std::time::Duration;

    struct NoRepos;

    #[async_trait]
    impl RepoSource for NoRepos {
        async fn fetch_repos(&self, _username: &str) -> Vec<Repository> {
            Vec::new()
        }
    }

    struct FailingStore;

    #[async_trait]
    impl CommentStore for FailingStore {
        async fn add_comment(&self, _message: &str, _author: Option<&str>) -> Result<Comment> {
            Err(PortfolioError::Generic("connection refused".to_string()))
        }

        async fn list_comments(&self, _limit: i64) -> Result<Vec<Comment>> {
            Ok(Vec::new())
        }
    }

    struct HangingStore;

    #[async_trait]
    impl CommentStore for HangingStore {
        async fn add_comment(&self, _message: &str, _author: Option<&str>) -> Result<Comment> {
            std::future::pending().await
        }

        async fn list_comments(&self, _limit: i64) -> Result<Vec<Comment>> {
            std::future::pending().await
        }
    }

    fn interpreter_with(tree: DirectoryTree, store: Arc<dyn CommentStore>) -> Interpreter {
        let profile = Arc::new(Profile::default());
        Interpreter::new(
            tree,
            CommandTable::portfolio(profile, Arc::new(NoRepos)),
            store,
            EventBus::new(),
        )
        .unwrap()
    }

    fn interpreter() -> Interpreter {
        interpreter_with(DirectoryTree::portfolio(), Arc::new(FailingStore))
    }

    fn last_output(interp: &Interpreter) -> &str {
        &interp.history().last().unwrap().output
    }

    #[test]
    fn test_unknown_command() {
        let mut interp = interpreter();
        interp.submit("  frobnicate now  ");

        assert_eq!(
            last_output(&interp),
            "Command not found: frobnicate now. Type 'help' for available commands."
        );
        assert_eq!(interp.cwd(), "~");
    }

    #[test]
    fn test_empty_input_adds_nothing() {
        let mut interp = interpreter();
        let before = interp.history().len();
        interp.submit("   ");
        assert_eq!(interp.history().len(), before);
    }

    #[test]
    fn test_clear() {
        let mut interp = interpreter();
        interp.submit("pwd");
        interp.submit("CLEAR");
        assert!(interp.history().is_empty());
    }

    #[test]
    fn test_cd_dotdot() {
        let mut interp = interpreter();
        interp.submit("cd ..");
        assert_eq!(interp.cwd(), "~");

        interp.submit("cd frontend");
        assert_eq!(interp.cwd(), "~/src/frontend");
        interp.submit("cd ..");
        assert_eq!(interp.cwd(), "~/src");
        interp.submit("cd ../");
        assert_eq!(interp.cwd(), "~");
    }

    #[test]
    fn test_cd_unknown_keeps_dir() {
        let mut interp = interpreter();
        interp.submit("cd src");
        interp.submit("cd Nowhere");

        assert_eq!(interp.cwd(), "~/src");
        assert_eq!(last_output(&interp), "cd: no such directory: Nowhere");
    }

    #[test]
    fn test_ls_follows_cwd() {
        let mut interp = interpreter();
        interp.submit("cd blog");
        interp.submit("ls");
        assert_eq!(last_output(&interp), "hello-world.md");

        interp.submit("cd /");
        interp.submit("ls");
        assert!(last_output(&interp).starts_with("src/"));
    }

    #[test]
    fn test_explicit_path_vs_bare_name() {
        let tree = DirectoryTree::from_entries([("~", "a/\nb/"), ("~/a", "x.txt")]);
        let mut interp = interpreter_with(tree, Arc::new(FailingStore));

        interp.submit("cd a");
        assert_eq!(interp.cwd(), "~");
        assert!(last_output(&interp).contains("a"));

        interp.submit("cd ~/a");
        assert_eq!(interp.cwd(), "~/a");
        interp.submit("pwd");
        assert_eq!(last_output(&interp), "~/a");
    }

    #[test]
    fn test_npm_install() {
        let mut interp = interpreter();
        interp.submit("npm i");
        assert_eq!(last_output(&interp), NO_PACKAGE_JSON);

        interp.submit("cd frontend");
        interp.submit("npm install");
        assert!(last_output(&interp).starts_with("added 234 packages"));
    }

    #[test]
    fn test_npm_run_dev_outside_frontend() {
        let mut interp = interpreter();
        let mut rx = interp.events().subscribe();

        interp.submit("npm run dev");
        assert!(last_output(&interp).starts_with("npm ERR!"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_npm_run_dev_navigates() {
        let mut interp = interpreter();
        let mut rx = interp.events().subscribe();

        interp.submit("cd frontend");
        interp.submit("npm start");
        assert!(last_output(&interp).ends_with("Opening preview..."));

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, ShellEvent::Navigate(PREVIEW_PATH.to_string()));
    }

    #[test]
    fn test_table_commands_are_case_insensitive() {
        let mut interp = interpreter();
        interp.submit("HELP");
        assert!(last_output(&interp).starts_with("Available commands:"));
    }

    #[tokio::test]
    async fn test_deferred_placeholder_then_result() {
        let mut interp = interpreter();

        let Dispatch::Pending(pending) = interp.submit("projects") else {
            panic!("projects should be deferred");
        };
        let id = pending.id().clone();
        assert_eq!(interp.history().get(&id).unwrap().output, EXECUTING);

        let completion = pending.run().await;
        let entry = interp.complete(completion).unwrap();
        assert_eq!(entry.output, "No projects found.");
    }

    #[tokio::test]
    async fn test_overlapping_deferred_resolve_by_id() {
        let mut interp = interpreter();
        interp.commands.deferred("slow", || {
            async { Ok::<_, anyhow::Error>("slow done".to_string()) }.boxed()
        });
        interp.commands.deferred("fails", || {
            async { Err::<String, _>(anyhow::anyhow!("timed out")) }.boxed()
        });

        let Dispatch::Pending(slow) = interp.submit("slow") else {
            panic!("expected pending");
        };
        let Dispatch::Pending(fails) = interp.submit("fails") else {
            panic!("expected pending");
        };
        interp.submit("pwd");

        let slow_id = slow.id().clone();
        let fails_id = fails.id().clone();

        // Finish out of order
        let done = fails.run().await;
        interp.complete(done);
        let done = slow.run().await;
        interp.complete(done);

        assert_eq!(interp.history().get(&slow_id).unwrap().output, "slow done");
        assert_eq!(
            interp.history().get(&fails_id).unwrap().output,
            "Error: timed out"
        );
        assert_eq!(last_output(&interp), "~");
    }

    #[tokio::test]
    async fn test_completion_after_clear_is_dropped() {
        let mut interp = interpreter();
        let Dispatch::Pending(pending) = interp.submit("projects") else {
            panic!("expected pending");
        };
        interp.submit("clear");

        let completion = pending.run().await;
        assert!(interp.complete(completion).is_none());
        assert!(interp.history().is_empty());
    }

    #[test]
    fn test_commit_usage_errors() {
        let mut interp = interpreter();

        let dispatch = interp.submit("git commit");
        assert!(!dispatch.is_pending());
        assert_eq!(last_output(&interp), USAGE_ERROR);

        interp.submit("git  commit -m oops");
        assert_eq!(
            last_output(&interp),
            "git: '' is not a git command. See 'git --help'."
        );
    }

    #[tokio::test]
    async fn test_commit_failure() {
        let mut interp = interpreter();
        let mut rx = interp.events().subscribe();

        let Dispatch::Pending(pending) = interp.submit(r#"git commit -m "fix bug""#) else {
            panic!("commit should be pending");
        };
        assert_eq!(last_output(&interp), COMMITTING);

        let completion = pending.run().await;
        interp.complete(completion);

        assert!(last_output(&interp).starts_with("fatal: could not commit:"));
        assert!(last_output(&interp).contains("connection refused"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_commit_success() {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let mut interp = interpreter_with(DirectoryTree::portfolio(), db.clone());
        let mut rx = interp.events().subscribe();

        interp
            .execute(r#"git commit -m "lovely site" --author "Ada""#)
            .await;

        let output = last_output(&interp).to_string();
        assert!(output.starts_with("[main "));
        assert!(output.contains("] lovely site\n 1 file changed, 1 insertion(+)"));
        assert_eq!(rx.try_recv().unwrap(), ShellEvent::CommitRecorded);

        let log = db.list_comments(10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].username, "Ada");
        assert!(output.contains(&log[0].hash));
    }

    #[tokio::test]
    async fn test_spawned_commit_does_not_block_input() {
        let mut interp = interpreter_with(DirectoryTree::portfolio(), Arc::new(HangingStore));
        interp.commands.deferred("quick", || {
            async { Ok::<_, anyhow::Error>("quick done".to_string()) }.boxed()
        });
        let (tx, mut rx) = mpsc::unbounded_channel();

        let Dispatch::Pending(commit) = interp.submit(r#"git commit -m "hi""#) else {
            panic!("commit should be pending");
        };
        let commit_id = commit.id().clone();
        let hung = commit.spawn(tx.clone());

        // Input is still accepted while the store never answers
        interp.submit("pwd");
        assert_eq!(last_output(&interp), "~");

        let Dispatch::Pending(quick) = interp.submit("quick") else {
            panic!("expected pending");
        };
        let quick_id = quick.id().clone();
        quick.spawn(tx);

        let completion = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(completion.id(), &quick_id);
        interp.complete(completion);

        assert_eq!(interp.history().get(&quick_id).unwrap().output, "quick done");
        assert_eq!(interp.history().get(&commit_id).unwrap().output, COMMITTING);

        hung.abort();
    }
}
