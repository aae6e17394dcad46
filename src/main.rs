// portfolio-term - a portfolio you browse from a fake terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    terminal::{self, Clear, ClearType},
};
use portfolio_term_lib::{
    core::{
        content, recent_log, CommentStore, Completion, Dispatch, Interpreter, Prompt, Searcher,
        ShellEvent,
    },
    db::DEFAULT_COMMENT_LIMIT,
    payload,
    remote::{GitHubClient, RepoSource},
    Database, Profile, Result, Settings,
};
use std::env;
use std::io::{stdout, Stdout, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// How many commits the shell shows after a new one lands
const REFRESH_LOG_LIMIT: i64 = 5;

const KEY_POLL: Duration = Duration::from_millis(50);

/// Everything the handlers need, opened once
struct App {
    profile: Arc<Profile>,
    db: Arc<Database>,
    repos: Arc<dyn RepoSource>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land inside the fake terminal
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("shell");
    let rest = args.get(2..).unwrap_or(&[]);

    match command {
        "version" | "-v" | "--version" => {
            println!("portfolio-term v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "-h" | "--help" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let app = open_app().await?;

    match command {
        "shell" => handle_shell(&app).await,
        "exec" => handle_exec(&app, rest).await,
        "search" => handle_search(&app, rest),
        "log" => handle_log(&app, rest).await,
        "commit" => handle_commit(&app, rest).await,
        "intro" => print_json(&payload::intro(&app.profile)),
        "skills" => {
            let stored = app.db.get_skills().await?;
            print_json(&payload::skills(stored, &app.profile))
        }
        "projects" => {
            let repos = app.repos.fetch_repos(&app.profile.github_username).await;
            print_json(&payload::projects(&repos))
        }
        "comments" => print_json(&payload::comments(
            app.db.list_comments(DEFAULT_COMMENT_LIMIT).await,
        )),
        "blog" => handle_blog(&app, rest).await,
        "readme" => {
            print!("{}", content::readme());
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

async fn open_app() -> Result<App> {
    let settings = Settings::load()?;
    let db = Database::new(&settings.database_path).await?;
    let repos = GitHubClient::new(settings.github_token.clone())?;

    Ok(App {
        profile: Arc::new(settings.profile),
        db: Arc::new(db),
        repos: Arc::new(repos),
    })
}

fn interpreter(app: &App) -> Result<Interpreter> {
    Interpreter::portfolio(
        Arc::clone(&app.profile),
        app.db.clone(),
        Arc::clone(&app.repos),
        Default::default(),
    )
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn handle_exec(app: &App, args: &[String]) -> Result<()> {
    let line = args.join(" ");
    let mut interp = interpreter(app)?;
    let before = interp.history().len();

    interp.execute(&line).await;

    if interp.history().len() > before {
        if let Some(entry) = interp.history().last() {
            if !entry.output.is_empty() {
                println!("{}", entry.output);
            }
        }
    }

    Ok(())
}

fn handle_search(app: &App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        eprintln!("Error: No search query provided");
        return Ok(());
    }

    let query = args.join(" ");
    let results = Searcher::new(app.profile.as_ref().clone()).search(&query);

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    let total: usize = results.iter().map(|r| r.match_count()).sum();
    println!(
        "\n{} result(s) in {} file(s) for '{}':",
        total,
        results.len(),
        query
    );
    println!("{}", "=".repeat(60));
    for file in &results {
        println!("\n{} ({})", file.file, file.match_count());
        for m in &file.matches {
            println!("  {:>4}: {}", m.line, m.content);
        }
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_log(app: &App, args: &[String]) -> Result<()> {
    let limit = args
        .first()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_COMMENT_LIMIT);

    let comments = app.db.list_comments(limit).await?;

    if comments.is_empty() {
        println!("No commits yet. Be the first: git commit -m \"hello\"");
        return Ok(());
    }

    for comment in comments {
        println!("commit {}", comment.hash);
        println!("Author: {}", comment.username);
        println!("Date:   {}", comment.created_at);
        println!("\n    {}: {}\n", comment.prefix, comment.message);
    }

    Ok(())
}

async fn handle_commit(app: &App, args: &[String]) -> Result<()> {
    let mut message_parts = Vec::new();
    let mut author: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--author" => {
                i += 1;
                if i < args.len() {
                    author = Some(args[i].clone());
                }
            }
            "-m" => {}
            arg => message_parts.push(arg.to_string()),
        }
        i += 1;
    }

    if message_parts.is_empty() {
        eprintln!("usage: portfolio-term commit <message> [--author <name>]");
        return Ok(());
    }

    let message = message_parts.join(" ");
    match app.db.add_comment(&message, author.as_deref()).await {
        Ok(comment) => {
            println!("[main {}] {}", comment.hash, comment.message);
            println!(" 1 file changed, 1 insertion(+)");
        }
        Err(e) => eprintln!("fatal: could not commit: {}", e.user_message()),
    }

    Ok(())
}

async fn handle_blog(app: &App, args: &[String]) -> Result<()> {
    if let Some(slug) = args.first() {
        match app.db.get_blog_post(slug).await {
            Ok(post) => {
                println!("# {}\n", post.title);
                println!("{}", post.content);
            }
            Err(e) => eprintln!("{}", e.user_message()),
        }
        return Ok(());
    }

    let posts = app.db.get_blog_posts().await?;
    if posts.is_empty() {
        println!("No posts yet.");
    }
    for post in posts {
        println!("{}  {:<24} {}", post.created_at, post.slug, post.title);
    }

    Ok(())
}

async fn handle_shell(app: &App) -> Result<()> {
    let mut interp = interpreter(app)?;
    let mut events = interp.events().subscribe();
    let mut prompt = Prompt::new();

    terminal::enable_raw_mode()?;
    let result = run_shell(app, &mut interp, &mut prompt, &mut events).await;
    terminal::disable_raw_mode()?;

    println!();
    result
}

async fn run_shell(
    app: &App,
    interp: &mut Interpreter,
    prompt: &mut Prompt,
    events: &mut broadcast::Receiver<ShellEvent>,
) -> Result<()> {
    let mut out = stdout();

    for entry in interp.history().entries() {
        write_block(&mut out, &entry.output)?;
    }
    redraw(&mut out, interp, prompt)?;

    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

    loop {
        while let Ok(completion) = done_rx.try_recv() {
            clear_line(&mut out)?;
            if let Some(entry) = interp.complete(completion) {
                write_block(&mut out, &entry.output)?;
            }
            redraw(&mut out, interp, prompt)?;
        }

        while let Ok(event) = events.try_recv() {
            clear_line(&mut out)?;
            match event {
                ShellEvent::Navigate(path) => {
                    write_block(&mut out, &format!("Preview ready at {}", path))?;
                }
                ShellEvent::CommitRecorded => {
                    let log = recent_log(app.db.as_ref(), REFRESH_LOG_LIMIT).await;
                    write_block(&mut out, &log)?;
                }
            }
            redraw(&mut out, interp, prompt)?;
        }

        if !event::poll(KEY_POLL)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => break,
            KeyCode::Char('d') if ctrl && prompt.input().is_empty() => break,
            KeyCode::Enter => {
                let line = prompt.take();
                write!(out, "\r\n")?;
                run_line(&mut out, interp, &line, &done_tx)?;
            }
            KeyCode::Up => prompt.history_up(&interp.history().commands()),
            KeyCode::Down => prompt.history_down(&interp.history().commands()),
            KeyCode::Tab => {
                prompt.complete();
            }
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Char(c) => prompt.insert(c),
            _ => {}
        }

        redraw(&mut out, interp, prompt)?;
    }

    Ok(())
}

/// Run one submitted line and print whatever it produced
///
/// Deferred work runs in the background; its result arrives on `done`.
fn run_line(
    out: &mut Stdout,
    interp: &mut Interpreter,
    line: &str,
    done: &mpsc::UnboundedSender<Completion>,
) -> Result<()> {
    let before = interp.history().len();

    match interp.submit(line) {
        Dispatch::Done => {
            if interp.history().is_empty() {
                queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            } else if interp.history().len() > before {
                if let Some(entry) = interp.history().last() {
                    write_block(out, &entry.output)?;
                }
            }
        }
        Dispatch::Pending(pending) => {
            if let Some(entry) = interp.history().get(pending.id()) {
                write_block(out, &entry.output)?;
            }
            pending.spawn(done.clone());
        }
    }

    Ok(())
}

/// Print text in raw mode, where `\n` alone doesn't return the cursor
fn write_block(out: &mut Stdout, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    for line in text.split('\n') {
        write!(out, "{}\r\n", line)?;
    }
    Ok(())
}

fn clear_line(out: &mut Stdout) -> Result<()> {
    write!(out, "\r")?;
    queue!(out, Clear(ClearType::CurrentLine))?;
    Ok(())
}

fn redraw(out: &mut Stdout, interp: &Interpreter, prompt: &Prompt) -> Result<()> {
    clear_line(out)?;
    write!(out, "{} {}", interp.prompt(), prompt.input())?;
    out.flush()?;
    Ok(())
}

fn print_usage() {
    println!(
        r#"portfolio-term v{} - A portfolio that lives in a terminal

USAGE:
    portfolio-term [COMMAND] [OPTIONS]

COMMANDS:
    shell                          Open the interactive terminal (default)
    exec <command>                 Run one terminal command and print its output
    search <query>                 Search the portfolio's files
    log [limit]                    Show the guestbook as a commit log
    commit <message> [--author N]  Sign the guestbook
    intro | skills | projects      Print portfolio data as JSON
    comments                       Print the guestbook as JSON
    blog [slug]                    List blog posts or read one
    readme                         Print the README
    version                        Show version
    help                           Show this help

EXAMPLES:
    portfolio-term exec "cd frontend"
    portfolio-term search python
    portfolio-term commit "great site" --author "Ada"

CONFIGURATION:
    Profile file: ~/.portfolio-term/profile.toml (or $PORTFOLIO_CONFIG)
    Environment:  PORTFOLIO_NAME, PORTFOLIO_TITLE, PORTFOLIO_LANGUAGES, ...
    GITHUB_TOKEN enables private repositories in `projects`.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
