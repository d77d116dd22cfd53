mod logging;
mod output;
mod theme_file;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use alalfy_client::{BlogApi, Settings, connect};
use alalfy_core::pages::{self, PageFailure, PageState};
use alalfy_core::theme::{Theme, ThemeState};
use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};

use crate::logging::init_logging;
use crate::theme_file::{FileThemeStore, THEME_FILE};

#[derive(Debug, Parser)]
#[command(name = "alalfy", version, about = "Terminal reader for the Alalfy Dev blog")]
struct Cli {
    /// Blog API base URL (overrides ALALFY_API_BASE_URL).
    #[arg(long, global = true)]
    api: Option<String>,

    /// Feed bridge URL (overrides ALALFY_FEED_URL).
    #[arg(long, global = true)]
    feed: Option<String>,

    /// More log output on stderr; repeat for more.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hero, featured and latest posts.
    Home,
    /// Every category with its posts.
    Sections,
    /// One category and its posts.
    Category {
        slug: String,
        /// Print the description as rendered HTML.
        #[arg(long)]
        html: bool,
    },
    /// One post.
    Post {
        slug: String,
        /// Print the body as rendered HTML instead of plain text.
        #[arg(long)]
        html: bool,
    },
    /// Cross-posted articles from the external feed.
    Feed,
    /// Header and footer category links.
    Nav,
    /// Render article HTML locally (stdin when no file is given).
    Render(RenderArgs),
    /// Show or change the persisted colour theme.
    Theme(ThemeArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Input file.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Stop after sanitizing: no code rewrite, no container.
    #[arg(long, conflicts_with = "plain")]
    sanitize_only: bool,

    /// Print visible text only.
    #[arg(long)]
    plain: bool,
}

#[derive(Debug, Args)]
#[group(multiple = false)]
struct ThemeArgs {
    /// Switch to the dark theme.
    #[arg(long)]
    dark: bool,

    /// Switch to the light theme.
    #[arg(long)]
    light: bool,

    /// Flip the current theme.
    #[arg(long)]
    toggle: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(&log_level, cli.verbose)?;

    match cli.command {
        Command::Render(args) => render(&args),
        Command::Theme(args) => theme(&args),
        command => {
            let api = build_api(cli.api, cli.feed)?;
            fetch(&api, command).await
        }
    }
}

async fn fetch(api: &BlogApi, command: Command) -> Result<()> {
    match command {
        Command::Home => {
            let home = ready(pages::load_home(api).await)?;
            output::print_home(&home);
        }
        Command::Sections => {
            let sections = ready(pages::load_category_sections(api).await)?;
            output::print_sections(&sections);
        }
        Command::Category { slug, html } => {
            let page = ready(pages::load_category(api, &slug).await)?;
            output::print_category(&page, html);
        }
        Command::Post { slug, html } => {
            let page = ready(pages::load_post(api, &slug).await)?;
            output::print_post(&page, html);
        }
        Command::Feed => output::print_feed(&pages::load_feed(api).await),
        Command::Nav => output::print_navigation(&pages::load_navigation(api).await),
        Command::Render(_) | Command::Theme(_) => {
            return Err(anyhow!("command does not use the network"));
        }
    }
    Ok(())
}

fn build_api(api: Option<String>, feed: Option<String>) -> Result<BlogApi> {
    let mut settings = Settings::from_env().context("invalid ALALFY_* environment")?;
    if let Some(url) = api {
        settings = settings
            .with_api_base_url(&normalize_server(url))
            .context("invalid --api")?;
    }
    if let Some(url) = feed {
        settings = settings
            .with_feed_url(&normalize_server(url))
            .context("invalid --feed")?;
    }
    connect(&settings).context("failed to build http client")
}

fn normalize_server(server: String) -> String {
    let server = server.trim();
    if server.starts_with("http://") || server.starts_with("https://") {
        return server.to_string();
    }

    format!("https://{server}")
}

/// Unwraps a ready page, or prints the failure screen and fails the command.
fn ready<T>(state: PageState<T>) -> Result<T> {
    match state {
        PageState::Ready(value) => Ok(value),
        PageState::Failed(failure) => {
            output::print_failure(&failure);
            Err(failure_error(&failure))
        }
        PageState::Loading => Err(anyhow!("page is still loading")),
    }
}

fn failure_error(failure: &PageFailure) -> anyhow::Error {
    anyhow!("{:?}: {}", failure.kind, failure.message)
}

fn render(args: &RenderArgs) -> Result<()> {
    let html = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let out = if args.plain {
        alalfy_render::to_plain_text(&html)
    } else if args.sanitize_only {
        alalfy_render::sanitize_html(&html)
    } else {
        alalfy_render::render_html(&html)
    };
    println!("{out}");
    Ok(())
}

fn theme(args: &ThemeArgs) -> Result<()> {
    let mut state = ThemeState::init(FileThemeStore::new(THEME_FILE), false);

    let requested = if args.dark {
        Some(Theme::Dark)
    } else if args.light {
        Some(Theme::Light)
    } else {
        None
    };

    if let Some(theme) = requested {
        state.set(theme).context("failed to save theme")?;
    } else if args.toggle {
        state.toggle().context("failed to save theme")?;
    }

    println!("{}", state.current());
    Ok(())
}

#[cfg(test)]
mod tests {
    use alalfy_core::pages::FailureKind;

    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("http://127.0.0.1:8080/api".to_string());
        assert_eq!(s, "http://127.0.0.1:8080/api");
    }

    #[test]
    fn normalize_server_adds_https_scheme() {
        let s = normalize_server(" blog-backend.alalfy.com/api ".to_string());
        assert_eq!(s, "https://blog-backend.alalfy.com/api");
    }

    #[test]
    fn ready_passes_value_through() {
        let value = ready(PageState::Ready(7)).expect("ready page");
        assert_eq!(value, 7);
    }

    #[test]
    fn ready_turns_failure_into_error() {
        let err = ready::<()>(PageState::Failed(PageFailure {
            kind: FailureKind::NotFound,
            title: "t",
            message: "gone",
        }))
        .expect_err("failed page");
        assert_eq!(err.to_string(), "NotFound: gone");
    }

    #[test]
    fn cli_parses_post_with_html_flag() {
        let cli = Cli::try_parse_from([
            "alalfy",
            "--api",
            "localhost:9000/api",
            "post",
            "hello",
            "--html",
        ])
        .expect("args must parse");
        assert_eq!(cli.api.as_deref(), Some("localhost:9000/api"));
        assert!(matches!(cli.command, Command::Post { ref slug, html: true } if slug == "hello"));
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["alalfy", "feed", "-vv"]).expect("args must parse");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn theme_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["alalfy", "theme", "--dark", "--light"]).is_err());
        assert!(Cli::try_parse_from(["alalfy", "theme", "--toggle"]).is_ok());
    }
}
