//! Terminal client for the assistant service.
//!
//! `chatbot chat` opens an interactive conversation; the other subcommands are
//! one-shot calls that print JSON, suitable for scripts.

mod backend;
mod repl;
mod store;
mod terminal;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use chatbot::admin::AdminConsole;
use chatbot::config::{Position, Theme};
use chatbot::engine::FALLBACK_REPLY;
use chatbot::store::StoreError;
use chatbot::{ChatApp, ClientError, ConfigPatch, ConfigStore, SendRejected, Surface, TransportClient};

use crate::backend::ReqwestBackend;
use crate::store::FileStore;
use crate::terminal::TerminalPresenter;

/// Base URL used when neither a flag nor an absolute saved setting applies.
pub const DEFAULT_CLI_API_BASE: &str = "http://127.0.0.1:5000/api";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no config directory; pass --config-dir or set CHATBOT_CONFIG_DIR")]
    NoConfigDir,
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("message not sent: {0}")]
    Rejected(#[from] SendRejected),
    #[error("the assistant could not answer")]
    NoReply,
    #[error("settings not saved: {0}")]
    Store(#[from] StoreError),
    #[error("invalid value for {field}: `{value}`")]
    InvalidSetting { field: &'static str, value: String },
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("{0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chatbot", about = "Chat with the assistant and manage its knowledge base")]
struct Cli {
    /// API base URL; overrides the saved setting for this run.
    #[arg(long, env = "CHATBOT_API_BASE")]
    api_base: Option<String>,

    /// Directory holding saved settings.
    #[arg(long, env = "CHATBOT_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Log debug output to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open an interactive chat, or send a single message with --message.
    Chat {
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Show the server status report.
    Status,
    /// Show knowledge-base statistics.
    Stats,
    /// Upload a PDF, DOCX, or TXT document to the knowledge base.
    Upload { path: PathBuf },
    Config(ConfigCommand),
    Projects(ProjectsCommand),
}

#[derive(Args, Debug)]
struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    /// Print the effective settings.
    Show,
    /// Change and save settings.
    Set(ConfigSetArgs),
}

#[derive(Args, Debug, Default)]
struct ConfigSetArgs {
    #[arg(long = "base")]
    api_base: Option<String>,
    #[arg(long)]
    max_results: Option<u32>,
    #[arg(long)]
    theme: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    welcome_text: Option<String>,
    #[arg(long)]
    placeholder_text: Option<String>,
}

#[derive(Args, Debug)]
struct ProjectsCommand {
    #[command(subcommand)]
    command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectsSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
    },
    Delete {
        id: String,
    },
    /// Start scraping the project's website.
    Scrape {
        id: String,
    },
}

struct CliContext {
    config_dir: PathBuf,
    api_base: Option<String>,
    timeout: Duration,
}

impl CliContext {
    fn store(&self) -> FileStore {
        FileStore::new(&self.config_dir)
    }

    fn backend(&self) -> Result<ReqwestBackend, CliError> {
        Ok(ReqwestBackend::new(self.timeout)?)
    }

    /// Settings with the run's API base applied in memory.
    fn config(&self) -> ConfigStore<FileStore> {
        let config = ConfigStore::load(self.store());
        config.apply(&self.base_override(&config.current().api_base));
        config
    }

    fn base_override(&self, saved: &str) -> ConfigPatch {
        ConfigPatch { api_base: Some(effective_api_base(self.api_base.as_deref(), saved)), ..ConfigPatch::default() }
    }

    fn transport(&self) -> Result<TransportClient<ReqwestBackend>, CliError> {
        Ok(TransportClient::new(self.backend()?, self.config().handle()))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = cli.config_dir.or_else(FileStore::default_dir).ok_or(CliError::NoConfigDir)?;
    let ctx = CliContext { config_dir, api_base: cli.api_base, timeout: Duration::from_secs(cli.timeout_secs) };

    match cli.command {
        Command::Chat { message: Some(text) } => run_ask(&ctx, &text).await,
        Command::Chat { message: None } => run_chat(&ctx).await,
        Command::Status => print_json(&ctx.transport()?.get_status().await?),
        Command::Stats => print_json(&ctx.transport()?.get_knowledge_base_stats().await?),
        Command::Upload { path } => {
            let document = repl::read_document(&path).await?;
            print_json(&ctx.transport()?.upload_document(document).await?)
        }
        Command::Config(config) => run_config(&ctx, config),
        Command::Projects(projects) => run_projects(&ctx, projects).await,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();
}

fn build_app(
    ctx: &CliContext,
    interactive: bool,
) -> Result<Rc<ChatApp<ReqwestBackend, FileStore, TerminalPresenter<std::io::Stdout>>>, CliError> {
    let presenter = TerminalPresenter::new(std::io::stdout(), interactive);
    let app = ChatApp::new(Surface::Screen, ctx.backend()?, ctx.store(), presenter);
    let saved = app.config().api_base;
    app.apply_overrides(&ctx.base_override(&saved));
    Ok(Rc::new(app))
}

async fn run_chat(ctx: &CliContext) -> Result<(), CliError> {
    let app = build_app(ctx, true)?;
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            app.start().await;
            let poller = app.clone();
            let poll = tokio::task::spawn_local(async move {
                poller.run_status_poll(tokio::time::sleep).await;
            });
            let result = repl::run(app).await;
            poll.abort();
            result
        })
        .await
}

async fn run_ask(ctx: &CliContext, text: &str) -> Result<(), CliError> {
    let app = build_app(ctx, false)?;
    app.start().await;
    app.send_message(text).await?;
    let failed = app.transcript().last().is_some_and(|m| m.is_assistant() && m.text == FALLBACK_REPLY);
    if failed { Err(CliError::NoReply) } else { Ok(()) }
}

fn run_config(ctx: &CliContext, command: ConfigCommand) -> Result<(), CliError> {
    match command.command {
        ConfigSubcommand::Show => print_json(&ctx.config().current()),
        ConfigSubcommand::Set(args) => {
            let patch = config_patch(args)?;
            // Saved from the unmodified store so the run override is not persisted.
            let saved = ConfigStore::load(ctx.store()).save(&patch)?;
            print_json(&saved)
        }
    }
}

fn config_patch(args: ConfigSetArgs) -> Result<ConfigPatch, CliError> {
    Ok(ConfigPatch {
        api_base: args.api_base,
        max_results: args.max_results,
        theme: args.theme.map(|v| parse_setting::<Theme>("theme", v)).transpose()?,
        position: args.position.map(|v| parse_setting::<Position>("position", v)).transpose()?,
        title: args.title,
        welcome_text: args.welcome_text,
        placeholder_text: args.placeholder_text,
        custom_styles: None,
    })
}

fn parse_setting<T: serde::de::DeserializeOwned>(field: &'static str, value: String) -> Result<T, CliError> {
    serde_json::from_value(serde_json::Value::String(value.clone()))
        .map_err(|_| CliError::InvalidSetting { field, value })
}

async fn run_projects(ctx: &CliContext, command: ProjectsCommand) -> Result<(), CliError> {
    let admin = AdminConsole::new(ctx.transport()?);
    match command.command {
        ProjectsSubcommand::List => {
            admin.load_projects().await?;
        }
        ProjectsSubcommand::Create { name, url } => {
            let project = admin.create_project(&name, &url).await?;
            eprintln!("created project {}", project.id);
        }
        ProjectsSubcommand::Delete { id } => {
            admin.delete_project(&id).await?;
            eprintln!("deleted project {id}");
        }
        ProjectsSubcommand::Scrape { id } => {
            admin.trigger_scrape(&id).await?;
            eprintln!("scrape started for {id}");
        }
    }
    let state = admin.state();
    if let Some(error) = state.error {
        eprintln!("project list unavailable: {error}");
    }
    print_json(&state.items)
}

/// Flag or env wins; otherwise a saved absolute URL; otherwise the CLI
/// default. A relative saved base (the browser's `/api`) cannot be used
/// outside a page.
pub fn effective_api_base(flag: Option<&str>, saved: &str) -> String {
    if let Some(base) = flag.map(str::trim).filter(|b| !b.is_empty()) {
        return base.to_owned();
    }
    if saved.starts_with("http://") || saved.starts_with("https://") {
        return saved.to_owned();
    }
    DEFAULT_CLI_API_BASE.to_owned()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
