//! oxmenu entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::load_from;
use core_events::{EVENT_CHANNEL_CAP, Event};
use core_items::{ItemStore, load_json_file};
use core_render::{Palette, RenderEngine};
use core_state::{HistoryLog, Layout, MenuState};
use core_terminal::{CrosstermBackend, TerminalCapabilities};
use core_text::CellWidth;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod runtime;
mod settings;

use runtime::{Exit, MenuRuntime};
use settings::Settings;

const LOG_ENV: &str = "OXMENU_LOG";

/// CLI arguments. Flags override `oxmenu.toml`.
#[derive(Parser, Debug)]
#[command(name = "oxmenu", version, about = "Terminal menu reading candidates from stdin")]
pub struct Args {
    /// Token matching instead of fuzzy matching.
    #[arg(short = 'F', long = "no-fuzzy")]
    pub no_fuzzy: bool,
    /// Case-insensitive matching.
    #[arg(short = 'i', long = "case-insensitive")]
    pub case_insensitive: bool,
    /// Read no candidates and mask the query.
    #[arg(short = 'P', long = "password")]
    pub password: bool,
    /// Grid rows (0 keeps the single-line strip).
    #[arg(short = 'l', long = "lines")]
    pub lines: Option<u32>,
    /// Grid columns.
    #[arg(short = 'g', long = "columns")]
    pub columns: Option<u32>,
    #[arg(short = 'p', long = "prompt")]
    pub prompt: Option<String>,
    /// History file.
    #[arg(short = 'H', long = "history")]
    pub history: Option<PathBuf>,
    /// Comma separated high-priority items.
    #[arg(long = "hp", value_name = "ITEMS")]
    pub priority: Option<String>,
    /// Read candidates from a JSON object file instead of stdin.
    #[arg(short = 'j', long = "json", value_name = "FILE")]
    pub json: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `oxmenu.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    #[arg(long = "nb", value_name = "COLOR")]
    pub nb: Option<String>,
    #[arg(long = "nf", value_name = "COLOR")]
    pub nf: Option<String>,
    #[arg(long = "sb", value_name = "COLOR")]
    pub sb: Option<String>,
    #[arg(long = "sf", value_name = "COLOR")]
    pub sf: Option<String>,
    /// Priority item background.
    #[arg(long = "hb", value_name = "COLOR")]
    pub hb: Option<String>,
    /// Priority item foreground.
    #[arg(long = "hf", value_name = "COLOR")]
    pub hf: Option<String>,
    #[arg(long = "nhb", value_name = "COLOR")]
    pub nhb: Option<String>,
    #[arg(long = "nhf", value_name = "COLOR")]
    pub nhf: Option<String>,
    #[arg(long = "shb", value_name = "COLOR")]
    pub shb: Option<String>,
    #[arg(long = "shf", value_name = "COLOR")]
    pub shf: Option<String>,
}

/// Log file under the platform cache dir. The terminal is busy drawing the
/// menu, so nothing is ever logged to it.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = dirs::cache_dir()?.join("oxmenu");
    std::fs::create_dir_all(&log_dir).ok()?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "oxmenu.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_items(settings: &Settings) -> Result<ItemStore> {
    if settings.password {
        return Ok(ItemStore::new());
    }
    if let Some(path) = settings.json.as_deref() {
        let object = load_json_file(path)?;
        return Ok(ItemStore::from_json_object(&object));
    }
    let stdin = std::io::stdin().lock();
    Ok(ItemStore::read_lines(stdin, &settings.priority, settings.case)?)
}

fn load_history(settings: &Settings) -> Result<HistoryLog> {
    match settings.history_file.as_deref() {
        Some(path) => HistoryLog::load(path, settings.history_max, settings.history_dedup),
        None => Ok(HistoryLog::disabled()),
    }
}

async fn run_menu(settings: &Settings, state: MenuState) -> Result<(Exit, MenuState)> {
    let caps = TerminalCapabilities::detect();
    let palette = Palette::from_theme(&settings.theme, caps.truecolor);
    let shape = settings.requested_shape();
    let engine = RenderEngine::new(palette, settings.prompt.clone(), settings.password);

    let mut backend = CrosstermBackend::new(caps);
    let guard = backend.enter_guard()?;
    let size = guard.size()?;

    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx);
    let out = BufWriter::new(std::io::stderr());
    let mut menu = MenuRuntime::new(state, engine, shape, size, rx, out);
    let exit = menu.run().await;

    input_shutdown.signal();
    match tokio::time::timeout(Duration::from_millis(200), input_task).await {
        Ok(Ok(())) => trace!(target: "runtime.shutdown", "input_task_joined"),
        Ok(Err(err)) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
        Err(_) => warn!(target: "runtime.shutdown", "input_task_timeout"),
    }
    drop(guard);
    Ok((exit?, menu.into_state()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let settings = Settings::resolve(&args, &config.file);
    let items = load_items(&settings)?;
    let history = load_history(&settings)?;
    info!(
        target: "runtime.startup",
        items = items.len(),
        history = history.len(),
        fuzzy = settings.fuzzy,
        json = settings.json.is_some(),
        password = settings.password,
        config = config.source.is_some(),
        "bootstrap_complete"
    );

    let state = MenuState::new(
        items,
        settings.matcher(),
        Layout::Strip { budget: 1 },
        history,
        Box::new(CellWidth::default()),
    )
    .with_word_delimiters(settings.word_delimiters.clone());

    let (exit, state) = run_menu(&settings, state).await?;
    let output = match exit {
        Exit::Accept(output) => output,
        Exit::Cancel => {
            info!(target: "runtime", "cancelled");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    for line in &output.lines {
        writeln!(stdout, "{line}").context("failed to write output")?;
    }
    stdout.flush().context("failed to write output")?;
    state
        .commit_history(&output.history_entry)
        .context("failed to write history")?;
    info!(target: "runtime", lines = output.lines.len(), "accepted");
    Ok(ExitCode::SUCCESS)
}
