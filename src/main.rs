#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keytask::{platform, Settings, ShortcutStore};

#[derive(Parser)]
#[command(name = "keytask")]
#[command(about = "bind global keyboard shortcuts to shell commands")]
struct Cli {
    /// shortcuts file to use instead of the configured one
    #[arg(long, value_name = "file")]
    shortcuts: Option<PathBuf>,

    /// open the editor window on launch
    #[arg(long)]
    show: bool,

    /// print the configured shortcuts and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (settings, settings_error) = match Settings::load_or_create() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // initialize logging
    let _log_guard = init_logging(&settings);
    if let Some(e) = settings_error {
        warn!("using default settings: {:#}", e);
    }

    info!("starting keytask v{}", env!("CARGO_PKG_VERSION"));

    let store = ShortcutStore::new(
        cli.shortcuts
            .clone()
            .unwrap_or_else(|| settings.shortcuts_path()),
    );

    if cli.list {
        let shortcuts = store.load();
        println!("\nshortcuts ({:?})", store.path());
        println!("========================================");
        for (hotkey, command) in &shortcuts {
            println!("{:<20} {}", hotkey, command);
        }
        println!("========================================\n");
        return Ok(());
    }

    if settings.high_priority {
        if let Err(e) = platform::set_high_priority() {
            warn!("failed to set high priority: {}", e);
        }
    }

    run(store, &settings, cli.show)
}

fn init_logging(settings: &Settings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    let (file_layer, guard) = match settings.log_to_file.then(Settings::logs_dir) {
        Some(Ok(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, "keytask.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            eprintln!("file logging disabled: {e:#}");
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[cfg(windows)]
fn run(store: ShortcutStore, settings: &Settings, show: bool) -> Result<()> {
    use anyhow::Context;

    // reaps launched commands
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("keytask-launcher")
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    keytask::ui::run(keytask::ui::UiOptions {
        store,
        enabled: settings.start_enabled,
        show_on_start: show,
        runtime: runtime.handle().clone(),
    })
}

#[cfg(not(windows))]
fn run(_store: ShortcutStore, _settings: &Settings, _show: bool) -> Result<()> {
    anyhow::bail!("the tray editor needs Windows; use --list to inspect shortcuts")
}
