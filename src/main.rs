use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use mpd_mirror::app::cli::Args;
use mpd_mirror::app::config::AppConfig;
use mpd_mirror::app::dispatcher::Dispatcher;
use mpd_mirror::app::events::{apply_event, AppEvent};
use mpd_mirror::app::poller::spawn_poller;
use mpd_mirror::app::App;
use mpd_mirror::player::{MpdService, PlaybackService};
use mpd_mirror::{logging, ui};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    // Leave the alternate screen before the panic report is printed
    let report_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        report_panic(info);
    }));

    let args = Args::parse();

    if args.generate_config {
        println!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let _log_guard = logging::init_logging(&AppConfig::get_log_dir())?;

    let config_path = args.config.clone().unwrap_or_else(AppConfig::get_config_path);
    let mut config = AppConfig::load_from(&config_path);
    args.apply(&mut config);
    tracing::info!(
        host = %config.mpd.host,
        port = config.mpd.port,
        config = %config_path.display(),
        "starting"
    );

    let catalog_cache = config
        .catalog_cache
        .clone()
        .unwrap_or_else(AppConfig::get_catalog_path);
    let service: Arc<dyn PlaybackService> = Arc::new(MpdService::new(
        &config.mpd.host,
        config.mpd.port,
        PathBuf::from(&config.mpd.music_directory),
        catalog_cache,
    ));

    let theme = ui::theme::load_current_theme();
    let mut app = App::new(theme, config.keys.clone(), config.timings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let (tx, mut rx) = mpsc::channel(100);
    let dispatcher = Dispatcher::new(service.clone(), tx.clone(), config.timings);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Status Polling Task
    let poller = spawn_poller(service, tx.clone(), config.timings.poll_interval());

    // 3. Tick Task ⚡ (feedback expiry, keyboard seek commit)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // Initial fetches
    app.catalog_loading = true;
    dispatcher.load_catalog();
    dispatcher.refresh_queue();
    dispatcher.refresh_album_art();

    let result = run_loop(&mut terminal, &mut app, &dispatcher, &mut rx).await;

    poller.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    tracing::info!("exiting");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::ui(f, app))
            .context("failed to draw frame")?;

        match rx.recv().await {
            Some(event) => apply_event(app, dispatcher, event),
            None => break,
        }

        if !app.is_running {
            break;
        }
    }
    Ok(())
}
