//! isstrack - International Space Station tracker
//!
//! A TUI that follows the ISS around the globe.
//!
//! Features:
//! - Live map centered on the station, refreshed every 10 seconds
//! - Latitude, longitude, altitude, velocity, timezone and visibility
//! - Info cards about the station over a twinkling starfield
//! - Configurable About page
//!
//! Usage: isstrack [--once]

mod app;
mod config;
mod content;
mod logging;
mod tracker;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracker::{TrackerApi, TrackerState, WhereTheIssClient};

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let once = args.iter().any(|a| a == "--once");

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("isstrack {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("isstrack-worker")
        .build()
        .context("Failed to start async runtime")?;
    let _enter = runtime.enter();

    // Run the application
    let result = if once {
        run_once(&runtime)
    } else {
        run_app()
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"isstrack - International Space Station tracker

USAGE:
    isstrack [OPTIONS]

OPTIONS:
        --once       Fetch the current position once, print it and exit
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    1-3              Switch tabs
    Tab / S-Tab      Next / previous tab
    j/k              Navigate up/down
    Enter/Space      Expand card (Home), open link (About)
    r                Refresh position now (Where is ISS?)
    L                Cycle map layout
    t                Cycle theme
    ?                Show key help
    q                Quit

TABS:
    [1] Home                  About the station
    [2] Where is ISS?         Live map and position details
    [3] Who is the creator?   Profile and links

CONFIG:
    ~/.config/isstrack/config.toml

ENVIRONMENT:
    RUST_LOG         Override the log filter
"#
    );
}

/// Load config, falling back to defaults when the file is unusable
fn load_config() -> config::Config {
    match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {:#}; using default configuration", e);
            config::Config::default()
        }
    }
}

/// Start file logging; the app keeps running without it
fn start_logging(config: &config::Config) -> Option<logging::LoggerGuard> {
    let result = logging::log_dir().and_then(|dir| {
        logging::init_logging(dir, "isstrack", &config.logging.level, config.logging.retention())
    });

    match result {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    }
}

/// Record a fatal error while the log writer is still alive
fn log_failure<T>(result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::error!("Fatal: {:#}", e);
    }
    result
}

/// `--once`: one fetch cycle, panel lines on stdout
fn run_once(runtime: &Runtime) -> Result<()> {
    let config = load_config();
    let _log_guard = start_logging(&config);
    log_failure(fetch_once(runtime, &config))
}

fn fetch_once(runtime: &Runtime, config: &config::Config) -> Result<()> {
    let client = WhereTheIssClient::new(&config.api)?;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    runtime.block_on(tracker::run_cycle(&client, 1, &tx));
    drop(tx);

    let mut state = TrackerState::new();
    let now = Instant::now();
    while let Ok(event) = rx.try_recv() {
        state.apply(event, now);
    }

    if let Some(message) = &state.sample.error_message {
        anyhow::bail!("{}", message);
    }
    for line in state.sample.panel_lines() {
        println!("{}", line);
    }
    Ok(())
}

fn run_app() -> Result<()> {
    let config = load_config();
    let _log_guard = start_logging(&config);
    log_failure(run_tui(config))
}

fn run_tui(config: config::Config) -> Result<()> {
    tracing::info!("isstrack {} starting", env!("CARGO_PKG_VERSION"));

    let api: Arc<dyn TrackerApi> = Arc::new(
        WhereTheIssClient::new(&config.api).context("Failed to create API client")?,
    );

    // Create application state
    let config_path = config::Config::path().ok();
    let mut app = App::new(config, config_path, api);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    tracing::info!("isstrack exiting");
    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply poller results before drawing
        app.tick(Instant::now());

        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events with timeout (animations and poller updates)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fatal_error_is_logged_before_returning() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let failed: Result<()> = Err(anyhow::anyhow!("socket closed"));
        let result = tracing::subscriber::with_default(subscriber, || {
            log_failure(failed.context("Fetch failed"))
        });

        assert!(result.is_err());
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Fatal: Fetch failed: socket closed"));
    }

    #[test]
    fn test_success_is_passed_through_silently() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || log_failure(Ok(7)));

        assert_eq!(result.unwrap(), 7);
        assert!(captured.0.lock().unwrap().is_empty());
    }
}
