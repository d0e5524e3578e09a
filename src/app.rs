//! Application state and event handling
//!
//! This is the core of isstrack, managing:
//! - Application state across all tabs
//! - Event handling (keyboard input)
//! - Mounting and unmounting the tracker screen

use crate::config::{Config, LayoutMode};
use crate::tracker::{PollerSettings, TrackerApi, TrackerScreen};
use crate::types::Tab;
use crate::ui::about::{self, AboutState};
use crate::ui::home::HomeState;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a flash message stays on screen
const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub active_tab: Tab,
    pub config: Config,
    /// Where settings changes are written; `None` keeps them in memory
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    api: Arc<dyn TrackerApi>,

    // Per-tab state
    pub home: HomeState,
    pub tracker: Option<TrackerScreen>,
    pub about: AboutState,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

/// Popup overlay state
#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Help,
    Error {
        title: String,
        message: String,
    },
}

impl App {
    /// Create a new App instance. Must run inside a tokio runtime context
    /// when the tracker is kept alive, since that mounts it immediately.
    pub fn new(config: Config, config_path: Option<PathBuf>, api: Arc<dyn TrackerApi>) -> Self {
        let now = Instant::now();
        let theme = Theme::from_name(config.theme);

        let mut app = Self {
            should_quit: false,
            active_tab: Tab::Home,
            config,
            config_path,
            theme,
            api,
            home: HomeState::new(now),
            tracker: None,
            about: AboutState::new(now),
            popup: PopupState::None,
            flash_message: None,
        };

        if app.config.poller.keep_alive {
            app.mount_tracker();
        }

        app
    }

    /// Check if side-by-side layout should be used
    pub fn should_use_side_by_side(&self, terminal_width: u16) -> bool {
        match self.config.layout {
            LayoutMode::SideBySide => true,
            LayoutMode::Stacked => false,
            LayoutMode::Auto => terminal_width >= 100,
        }
    }

    /// Per-frame update: drain poller events and expire the flash message
    pub fn tick(&mut self, now: Instant) {
        if let Some(screen) = self.tracker.as_mut() {
            screen.pump(now);
        }

        if let Some((_, _, shown_at)) = &self.flash_message {
            if now.saturating_duration_since(*shown_at) >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    /// Switch tabs, mounting or unmounting the tracker as needed
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.active_tab {
            return;
        }
        tracing::debug!("Switching tab {:?} -> {:?}", self.active_tab, tab);

        if self.active_tab == Tab::Tracker && !self.config.poller.keep_alive {
            self.tracker = None;
            tracing::debug!("Tracker unmounted");
        }

        self.active_tab = tab;

        match tab {
            Tab::Tracker => {
                if self.tracker.is_none() {
                    self.mount_tracker();
                }
            }
            Tab::About => self.about.activate(Instant::now()),
            Tab::Home => {}
        }
    }

    fn mount_tracker(&mut self) {
        let settings = PollerSettings::from(&self.config.poller);
        self.tracker = Some(TrackerScreen::mount(self.api.clone(), settings));
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            PopupState::Help => {
                if matches!(
                    key.code,
                    KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
                ) {
                    self.popup = PopupState::None;
                }
                Ok(())
            }
            PopupState::Error { .. } => {
                if matches!(key.code, KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc) {
                    self.popup = PopupState::None;
                }
                Ok(())
            }
            PopupState::None => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global keys (work in all tabs)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('1') => self.switch_tab(Tab::Home),
            KeyCode::Char('2') => self.switch_tab(Tab::Tracker),
            KeyCode::Char('3') => self.switch_tab(Tab::About),
            KeyCode::Tab => self.switch_tab(self.active_tab.next()),
            KeyCode::BackTab => self.switch_tab(self.active_tab.previous()),
            KeyCode::Char('?') => self.popup = PopupState::Help,
            KeyCode::Char('t') => {
                self.config.theme = self.config.theme.next();
                self.theme = Theme::from_name(self.config.theme);
                self.persist_config(&format!("Theme: {}", self.config.theme.as_str()));
            }
            KeyCode::Char('L') => {
                self.config.layout = self.config.layout.next();
                self.persist_config(&format!("Layout: {}", self.config.layout.as_str()));
            }
            _ => {}
        }

        // Tab-specific handling
        match self.active_tab {
            Tab::Home => self.handle_home_key(key),
            Tab::Tracker => self.handle_tracker_key(key),
            Tab::About => self.handle_about_key(key),
        }
    }

    /// Handle keys in Home tab
    fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.home.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.home.select_previous(),
            KeyCode::Enter | KeyCode::Char(' ') => self.home.toggle_selected(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Tracker tab
    fn handle_tracker_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('r') {
            if let Some(screen) = &self.tracker {
                if screen.refresh() {
                    self.show_flash("Refreshing position", false);
                } else {
                    self.show_flash("Update already in progress", false);
                }
            }
        }
        Ok(())
    }

    /// Handle keys in About tab
    fn handle_about_key(&mut self, key: KeyEvent) -> Result<()> {
        let link_count = self.config.about.links.len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.about.select_next(link_count),
            KeyCode::Char('k') | KeyCode::Up => self.about.select_previous(),
            KeyCode::Enter => {
                let Some(link) = self.config.about.links.get(self.about.selected_link) else {
                    return Ok(());
                };
                let label = link.label.clone();
                match about::open_link(&link.url) {
                    Ok(()) => self.show_flash(&format!("Opened {}", label), false),
                    Err(e) => {
                        tracing::warn!("Failed to open link: {:#}", e);
                        self.show_flash(&format!("Could not open {}", label), true);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Write config changes to disk, reporting the outcome
    fn persist_config(&mut self, summary: &str) {
        let Some(path) = self.config_path.clone() else {
            self.show_flash(summary, false);
            return;
        };

        if let Err(e) = self.config.save_to(&path) {
            tracing::warn!("Failed to save config: {:#}", e);
            self.show_error("Save Failed", &e.to_string());
        } else {
            self.show_flash(&format!("{} (saved)", summary), false);
        }
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeName;
    use crate::tracker::testing::FakeApi;
    use crate::ui::render::render_at;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(config: Config, api: Arc<FakeApi>) -> App {
        App::new(config, None, api)
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracker_mounts_on_entry_and_unmounts_on_exit() {
        let api = Arc::new(FakeApi::new());
        let mut app = app_with(Config::default(), api.clone());
        assert!(app.tracker.is_none());

        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.active_tab, Tab::Tracker);
        assert!(app.tracker.is_some());

        tokio::time::sleep(Duration::from_millis(1)).await;
        app.tick(Instant::now());
        let screen = app.tracker.as_ref().unwrap();
        assert_eq!(screen.state.sample.latitude, 51.5);
        assert_eq!(screen.state.sample.timezone_id.as_deref(), Some("Europe/London"));

        app.handle_key(key(KeyCode::Char('1'))).unwrap();
        assert!(app.tracker.is_none());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.position_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_starts_fresh() {
        let api = Arc::new(FakeApi::new());
        let mut app = app_with(Config::default(), api.clone());

        app.switch_tab(Tab::Tracker);
        tokio::time::sleep(Duration::from_millis(1)).await;
        app.tick(Instant::now());
        app.switch_tab(Tab::About);
        app.switch_tab(Tab::Tracker);

        // New state, first cycle fires again right away
        assert_eq!(app.tracker.as_ref().unwrap().state.successful_cycles, 0);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(api.position_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_alive_mounts_at_startup() {
        let api = Arc::new(FakeApi::new());
        let mut config = Config::default();
        config.poller.keep_alive = true;
        let mut app = app_with(config, api.clone());
        assert!(app.tracker.is_some());

        app.switch_tab(Tab::Tracker);
        app.switch_tab(Tab::Home);
        assert!(app.tracker.is_some());

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(api.position_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_key_triggers_cycle() {
        let api = Arc::new(FakeApi::new());
        let mut app = app_with(Config::default(), api.clone());
        app.switch_tab(Tab::Tracker);
        tokio::time::sleep(Duration::from_millis(1)).await;

        app.handle_key(key(KeyCode::Char('r'))).unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(api.position_calls(), 2);
        let (msg, _, _) = app.flash_message.as_ref().unwrap();
        assert_eq!(msg, "Refreshing position");
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_key_reports_cycle_in_flight() {
        let api = Arc::new(FakeApi::new());
        api.set_delay(Duration::from_secs(5));
        let mut config = Config::default();
        config.poller.allow_overlap = false;
        let mut app = app_with(config, api.clone());
        app.switch_tab(Tab::Tracker);
        tokio::time::sleep(Duration::from_millis(1)).await;

        app.handle_key(key(KeyCode::Char('r'))).unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;

        let (msg, is_error, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("in progress"));
        assert!(!is_error);
        assert_eq!(api.position_calls(), 1);
    }

    #[tokio::test]
    async fn test_tab_cycling_and_quit() {
        let mut app = app_with(Config::default(), Arc::new(FakeApi::new()));

        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active_tab, Tab::Tracker);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active_tab, Tab::About);
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.active_tab, Tab::Tracker);

        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_help_popup_swallows_keys() {
        let mut app = app_with(Config::default(), Arc::new(FakeApi::new()));

        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert!(matches!(app.popup, PopupState::Help));

        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.active_tab, Tab::Home);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(matches!(app.popup, PopupState::None));
    }

    #[tokio::test]
    async fn test_theme_and_layout_keys() {
        let mut app = app_with(Config::default(), Arc::new(FakeApi::new()));

        app.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.config.theme, ThemeName::Gruvbox);
        assert_eq!(app.theme.bg, Theme::gruvbox().bg);

        app.handle_key(key(KeyCode::Char('L'))).unwrap();
        assert_eq!(app.config.layout, LayoutMode::SideBySide);
        assert!(app.should_use_side_by_side(40));
        app.handle_key(key(KeyCode::Char('L'))).unwrap();
        assert!(!app.should_use_side_by_side(200));
    }

    #[tokio::test]
    async fn test_home_keys() {
        let mut app = app_with(Config::default(), Arc::new(FakeApi::new()));

        app.handle_key(key(KeyCode::Char('j'))).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.home.selected, 1);
        assert!(app.home.is_expanded(1));
    }

    #[tokio::test]
    async fn test_flash_expires() {
        let mut app = app_with(Config::default(), Arc::new(FakeApi::new()));
        app.handle_key(key(KeyCode::Char('t'))).unwrap();
        let shown_at = app.flash_message.as_ref().unwrap().2;

        app.tick(shown_at + Duration::from_secs(1));
        assert!(app.flash_message.is_some());
        app.tick(shown_at + FLASH_DURATION);
        assert!(app.flash_message.is_none());
    }

    #[test]
    fn test_should_use_side_by_side_auto() {
        let app = app_with(Config::default(), Arc::new(FakeApi::new()));
        assert!(app.should_use_side_by_side(120));
        assert!(!app.should_use_side_by_side(80));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_frame_renders_every_tab() {
        let mut app = app_with(Config::default(), Arc::new(FakeApi::new()));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        for tab in [Tab::Home, Tab::Tracker, Tab::About] {
            app.switch_tab(tab);
            tokio::time::sleep(Duration::from_millis(1)).await;
            let now = Instant::now() + Duration::from_secs(5);
            app.tick(now);
            terminal.draw(|frame| render_at(frame, &app, now)).unwrap();

            let buf = terminal.backend().buffer();
            let screen: String = buf.content.iter().map(|c| c.symbol()).collect();
            assert!(screen.contains(tab.label()));
            if tab == Tab::Tracker {
                assert!(screen.contains("Velocity: 27600.00 km/h"));
                assert!(screen.contains("every 10s"));
            }
        }
    }
}
