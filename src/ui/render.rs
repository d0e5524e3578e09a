//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with tab bar
//! - Active tab content
//! - Popups and overlays
//! - Status bar

use crate::app::{App, PopupState};
use crate::types::Tab;
use crate::ui::{about, home, tracker, widgets};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::time::Instant;

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    render_at(frame, app, Instant::now());
}

/// Render with an explicit clock, used for animations
pub fn render_at(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3),  // Header + tabs
        Constraint::Min(10),    // Content
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_tab_content(frame, app, now, layout[1]);
    render_status_bar(frame, app, layout[2]);

    // Popup overlays (if any)
    render_popups(frame, app, area);
}

/// Render header with title and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(" isstrack · International Space Station ")
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    let tab_titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if app.active_tab == *tab {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!("[{}] {}", i + 1, tab.label()), style)
        })
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(app.active_tab.index())
        .divider(" │ ")
        .style(theme.text());

    let tabs_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(tabs, tabs_area);
}

/// Render the active tab's content
fn render_tab_content(frame: &mut Frame, app: &App, now: Instant, area: Rect) {
    let theme = &app.theme;

    match app.active_tab {
        Tab::Home => home::render_home_tab(frame, &app.home, theme, now, area),
        Tab::Tracker => match &app.tracker {
            Some(screen) => {
                let view = tracker::TrackerView {
                    state: &screen.state,
                    map: &app.config.map,
                    side_by_side: app.should_use_side_by_side(area.width),
                    theme,
                    mounted_for: now.saturating_duration_since(screen.mounted_at),
                    now,
                };
                tracker::render_tracker_tab(frame, &view, area);
            }
            None => {
                let block = Block::default()
                    .style(theme.block_style())
                    .borders(Borders::ALL)
                    .border_style(theme.border());
                let message = Paragraph::new("Tracker is not running")
                    .style(theme.text_dim())
                    .alignment(Alignment::Center)
                    .block(block);
                frame.render_widget(message, area);
            }
        },
        Tab::About => {
            about::render_about_tab(frame, &app.config.about, &app.about, theme, now, area)
        }
    }
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match app.active_tab {
        Tab::Home => "[j/k] Navigate  [Enter] Expand  [Tab] Next Tab  [?] Help  [q] Quit",
        Tab::Tracker => "[r] Refresh  [L] Layout  [Tab] Next Tab  [?] Help  [q] Quit",
        Tab::About => "[j/k] Select Link  [Enter] Open  [Tab] Next Tab  [?] Help  [q] Quit",
    };

    let right = match (app.active_tab, &app.tracker) {
        (Tab::Tracker, Some(screen)) => {
            let last_fix = screen
                .state
                .last_fix_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".into());
            let failures = match screen.state.failed_cycles {
                0 => String::new(),
                n => format!(" · {} failed", n),
            };
            format!(
                "Last fix {}{} · every {}s",
                last_fix,
                failures,
                app.config.poller.interval().as_secs()
            )
        }
        _ => format!("theme: {}", app.config.theme.as_str()),
    };

    widgets::render_status_bar(frame, hints, &right, theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::Help => widgets::render_help_popup(frame, theme, area),
        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}
