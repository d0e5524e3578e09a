//! "Who is the creator?" tab
//!
//! Shows the configured profile. The content fades and slides in every time
//! the tab is shown.

use crate::content::Profile;
use crate::ui::animation::{self, EntryAnimation};
use crate::ui::{widgets, Theme};
use anyhow::{bail, Context, Result};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::process::{Command, Stdio};
use std::time::Instant;

const SLIDE_DISTANCE: u16 = 8;

#[derive(Debug)]
pub struct AboutState {
    pub entry: EntryAnimation,
    pub selected_link: usize,
}

impl AboutState {
    pub fn new(now: Instant) -> Self {
        Self {
            entry: EntryAnimation::starting_at(now),
            selected_link: 0,
        }
    }

    /// Restart the entrance animation (tab became visible)
    pub fn activate(&mut self, now: Instant) {
        self.entry = EntryAnimation::starting_at(now);
    }

    pub fn select_next(&mut self, link_count: usize) {
        if self.selected_link + 1 < link_count {
            self.selected_link += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_link = self.selected_link.saturating_sub(1);
    }
}

/// Open a URL in the system browser
pub fn open_link(url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        bail!("Refusing to open non-http link: {}", url);
    }

    let mut child = browser_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {}", url))?;

    // Reap the launcher once it exits
    std::thread::spawn(move || {
        let _ = child.wait();
    });

    tracing::info!("Opened {}", url);
    Ok(())
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Render the About tab
pub fn render_about_tab(
    frame: &mut Frame,
    profile: &Profile,
    state: &AboutState,
    theme: &Theme,
    now: Instant,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" About ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let offset = animation::slide_offset(Some(&state.entry), now, SLIDE_DISTANCE);
    let dimmed = state.entry.is_dimmed(now);
    let content_area = widgets::shifted(
        Rect {
            x: inner.x + 2,
            y: inner.y + 1,
            width: inner.width.saturating_sub(4),
            height: inner.height.saturating_sub(1),
        },
        offset,
    );

    let lines = profile_lines(profile, state.selected_link, theme, dimmed);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), content_area);
}

fn profile_lines<'a>(
    profile: &'a Profile,
    selected_link: usize,
    theme: &Theme,
    dimmed: bool,
) -> Vec<Line<'a>> {
    let dim = |style: Style| if dimmed { theme.text_dim() } else { style };

    let mut lines = vec![
        Line::styled(profile.name.as_str(), dim(theme.title())),
        Line::styled(profile.role.as_str(), dim(Style::default().fg(theme.accent))),
        Line::raw(""),
        Line::styled(profile.bio.as_str(), dim(theme.text())),
    ];

    if !profile.links.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Links",
            dim(theme.title().add_modifier(Modifier::UNDERLINED)),
        ));
        for (i, link) in profile.links.iter().enumerate() {
            let (pointer, style) = if i == selected_link {
                ("› ", theme.selected())
            } else {
                ("  ", theme.text())
            };
            lines.push(Line::from(vec![
                Span::styled(pointer, dim(style)),
                Span::styled(link.label.as_str(), dim(style)),
                Span::styled(format!("  {}", link.url), theme.text_dim()),
            ]));
        }
    }

    for section in &profile.sections {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            section.title.as_str(),
            dim(theme.title().add_modifier(Modifier::UNDERLINED)),
        ));
        for line in &section.lines {
            lines.push(Line::styled(format!("• {}", line), dim(theme.text())));
        }
    }

    lines
}
