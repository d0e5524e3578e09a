//! Home tab
//!
//! Header over a twinkling starfield, followed by the expandable info cards.
//! The header collapses from a banner to a single title line as the
//! selection moves down the cards.

use crate::content::{InfoCard, HOME_SUBTITLE, HOME_TITLE, INFO_CARDS};
use crate::ui::starfield::{Starfield, STAR_COUNT};
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;
use std::time::Instant;

/// Lines of card text shown while a card is collapsed
pub const COLLAPSED_LINES: usize = 3;

/// Header height with the banner art
const HEADER_MAX: u16 = 7;
/// Header height with title and subtitle only
const HEADER_MIN: u16 = 3;

const BANNER: [&str; 3] = [
    " ▄▄▄▄ ╥ ▄▄▄▄ ",
    "═████═╬═████═",
    " ▀▀▀▀ ╨ ▀▀▀▀ ",
];

/// Selection and expansion state of the Home tab
#[derive(Debug)]
pub struct HomeState {
    pub selected: usize,
    pub expanded: HashSet<usize>,
    pub starfield: Starfield,
    pub started_at: Instant,
}

impl HomeState {
    pub fn new(started_at: Instant) -> Self {
        let mut rng = rand::rng();
        Self::with_starfield(Starfield::generate(STAR_COUNT, &mut rng), started_at)
    }

    pub fn with_starfield(starfield: Starfield, started_at: Instant) -> Self {
        Self {
            selected: 0,
            expanded: HashSet::new(),
            starfield,
            started_at,
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < INFO_CARDS.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Expand or collapse the selected card
    pub fn toggle_selected(&mut self) {
        if !self.expanded.remove(&self.selected) {
            self.expanded.insert(self.selected);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Header height, interpolated between max and min by selection depth
    pub fn header_height(&self) -> u16 {
        let last = (INFO_CARDS.len() - 1).max(1) as f64;
        let t = (self.selected as f64 / last).clamp(0.0, 1.0);
        let height = HEADER_MAX as f64 - t * (HEADER_MAX - HEADER_MIN) as f64;
        height.round() as u16
    }
}

/// Render the Home tab
pub fn render_home_tab(frame: &mut Frame, state: &HomeState, theme: &Theme, now: Instant, area: Rect) {
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let header_height = state.header_height().min(area.height);
    let header_area = Rect {
        height: header_height,
        ..area
    };
    let cards_area = Rect {
        y: area.y + header_height,
        height: area.height - header_height,
        ..area
    };

    let elapsed = now.saturating_duration_since(state.started_at);
    frame.render_widget(state.starfield.widget(elapsed, theme), header_area);
    render_header(frame, header_height, theme, header_area);
    render_cards(frame, state, theme, cards_area);
}

fn render_header(frame: &mut Frame, height: u16, theme: &Theme, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if height >= HEADER_MAX {
        lines.extend(BANNER.iter().map(|row| Line::styled(*row, theme.title())));
        lines.push(Line::raw(""));
    } else if height > HEADER_MIN {
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(HOME_TITLE, theme.title()));
    lines.push(Line::styled(HOME_SUBTITLE, theme.text_dim()));

    // Bottom-align so the title stays near the cards while shrinking
    let skip = lines.len().saturating_sub(area.height as usize);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_cards(frame: &mut Frame, state: &HomeState, theme: &Theme, area: Rect) {
    let text_width = area.width.saturating_sub(4) as usize;

    let bodies: Vec<Vec<String>> = INFO_CARDS
        .iter()
        .enumerate()
        .map(|(i, card)| card_body(card, text_width, state.is_expanded(i)))
        .collect();
    let heights: Vec<u16> = bodies.iter().map(|b| b.len() as u16 + 2).collect();

    // Scroll so the selected card is fully visible
    let mut first = state.selected.min(INFO_CARDS.len() - 1);
    let mut used = heights[first];
    while first > 0 && used + heights[first - 1] <= area.height {
        first -= 1;
        used += heights[first];
    }

    let mut y = area.y;
    for (i, card) in INFO_CARDS.iter().enumerate().skip(first) {
        let remaining = (area.y + area.height).saturating_sub(y);
        if remaining < 3 {
            break;
        }
        let card_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: heights[i].min(remaining),
        };

        let is_selected = i == state.selected;
        let marker = if state.is_expanded(i) { "▾" } else { "▸" };

        let block = Block::default()
            .style(theme.block_style())
            .title(format!(" {} {} {} ", marker, card.icon, card.title))
            .title_style(if is_selected { theme.title() } else { theme.text() })
            .borders(Borders::ALL)
            .border_style(if is_selected {
                theme.border_focused()
            } else {
                theme.border()
            });

        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        let body: Vec<Line> = bodies[i]
            .iter()
            .map(|line| Line::styled(line.as_str(), theme.text()))
            .collect();
        let body_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        frame.render_widget(Paragraph::new(body), body_area);

        y += card_area.height;
    }
}

/// Wrapped card text, cut to [`COLLAPSED_LINES`] unless expanded
fn card_body(card: &InfoCard, width: usize, expanded: bool) -> Vec<String> {
    let mut lines = wrap_words(card.text, width);
    if !expanded && lines.len() > COLLAPSED_LINES {
        lines.truncate(COLLAPSED_LINES);
        if let Some(last) = lines.last_mut() {
            if last.chars().count() >= width {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

/// Greedy word wrap
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
