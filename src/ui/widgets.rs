//! Reusable UI widgets
//!
//! Contains common UI components used across multiple tabs:
//! - Popup dialogs (help, error)
//! - Spinner frames
//! - Status bar and flash line
//! - Layout helpers

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)], // (label, key)
    theme: &Theme,
    area: Rect,
) {
    // Calculate popup size
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 8).min(area.height.saturating_sub(4));

    let popup_area = centered_rect(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    // Inner area for content
    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 2,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(5),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    // Buttons at bottom
    if !buttons.is_empty() && popup_area.height >= 3 {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height - 3,
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// Render the key binding help popup
pub fn render_help_popup(frame: &mut Frame, theme: &Theme, area: Rect) {
    let bindings = [
        ("1 2 3", "Jump to tab"),
        ("Tab / S-Tab", "Next / previous tab"),
        ("j / k", "Move selection"),
        ("Enter", "Expand card / open link"),
        ("r", "Refresh position now"),
        ("L", "Cycle map layout"),
        ("t", "Cycle theme"),
        ("q", "Quit"),
    ];

    let mut content = vec![Line::raw("")];
    content.extend(bindings.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(format!("{:<14}", keys), Style::default().fg(theme.accent)),
            Span::styled(*action, theme.text()),
        ])
    }));

    render_popup(frame, "Keys", content, &[("Close", '?')], theme, area);
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::styled(message, theme.error()),
        Line::raw(""),
    ];

    render_popup(frame, title, content, &[("OK", 'o')], theme, area);
}

/// Spinner glyph for the given elapsed time
pub fn spinner_frame(elapsed: Duration) -> &'static str {
    SPINNER_FRAMES[(elapsed.as_millis() / 100) as usize % SPINNER_FRAMES.len()]
}

/// Render a flash message (bottom of screen)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);

    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]))
    .style(theme.block_style());

    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Helper: Create horizontal layout with given percentages
pub fn horizontal_split(area: Rect, percentages: &[u16]) -> Vec<Rect> {
    let constraints: Vec<Constraint> = percentages
        .iter()
        .map(|p| Constraint::Percentage(*p))
        .collect();

    Layout::horizontal(constraints).split(area).to_vec()
}

/// Helper: Create vertical layout with given constraints
pub fn vertical_layout(area: Rect, constraints: Vec<Constraint>) -> Vec<Rect> {
    Layout::vertical(constraints).split(area).to_vec()
}

/// Shift a rect right by `offset` cells, shrinking it to stay inside
pub fn shifted(area: Rect, offset: u16) -> Rect {
    let offset = offset.min(area.width);
    Rect {
        x: area.x + offset,
        width: area.width - offset,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_larger_than_area() {
        let area = Rect::new(0, 0, 10, 5);
        let popup = centered_rect(40, 20, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_horizontal_split() {
        let area = Rect::new(0, 0, 100, 50);
        let splits = horizontal_split(area, &[50, 50]);

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].width, 50);
        assert_eq!(splits[1].width, 50);
    }

    #[test]
    fn test_shifted() {
        let area = Rect::new(2, 3, 20, 4);
        assert_eq!(shifted(area, 5), Rect::new(7, 3, 15, 4));
        assert_eq!(shifted(area, 50).width, 0);
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(Duration::ZERO), "⠋");
        assert_eq!(spinner_frame(Duration::from_millis(100)), "⠙");
        assert_eq!(spinner_frame(Duration::from_millis(1000)), "⠋");
    }
}
